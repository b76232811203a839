//! 資源種類

use serde::{Deserialize, Serialize};

/// 規劃涵蓋的五種資源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// 床位
    Beds,
    /// 護理師
    Nurses,
    /// 醫師
    Doctors,
    /// 氧氣鋼瓶
    OxygenUnits,
    /// 急救藥品包
    MedPacks,
}

impl ResourceKind {
    /// 固定順序，求解模型與輸出都依此排列
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Beds,
        ResourceKind::Nurses,
        ResourceKind::Doctors,
        ResourceKind::OxygenUnits,
        ResourceKind::MedPacks,
    ];

    /// 顯示用名稱
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Beds => "beds",
            ResourceKind::Nurses => "nurses",
            ResourceKind::Doctors => "doctors",
            ResourceKind::OxygenUnits => "oxygen",
            ResourceKind::MedPacks => "med packs",
        }
    }

    /// 基準量在請求中的欄位路徑
    pub fn baseline_field(self) -> &'static str {
        match self {
            ResourceKind::Beds => "hospital.baseline_beds",
            ResourceKind::Nurses => "hospital.baseline_nurses",
            ResourceKind::Doctors => "hospital.baseline_doctors",
            ResourceKind::OxygenUnits => "hospital.baseline_oxygen_units",
            ResourceKind::MedPacks => "hospital.baseline_med_packs",
        }
    }

    /// 上限在請求中的欄位路徑（氧氣與藥品包沒有上限）
    pub fn bound_field(self) -> Option<&'static str> {
        match self {
            ResourceKind::Beds => Some("hospital.max_bed_capacity"),
            ResourceKind::Nurses => Some("hospital.max_nurses"),
            ResourceKind::Doctors => Some("hospital.max_doctors"),
            ResourceKind::OxygenUnits | ResourceKind::MedPacks => None,
        }
    }

    /// 是否可設定容量上限
    pub fn supports_upper_bound(self) -> bool {
        self.bound_field().is_some()
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
