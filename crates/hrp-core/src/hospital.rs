//! 醫院現況模型

use serde::{Deserialize, Serialize};

use crate::{HrpError, ResourceKind, Result};

/// 醫院目前的資源基準量與可擴充上限
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalState {
    /// 醫院ID
    pub hospital_id: String,

    /// 現有床位
    pub baseline_beds: u64,

    /// 每日在班護理師
    pub baseline_nurses: u64,

    /// 每日在班醫師
    pub baseline_doctors: u64,

    /// 現有氧氣鋼瓶
    pub baseline_oxygen_units: u64,

    /// 現有急救藥品包
    pub baseline_med_packs: u64,

    /// 床位上限（可擴充時）
    pub max_bed_capacity: Option<u64>,

    /// 護理師上限
    pub max_nurses: Option<u64>,

    /// 醫師上限
    pub max_doctors: Option<u64>,
}

impl HospitalState {
    /// 創建新的醫院現況（基準量全為 0，無上限）
    pub fn new(hospital_id: impl Into<String>) -> Self {
        Self {
            hospital_id: hospital_id.into(),
            baseline_beds: 0,
            baseline_nurses: 0,
            baseline_doctors: 0,
            baseline_oxygen_units: 0,
            baseline_med_packs: 0,
            max_bed_capacity: None,
            max_nurses: None,
            max_doctors: None,
        }
    }

    /// 建構器模式：設置基準量
    pub fn with_baseline(mut self, kind: ResourceKind, quantity: u64) -> Self {
        *self.baseline_mut(kind) = quantity;
        self
    }

    /// 建構器模式：設置上限
    ///
    /// 氧氣與藥品包不支援上限，設定會被忽略。
    pub fn with_max_bound(mut self, kind: ResourceKind, bound: u64) -> Self {
        if let Some(slot) = self.bound_mut(kind) {
            *slot = Some(bound);
        }
        self
    }

    /// 取得基準量
    pub fn baseline(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Beds => self.baseline_beds,
            ResourceKind::Nurses => self.baseline_nurses,
            ResourceKind::Doctors => self.baseline_doctors,
            ResourceKind::OxygenUnits => self.baseline_oxygen_units,
            ResourceKind::MedPacks => self.baseline_med_packs,
        }
    }

    /// 取得上限
    pub fn max_bound(&self, kind: ResourceKind) -> Option<u64> {
        match kind {
            ResourceKind::Beds => self.max_bed_capacity,
            ResourceKind::Nurses => self.max_nurses,
            ResourceKind::Doctors => self.max_doctors,
            ResourceKind::OxygenUnits | ResourceKind::MedPacks => None,
        }
    }

    /// 檢查是否設有任何上限
    pub fn has_bounds(&self) -> bool {
        ResourceKind::ALL
            .iter()
            .any(|&kind| self.max_bound(kind).is_some())
    }

    /// 驗證上限不低於基準量
    pub fn validate(&self) -> Result<()> {
        for kind in ResourceKind::ALL {
            let (Some(bound), Some(field)) = (self.max_bound(kind), kind.bound_field()) else {
                continue;
            };
            let baseline = self.baseline(kind);
            if bound < baseline {
                return Err(HrpError::BoundBelowBaseline {
                    field: field.to_string(),
                    bound,
                    baseline,
                });
            }
        }
        Ok(())
    }

    fn baseline_mut(&mut self, kind: ResourceKind) -> &mut u64 {
        match kind {
            ResourceKind::Beds => &mut self.baseline_beds,
            ResourceKind::Nurses => &mut self.baseline_nurses,
            ResourceKind::Doctors => &mut self.baseline_doctors,
            ResourceKind::OxygenUnits => &mut self.baseline_oxygen_units,
            ResourceKind::MedPacks => &mut self.baseline_med_packs,
        }
    }

    fn bound_mut(&mut self, kind: ResourceKind) -> Option<&mut Option<u64>> {
        match kind {
            ResourceKind::Beds => Some(&mut self.max_bed_capacity),
            ResourceKind::Nurses => Some(&mut self.max_nurses),
            ResourceKind::Doctors => Some(&mut self.max_doctors),
            ResourceKind::OxygenUnits | ResourceKind::MedPacks => None,
        }
    }
}
