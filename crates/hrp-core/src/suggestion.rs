//! 資源建議模型（規劃結果）

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ResourceKind;

/// 單日資源建議
///
/// `extra_*` 是在基準量之上需要增加的數量，永不為負。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSuggestion {
    /// 日期
    pub date: NaiveDate,

    /// 預測入院人數
    pub predicted_admissions: u64,

    /// 額外床位
    pub extra_beds: u64,

    /// 額外護理師
    pub extra_nurses: u64,

    /// 額外醫師
    pub extra_doctors: u64,

    /// 額外氧氣鋼瓶
    pub extra_oxygen_units: u64,

    /// 額外急救藥品包
    pub extra_med_packs: u64,
}

impl ResourceSuggestion {
    /// 創建新的建議（額外量全為 0）
    pub fn new(date: NaiveDate, predicted_admissions: u64) -> Self {
        Self {
            date,
            predicted_admissions,
            extra_beds: 0,
            extra_nurses: 0,
            extra_doctors: 0,
            extra_oxygen_units: 0,
            extra_med_packs: 0,
        }
    }

    /// 建構器模式：設置額外量
    pub fn with_extra(mut self, kind: ResourceKind, quantity: u64) -> Self {
        self.set_extra(kind, quantity);
        self
    }

    /// 設置額外量
    pub fn set_extra(&mut self, kind: ResourceKind, quantity: u64) {
        let slot = match kind {
            ResourceKind::Beds => &mut self.extra_beds,
            ResourceKind::Nurses => &mut self.extra_nurses,
            ResourceKind::Doctors => &mut self.extra_doctors,
            ResourceKind::OxygenUnits => &mut self.extra_oxygen_units,
            ResourceKind::MedPacks => &mut self.extra_med_packs,
        };
        *slot = quantity;
    }

    /// 取得額外量
    pub fn extra(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Beds => self.extra_beds,
            ResourceKind::Nurses => self.extra_nurses,
            ResourceKind::Doctors => self.extra_doctors,
            ResourceKind::OxygenUnits => self.extra_oxygen_units,
            ResourceKind::MedPacks => self.extra_med_packs,
        }
    }

    /// 檢查是否不需要任何額外資源
    pub fn is_covered_by_baseline(&self) -> bool {
        ResourceKind::ALL.iter().all(|&kind| self.extra(kind) == 0)
    }
}
