//! 成本與比率參數

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{HrpError, ResourceKind, Result};

/// 成本與服務比率參數
///
/// 使用 `Decimal` 保證比率相乘後的向上取整不受浮點誤差影響
/// （例如 100 × 0.15 必須得到 15，而非 15.000000000000002）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostParams {
    /// 每名額外護理師每日成本
    pub cost_nurse_per_day: Decimal,

    /// 每名額外醫師每日成本
    pub cost_doctor_per_day: Decimal,

    /// 每張額外床位每日成本
    pub cost_bed_per_day: Decimal,

    /// 每個氧氣鋼瓶成本
    pub cost_oxygen_unit: Decimal,

    /// 每個急救藥品包成本
    pub cost_med_pack: Decimal,

    /// 一名護理師可照顧的病人數
    pub patients_per_nurse: Decimal,

    /// 一名醫師可照顧的病人數
    pub patients_per_doctor: Decimal,

    /// 需要氧氣的病人比例
    pub oxygen_per_patient_rate: Decimal,

    /// 需要急救藥品包的病人比例
    pub med_pack_per_patient_rate: Decimal,

    /// 安全緩衝比例（加在預測入院人數上）
    pub safety_buffer: Decimal,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            cost_nurse_per_day: Decimal::from(1000),
            cost_doctor_per_day: Decimal::from(4000),
            cost_bed_per_day: Decimal::from(500),
            cost_oxygen_unit: Decimal::from(2000),
            cost_med_pack: Decimal::from(250),
            patients_per_nurse: Decimal::from(6),
            patients_per_doctor: Decimal::from(20),
            oxygen_per_patient_rate: Decimal::new(1, 1),
            med_pack_per_patient_rate: Decimal::new(3, 1),
            safety_buffer: Decimal::new(15, 2),
        }
    }
}

impl CostParams {
    /// 可覆寫的參數名稱
    pub const FIELD_NAMES: [&'static str; 10] = [
        "cost_nurse_per_day",
        "cost_doctor_per_day",
        "cost_bed_per_day",
        "cost_oxygen_unit",
        "cost_med_pack",
        "patients_per_nurse",
        "patients_per_doctor",
        "oxygen_per_patient_rate",
        "med_pack_per_patient_rate",
        "safety_buffer",
    ];

    /// 套用覆寫值（未指定的欄位保留原值）
    pub fn with_overrides(mut self, overrides: &CostOverrides) -> Self {
        let CostOverrides {
            cost_nurse_per_day,
            cost_doctor_per_day,
            cost_bed_per_day,
            cost_oxygen_unit,
            cost_med_pack,
            patients_per_nurse,
            patients_per_doctor,
            oxygen_per_patient_rate,
            med_pack_per_patient_rate,
            safety_buffer,
        } = *overrides;

        let pairs = [
            (&mut self.cost_nurse_per_day, cost_nurse_per_day),
            (&mut self.cost_doctor_per_day, cost_doctor_per_day),
            (&mut self.cost_bed_per_day, cost_bed_per_day),
            (&mut self.cost_oxygen_unit, cost_oxygen_unit),
            (&mut self.cost_med_pack, cost_med_pack),
            (&mut self.patients_per_nurse, patients_per_nurse),
            (&mut self.patients_per_doctor, patients_per_doctor),
            (&mut self.oxygen_per_patient_rate, oxygen_per_patient_rate),
            (&mut self.med_pack_per_patient_rate, med_pack_per_patient_rate),
            (&mut self.safety_buffer, safety_buffer),
        ];
        for (slot, value) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
        self
    }

    /// 驗證參數
    ///
    /// 成本與緩衝比例不可為負；服務比率與消耗比例必須為正。
    /// 緩衝比例 ≥ 1 合法，只是不常見。
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("cost_nurse_per_day", self.cost_nurse_per_day),
            ("cost_doctor_per_day", self.cost_doctor_per_day),
            ("cost_bed_per_day", self.cost_bed_per_day),
            ("cost_oxygen_unit", self.cost_oxygen_unit),
            ("cost_med_pack", self.cost_med_pack),
            ("safety_buffer", self.safety_buffer),
        ];
        for (name, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(invalid(name, format!("不可為負數，實際為 {value}")));
            }
        }

        let positive = [
            ("patients_per_nurse", self.patients_per_nurse),
            ("patients_per_doctor", self.patients_per_doctor),
            ("oxygen_per_patient_rate", self.oxygen_per_patient_rate),
            ("med_pack_per_patient_rate", self.med_pack_per_patient_rate),
        ];
        for (name, value) in positive {
            if value <= Decimal::ZERO {
                return Err(invalid(name, format!("必須大於 0，實際為 {value}")));
            }
        }

        Ok(())
    }

    /// 單位成本
    pub fn unit_cost(&self, kind: ResourceKind) -> Decimal {
        match kind {
            ResourceKind::Beds => self.cost_bed_per_day,
            ResourceKind::Nurses => self.cost_nurse_per_day,
            ResourceKind::Doctors => self.cost_doctor_per_day,
            ResourceKind::OxygenUnits => self.cost_oxygen_unit,
            ResourceKind::MedPacks => self.cost_med_pack,
        }
    }
}

fn invalid(name: &str, reason: String) -> HrpError {
    HrpError::InvalidParameter {
        field: format!("rules.{name}"),
        reason,
    }
}

/// 參數覆寫（對應請求中的 `rules`）
///
/// 未知的鍵視為驗證錯誤，不會被忽略。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostOverrides {
    pub cost_nurse_per_day: Option<Decimal>,
    pub cost_doctor_per_day: Option<Decimal>,
    pub cost_bed_per_day: Option<Decimal>,
    pub cost_oxygen_unit: Option<Decimal>,
    pub cost_med_pack: Option<Decimal>,
    pub patients_per_nurse: Option<Decimal>,
    pub patients_per_doctor: Option<Decimal>,
    pub oxygen_per_patient_rate: Option<Decimal>,
    pub med_pack_per_patient_rate: Option<Decimal>,
    pub safety_buffer: Option<Decimal>,
}

impl CostOverrides {
    /// 從請求的 `rules` 物件解析覆寫值
    pub fn from_rules(rules: &Map<String, Value>) -> Result<Self> {
        // 依名稱排序回報，確保錯誤訊息穩定
        let mut unknown: Vec<&String> = rules
            .keys()
            .filter(|key| !CostParams::FIELD_NAMES.contains(&key.as_str()))
            .collect();
        unknown.sort();
        if let Some(key) = unknown.first() {
            return Err(HrpError::UnknownRule((*key).clone()));
        }

        for (key, value) in rules {
            if !value.is_number() {
                return Err(HrpError::InvalidParameter {
                    field: format!("rules.{key}"),
                    reason: format!("必須為數值，實際為 {value}"),
                });
            }
        }

        serde_json::from_value(Value::Object(rules.clone())).map_err(|e| {
            HrpError::InvalidParameter {
                field: "rules".to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// 檢查是否沒有任何覆寫
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rules(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("rules must be an object"),
        }
    }

    #[test]
    fn test_default_params() {
        let params = CostParams::default();

        assert_eq!(params.cost_nurse_per_day, Decimal::from(1000));
        assert_eq!(params.patients_per_doctor, Decimal::from(20));
        assert_eq!(params.safety_buffer.to_string(), "0.15");
        assert_eq!(params.oxygen_per_patient_rate.to_string(), "0.1");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_overrides_merge_subset() {
        let overrides = CostOverrides::from_rules(&rules(json!({
            "patients_per_nurse": 4,
            "safety_buffer": 0.2
        })))
        .unwrap();

        let params = CostParams::default().with_overrides(&overrides);

        assert_eq!(params.patients_per_nurse, Decimal::from(4));
        assert_eq!(params.safety_buffer, Decimal::new(2, 1));
        // 未覆寫的欄位保持預設值
        assert_eq!(params.cost_doctor_per_day, Decimal::from(4000));
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let err = CostOverrides::from_rules(&rules(json!({
            "patients_per_nurse": 4,
            "nurse_ratio": 5
        })))
        .unwrap_err();

        assert_eq!(err, HrpError::UnknownRule("nurse_ratio".to_string()));
    }

    #[test]
    fn test_non_numeric_rule_rejected() {
        let err = CostOverrides::from_rules(&rules(json!({ "safety_buffer": "high" }))).unwrap_err();

        assert_eq!(err.field(), Some("rules.safety_buffer"));
    }

    #[test]
    fn test_empty_rules() {
        let overrides = CostOverrides::from_rules(&Map::new()).unwrap();
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_zero_ratio_rejected() {
        let params = CostParams {
            patients_per_doctor: Decimal::ZERO,
            ..CostParams::default()
        };

        let err = params.validate().unwrap_err();
        assert_eq!(err.field(), Some("rules.patients_per_doctor"));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let params = CostParams {
            cost_bed_per_day: Decimal::from(-1),
            ..CostParams::default()
        };

        assert!(params.validate().is_err());
    }

    #[test]
    fn test_large_buffer_accepted() {
        let params = CostParams {
            safety_buffer: Decimal::from(2),
            ..CostParams::default()
        };

        assert!(params.validate().is_ok());
    }
}
