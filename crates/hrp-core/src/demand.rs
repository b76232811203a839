//! 每日需求計算

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CostParams, Forecast, ForecastPoint, HrpError, ResourceKind, Result};

/// 單日的資源需求量
///
/// 所有由比例推得的數量一律向上取整，不接受任何程度的不足。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDemand {
    /// 日期
    pub date: NaiveDate,

    /// 預測入院人數
    pub predicted_admissions: u64,

    /// 含安全緩衝的需求人數：pred + ceil(pred × buffer)
    pub required_total: u64,

    /// 最少護理師人數：ceil(required / patients_per_nurse)
    pub nurses_needed: u64,

    /// 最少醫師人數：ceil(required / patients_per_doctor)
    pub doctors_needed: u64,

    /// 氧氣鋼瓶需求：ceil(pred × oxygen_rate)
    pub oxygen_needed: u64,

    /// 急救藥品包需求：ceil(pred × med_rate)
    pub med_packs_needed: u64,
}

impl DailyDemand {
    /// 計算單日需求
    pub fn compute(point: &ForecastPoint, params: &CostParams) -> Result<Self> {
        let pred = point.predicted_admissions;
        let date = point.date;

        let buffer = ceil_product(pred, params.safety_buffer, date, "safety_buffer")?;
        let required_total = pred.checked_add(buffer).ok_or_else(|| {
            out_of_range("safety_buffer", format!("{date}: {pred} + {buffer} 溢出"))
        })?;

        Ok(Self {
            date,
            predicted_admissions: pred,
            required_total,
            nurses_needed: min_headcount(
                required_total,
                params.patients_per_nurse,
                date,
                "patients_per_nurse",
            )?,
            doctors_needed: min_headcount(
                required_total,
                params.patients_per_doctor,
                date,
                "patients_per_doctor",
            )?,
            oxygen_needed: ceil_product(
                pred,
                params.oxygen_per_patient_rate,
                date,
                "oxygen_per_patient_rate",
            )?,
            med_packs_needed: ceil_product(
                pred,
                params.med_pack_per_patient_rate,
                date,
                "med_pack_per_patient_rate",
            )?,
        })
    }

    /// 計算整個預測序列的需求（保持預測順序）
    pub fn from_forecast(forecast: &Forecast, params: &CostParams) -> Result<Vec<Self>> {
        forecast
            .iter()
            .map(|point| Self::compute(point, params))
            .collect()
    }

    /// 該資源在當日最少需要的總量（基準量 + 額外量）
    pub fn minimum_level(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Beds => self.required_total,
            ResourceKind::Nurses => self.nurses_needed,
            ResourceKind::Doctors => self.doctors_needed,
            ResourceKind::OxygenUnits => self.oxygen_needed,
            ResourceKind::MedPacks => self.med_packs_needed,
        }
    }
}

/// 溢出時歸咎於造成溢出的參數
fn out_of_range(param: &str, reason: String) -> HrpError {
    HrpError::ValueOutOfRange {
        field: format!("rules.{param}"),
        reason,
    }
}

/// ceil(count × rate)
fn ceil_product(count: u64, rate: Decimal, date: NaiveDate, param: &str) -> Result<u64> {
    Decimal::from(count)
        .checked_mul(rate)
        .and_then(|v| v.ceil().to_u64())
        .ok_or_else(|| out_of_range(param, format!("{date}: {count} × {rate} 超出範圍")))
}

/// 滿足 headcount × ratio ≥ required 的最小整數人數
fn min_headcount(required: u64, ratio: Decimal, date: NaiveDate, param: &str) -> Result<u64> {
    if required == 0 {
        return Ok(0);
    }

    let required_dec = Decimal::from(required);
    let overflow = || out_of_range(param, format!("{date}: {required} ÷ {ratio} 超出範圍"));

    let mut headcount = required_dec
        .checked_div(ratio)
        .and_then(|v| v.ceil().to_u64())
        .ok_or_else(overflow)?;

    // 除法結果可能在最後一位被捨入，以乘法回頭校正
    let covers = |n: u64| {
        Decimal::from(n)
            .checked_mul(ratio)
            .map_or(true, |capacity| capacity >= required_dec)
    };
    while headcount > 0 && covers(headcount - 1) {
        headcount -= 1;
    }
    while !covers(headcount) {
        headcount = headcount.checked_add(1).ok_or_else(overflow)?;
    }

    Ok(headcount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn point(pred: u64) -> ForecastPoint {
        ForecastPoint::new(day(), pred)
    }

    #[test]
    fn test_default_params_100_admissions() {
        let demand = DailyDemand::compute(&point(100), &CostParams::default()).unwrap();

        // 100 + ceil(100 × 0.15) = 115，浮點運算會誤得 116
        assert_eq!(demand.required_total, 115);
        assert_eq!(demand.nurses_needed, 20); // ceil(115 / 6)
        assert_eq!(demand.doctors_needed, 6); // ceil(115 / 20)
        assert_eq!(demand.oxygen_needed, 10);
        assert_eq!(demand.med_packs_needed, 30);
        assert_eq!(demand.minimum_level(ResourceKind::Beds), 115);
    }

    #[test]
    fn test_zero_admissions() {
        let demand = DailyDemand::compute(&point(0), &CostParams::default()).unwrap();

        for kind in ResourceKind::ALL {
            assert_eq!(demand.minimum_level(kind), 0);
        }
    }

    #[rstest]
    #[case(1, 2, 1)] // 1 + ceil(0.15) = 2 → ceil(2/6) = 1
    #[case(7, 9, 2)] // 7 + ceil(1.05) = 9 → ceil(9/6) = 2
    #[case(20, 23, 4)] // 20 + 3 = 23 → ceil(23/6) = 4
    #[case(120, 138, 23)]
    fn test_required_and_nurses(
        #[case] pred: u64,
        #[case] required: u64,
        #[case] nurses: u64,
    ) {
        let demand = DailyDemand::compute(&point(pred), &CostParams::default()).unwrap();

        assert_eq!(demand.required_total, required);
        assert_eq!(demand.nurses_needed, nurses);
    }

    #[test]
    fn test_fractional_ratio_headcount() {
        // 比率 0.3：3 × 0.3 = 0.9 < 1，4 × 0.3 = 1.2 ≥ 1
        assert_eq!(min_headcount(1, Decimal::new(3, 1), day(), "patients_per_nurse").unwrap(), 4);
        // 比率 1/3 的近似值也必須校正到滿足乘法約束
        let third = Decimal::ONE / Decimal::from(3);
        let n = min_headcount(10, third, day(), "patients_per_nurse").unwrap();
        assert!(Decimal::from(n) * third >= Decimal::from(10));
        assert!(Decimal::from(n - 1) * third < Decimal::from(10));
    }

    #[test]
    fn test_exact_division() {
        assert_eq!(min_headcount(120, Decimal::from(6), day(), "patients_per_nurse").unwrap(), 20);
    }

    #[test]
    fn test_buffer_overflow_blames_rule() {
        let err = DailyDemand::compute(&point(u64::MAX), &CostParams::default()).unwrap_err();

        assert_eq!(err.field(), Some("rules.safety_buffer"));
        assert!(err.to_string().contains("2025-01-01"));
    }

    #[test]
    fn test_rate_overflow_blames_rule() {
        let params = CostParams {
            safety_buffer: Decimal::ZERO,
            oxygen_per_patient_rate: Decimal::from(10),
            ..CostParams::default()
        };

        let err = DailyDemand::compute(&point(u64::MAX), &params).unwrap_err();
        assert_eq!(err.field(), Some("rules.oxygen_per_patient_rate"));
    }
}
