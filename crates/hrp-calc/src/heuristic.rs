//! 貪婪估算（求解器的後備方案）

use hrp_core::{DailyDemand, HospitalState, ResourceKind, ResourceSuggestion};

/// 逐日、逐資源的貪婪估算器
///
/// 每種資源各自補足到當日最低需求，不做跨資源的成本取捨，也忽略容量上限。
/// 結果一定滿足覆蓋約束，但不保證成本最低。
pub struct HeuristicEstimator;

impl HeuristicEstimator {
    /// 估算每日額外資源
    pub fn estimate(demands: &[DailyDemand], hospital: &HospitalState) -> Vec<ResourceSuggestion> {
        tracing::debug!(
            "貪婪估算：{} 天，醫院 {}",
            demands.len(),
            hospital.hospital_id
        );

        demands
            .iter()
            .map(|demand| Self::estimate_day(demand, hospital))
            .collect()
    }

    /// 單日估算：extra = max(0, 最低需求 - 基準量)
    pub fn estimate_day(demand: &DailyDemand, hospital: &HospitalState) -> ResourceSuggestion {
        ResourceKind::ALL.iter().fold(
            ResourceSuggestion::new(demand.date, demand.predicted_admissions),
            |suggestion, &kind| {
                let extra = demand
                    .minimum_level(kind)
                    .saturating_sub(hospital.baseline(kind));
                suggestion.with_extra(kind, extra)
            },
        )
    }
}
