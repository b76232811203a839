//! 覆蓋約束檢查

use chrono::NaiveDate;
use hrp_core::{DailyDemand, HospitalState, ResourceKind, ResourceSuggestion};

/// 違反類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// 基準量 + 額外量低於需求
    Shortfall,
    /// 基準量 + 額外量超過上限
    OverBound,
    /// 建議與需求的日期對不上
    DateMismatch,
}

/// 單筆違反記錄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageViolation {
    pub date: NaiveDate,
    pub resource: ResourceKind,
    pub kind: ViolationKind,
    /// 基準量 + 額外量
    pub level: u64,
    /// 需求量或上限
    pub limit: u64,
}

impl std::fmt::Display for CoverageViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ViolationKind::Shortfall => write!(
                f,
                "{} {}: {} < 需求 {}",
                self.date, self.resource, self.level, self.limit
            ),
            ViolationKind::OverBound => write!(
                f,
                "{} {}: {} > 上限 {}",
                self.date, self.resource, self.level, self.limit
            ),
            ViolationKind::DateMismatch => write!(f, "{} 日期與需求不一致", self.date),
        }
    }
}

/// 覆蓋約束檢查器
pub struct CoverageChecker;

impl CoverageChecker {
    /// 檢查建議是否滿足每日需求
    ///
    /// `respect_bounds` 為 true 時同時檢查容量上限（求解結果須滿足；
    /// 貪婪估算忽略上限，因此以 false 檢查）。
    pub fn check(
        demands: &[DailyDemand],
        hospital: &HospitalState,
        suggestions: &[ResourceSuggestion],
        respect_bounds: bool,
    ) -> Vec<CoverageViolation> {
        let mut violations = Vec::new();

        if demands.len() != suggestions.len() {
            let date = demands
                .first()
                .map(|d| d.date)
                .or_else(|| suggestions.first().map(|s| s.date));
            if let Some(date) = date {
                violations.push(CoverageViolation {
                    date,
                    resource: ResourceKind::Beds,
                    kind: ViolationKind::DateMismatch,
                    level: suggestions.len() as u64,
                    limit: demands.len() as u64,
                });
            }
            return violations;
        }

        for (demand, suggestion) in demands.iter().zip(suggestions) {
            if demand.date != suggestion.date {
                violations.push(CoverageViolation {
                    date: suggestion.date,
                    resource: ResourceKind::Beds,
                    kind: ViolationKind::DateMismatch,
                    level: 0,
                    limit: 0,
                });
                continue;
            }

            for kind in ResourceKind::ALL {
                let level = hospital
                    .baseline(kind)
                    .saturating_add(suggestion.extra(kind));
                let required = demand.minimum_level(kind);

                if level < required {
                    violations.push(CoverageViolation {
                        date: demand.date,
                        resource: kind,
                        kind: ViolationKind::Shortfall,
                        level,
                        limit: required,
                    });
                }

                if respect_bounds {
                    if let Some(bound) = hospital.max_bound(kind) {
                        if level > bound {
                            violations.push(CoverageViolation {
                                date: demand.date,
                                resource: kind,
                                kind: ViolationKind::OverBound,
                                level,
                                limit: bound,
                            });
                        }
                    }
                }
            }
        }

        violations
    }

    /// 檢查是否完全滿足
    pub fn is_covered(
        demands: &[DailyDemand],
        hospital: &HospitalState,
        suggestions: &[ResourceSuggestion],
    ) -> bool {
        Self::check(demands, hospital, suggestions, false).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeuristicEstimator;
    use hrp_core::{CostParams, ForecastPoint};

    fn demand(day: u32, pred: u64) -> DailyDemand {
        DailyDemand::compute(
            &ForecastPoint::new(NaiveDate::from_ymd_opt(2025, 3, day).unwrap(), pred),
            &CostParams::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_heuristic_is_covered() {
        let hospital = HospitalState::new("H-001").with_baseline(ResourceKind::Nurses, 3);
        let demands = vec![demand(1, 40), demand(2, 400)];
        let suggestions = HeuristicEstimator::estimate(&demands, &hospital);

        assert!(CoverageChecker::is_covered(&demands, &hospital, &suggestions));
    }

    #[test]
    fn test_shortfall_detected() {
        let hospital = HospitalState::new("H-002");
        let demands = vec![demand(1, 100)];
        let mut suggestions = HeuristicEstimator::estimate(&demands, &hospital);
        suggestions[0].extra_nurses -= 1;

        let violations = CoverageChecker::check(&demands, &hospital, &suggestions, false);
        assert_eq!(
            violations,
            vec![CoverageViolation {
                date: demands[0].date,
                resource: ResourceKind::Nurses,
                kind: ViolationKind::Shortfall,
                level: 19,
                limit: 20,
            }]
        );
    }

    #[test]
    fn test_over_bound_only_when_respected() {
        let hospital = HospitalState::new("H-003").with_max_bound(ResourceKind::Beds, 50);
        let demands = vec![demand(1, 100)];
        let suggestions = HeuristicEstimator::estimate(&demands, &hospital);

        assert!(CoverageChecker::check(&demands, &hospital, &suggestions, false).is_empty());

        let violations = CoverageChecker::check(&demands, &hospital, &suggestions, true);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::OverBound);
        assert_eq!(violations[0].resource, ResourceKind::Beds);
    }

    #[test]
    fn test_length_mismatch() {
        let hospital = HospitalState::new("H-004");
        let demands = vec![demand(1, 10), demand(2, 10)];
        let suggestions = HeuristicEstimator::estimate(&demands[..1], &hospital);

        let violations = CoverageChecker::check(&demands, &hospital, &suggestions, false);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::DateMismatch);
    }
}
