//! 資源配置的整數線性規劃模型

use good_lp::{
    constraint, microlp, variable, Constraint, Expression, ProblemVariables, ResolutionError,
    Solution, SolverModel, Variable,
};
use hrp_calc::CoverageChecker;
use hrp_core::{CostParams, DailyDemand, HospitalState, ResourceKind, ResourceSuggestion};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::{OptimizedPlan, SolveOutcome, SolverFailure};

/// f64 可精確表示的最大整數（2^53）
const MAX_EXACT: u64 = 1 << 53;

/// 資源配置模型
///
/// 每日五個非負整數變數（依 [`ResourceKind::ALL`] 順序），目標為總成本最小。
/// 各日之間沒有共用約束，整個期間在同一個模型中一次求解。
#[derive(Debug, Clone)]
pub struct ResourceModel {
    demands: Vec<DailyDemand>,
    hospital: HospitalState,
    params: CostParams,
}

impl ResourceModel {
    /// 創建新的模型
    pub fn new(demands: Vec<DailyDemand>, hospital: HospitalState, params: CostParams) -> Self {
        Self {
            demands,
            hospital,
            params,
        }
    }

    /// 決策變數數量
    pub fn variable_count(&self) -> usize {
        self.demands.len() * ResourceKind::ALL.len()
    }

    /// 建立並求解模型
    pub fn solve(&self) -> SolveOutcome {
        if self.demands.is_empty() {
            return SolveOutcome::Optimal(OptimizedPlan {
                suggestions: Vec::new(),
                objective: 0.0,
            });
        }

        if let Some(value) = self.first_inexact_quantity() {
            tracing::debug!("數量 {} 超出精確範圍，不建立 ILP 模型", value);
            return SolveOutcome::Failed(SolverFailure::Precision(value));
        }

        let mut vars = ProblemVariables::new();
        let day_vars: Vec<[Variable; 5]> = self
            .demands
            .iter()
            .map(|_| ResourceKind::ALL.map(|_| vars.add(variable().integer().min(0))))
            .collect();

        let objective: Expression = day_vars
            .iter()
            .flat_map(|day| {
                ResourceKind::ALL
                    .iter()
                    .zip(day.iter())
                    .map(|(&kind, &var)| var * self.unit_cost(kind))
            })
            .sum();

        let constraints: Vec<Constraint> = self
            .demands
            .iter()
            .zip(&day_vars)
            .flat_map(|(demand, day)| self.day_constraints(demand, day))
            .collect();

        tracing::debug!(
            "建立 ILP 模型：{} 天，{} 個變數，{} 條約束，容量上限 {}",
            self.demands.len(),
            self.variable_count(),
            constraints.len(),
            self.hospital.has_bounds()
        );

        let problem = constraints
            .into_iter()
            .fold(vars.minimise(objective).using(microlp), |problem, c| {
                problem.with(c)
            });

        let solution = match problem.solve() {
            Ok(solution) => solution,
            // 沒有上限時補足到需求永遠可行，回報不可行代表數值問題
            Err(ResolutionError::Infeasible) if !self.hospital.has_bounds() => {
                return SolveOutcome::Failed(SolverFailure::Backend(
                    "未設上限的模型被回報為不可行".to_string(),
                ))
            }
            Err(ResolutionError::Infeasible) => return SolveOutcome::Infeasible,
            Err(ResolutionError::Unbounded) => {
                return SolveOutcome::Failed(SolverFailure::Unbounded)
            }
            Err(other) => return SolveOutcome::Failed(SolverFailure::Backend(other.to_string())),
        };

        let mut suggestions = Vec::with_capacity(self.demands.len());
        for (demand, day) in self.demands.iter().zip(&day_vars) {
            let mut suggestion = ResourceSuggestion::new(demand.date, demand.predicted_admissions);
            for (&kind, &var) in ResourceKind::ALL.iter().zip(day.iter()) {
                let value = solution.value(var);
                let Some(quantity) = to_quantity(value) else {
                    return SolveOutcome::Failed(SolverFailure::Backend(format!(
                        "{} {} 的解不是有效的非負整數: {value}",
                        demand.date, kind
                    )));
                };
                suggestion.set_extra(kind, quantity);
            }
            suggestions.push(suggestion);
        }

        // 以精確的 Decimal 需求重新驗證取整後的解
        let violations = CoverageChecker::check(&self.demands, &self.hospital, &suggestions, true);
        if let Some(first) = violations.first() {
            return SolveOutcome::Failed(SolverFailure::CoverageViolated(first.to_string()));
        }

        let objective: f64 = suggestions
            .iter()
            .flat_map(|s| {
                ResourceKind::ALL
                    .iter()
                    .map(move |&kind| s.extra(kind) as f64 * self.unit_cost(kind))
            })
            .sum();

        SolveOutcome::Optimal(OptimizedPlan {
            suggestions,
            objective,
        })
    }

    /// 單日約束（基準量移到右側）
    ///
    /// - 床位、氧氣、藥品包：extra ≥ 需求 - baseline
    /// - 護理師、醫師：extra × ratio ≥ required - baseline × ratio
    /// - 有上限時：extra ≤ 上限 - baseline
    fn day_constraints(&self, demand: &DailyDemand, day: &[Variable; 5]) -> Vec<Constraint> {
        let mut constraints = Vec::with_capacity(8);
        let required = demand.required_total as f64;

        for (&kind, &var) in ResourceKind::ALL.iter().zip(day.iter()) {
            let baseline = self.hospital.baseline(kind) as f64;

            let cover = match kind {
                ResourceKind::Nurses => {
                    let ratio = to_f64(self.params.patients_per_nurse);
                    constraint!(var * ratio >= required - baseline * ratio)
                }
                ResourceKind::Doctors => {
                    let ratio = to_f64(self.params.patients_per_doctor);
                    constraint!(var * ratio >= required - baseline * ratio)
                }
                ResourceKind::Beds => constraint!(var >= required - baseline),
                ResourceKind::OxygenUnits => {
                    constraint!(var >= demand.oxygen_needed as f64 - baseline)
                }
                ResourceKind::MedPacks => {
                    constraint!(var >= demand.med_packs_needed as f64 - baseline)
                }
            };
            constraints.push(cover);

            if let Some(bound) = self.hospital.max_bound(kind) {
                constraints.push(constraint!(var <= bound as f64 - baseline));
            }
        }

        constraints
    }

    /// 第一個超出 [`MAX_EXACT`] 的需求、基準量或上限
    fn first_inexact_quantity(&self) -> Option<u64> {
        let levels = self
            .demands
            .iter()
            .flat_map(|demand| ResourceKind::ALL.map(|kind| demand.minimum_level(kind)));
        let capacities = ResourceKind::ALL.iter().flat_map(|&kind| {
            std::iter::once(self.hospital.baseline(kind)).chain(self.hospital.max_bound(kind))
        });
        levels.chain(capacities).find(|&value| value > MAX_EXACT)
    }

    fn unit_cost(&self, kind: ResourceKind) -> f64 {
        to_f64(self.params.unit_cost(kind))
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// 將求解器回傳的浮點值取整為數量
fn to_quantity(value: f64) -> Option<u64> {
    if !value.is_finite() || value < -0.5 || value >= u64::MAX as f64 {
        return None;
    }
    Some(value.round().max(0.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hrp_calc::HeuristicEstimator;
    use hrp_core::ForecastPoint;

    fn demands(preds: &[u64], params: &CostParams) -> Vec<DailyDemand> {
        preds
            .iter()
            .enumerate()
            .map(|(i, &pred)| {
                let date = NaiveDate::from_ymd_opt(2025, 1, 1 + i as u32).unwrap();
                DailyDemand::compute(&ForecastPoint::new(date, pred), params).unwrap()
            })
            .collect()
    }

    fn solve(preds: &[u64], hospital: HospitalState) -> SolveOutcome {
        let params = CostParams::default();
        ResourceModel::new(demands(preds, &params), hospital, params).solve()
    }

    #[test]
    fn test_scenario_zero_baseline() {
        let outcome = solve(&[100], HospitalState::new("H-001"));

        let SolveOutcome::Optimal(plan) = outcome else {
            panic!("expected optimal, got {outcome:?}");
        };
        let s = plan.suggestions[0];
        assert_eq!(s.extra_beds, 115);
        assert_eq!(s.extra_nurses, 20);
        assert_eq!(s.extra_doctors, 6);
        assert_eq!(s.extra_oxygen_units, 10);
        assert_eq!(s.extra_med_packs, 30);
        assert!((plan.objective - 129_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_matches_heuristic_without_bounds() {
        // 變數彼此獨立，最低成本解就是逐資源補足到需求
        let params = CostParams::default();
        let hospital = HospitalState::new("H-002")
            .with_baseline(ResourceKind::Beds, 60)
            .with_baseline(ResourceKind::Nurses, 9)
            .with_baseline(ResourceKind::OxygenUnits, 3);
        let demands = demands(&[10, 75, 140, 0], &params);

        let expected = HeuristicEstimator::estimate(&demands, &hospital);
        let outcome = ResourceModel::new(demands, hospital, params).solve();

        assert_eq!(outcome.into_suggestions(), Some(expected));
    }

    #[test]
    fn test_infeasible_nurse_bound() {
        // 需要 20 名護理師，上限只有 10
        let hospital = HospitalState::new("H-003").with_max_bound(ResourceKind::Nurses, 10);

        assert_eq!(solve(&[100], hospital), SolveOutcome::Infeasible);
    }

    #[test]
    fn test_bound_that_fits_is_respected() {
        let hospital = HospitalState::new("H-004")
            .with_baseline(ResourceKind::Beds, 100)
            .with_max_bound(ResourceKind::Beds, 120);

        let suggestions = solve(&[100], hospital).into_suggestions().unwrap();
        assert_eq!(suggestions[0].extra_beds, 15);
    }

    #[test]
    fn test_one_infeasible_day_discards_all() {
        let hospital = HospitalState::new("H-005").with_max_bound(ResourceKind::Doctors, 3);

        // 第一天只需 1 名醫師，第三天需要 ceil(230/20) = 12 名
        let outcome = solve(&[10, 40, 200], hospital);
        assert_eq!(outcome, SolveOutcome::Infeasible);
        assert_eq!(outcome.fallback_reason().as_deref(), Some("infeasible"));
    }

    #[test]
    fn test_huge_counts_are_not_reported_infeasible() {
        let outcome = solve(&[9_000_000_000_000_000_000], HospitalState::new("H-006"));

        let SolveOutcome::Failed(SolverFailure::Precision(value)) = outcome else {
            panic!("expected precision failure, got {outcome:?}");
        };
        assert!(value > MAX_EXACT);
        assert_ne!(outcome.fallback_reason().as_deref(), Some("infeasible"));
    }

    #[test]
    fn test_huge_baseline_is_rejected_before_solving() {
        let hospital = HospitalState::new("H-007").with_baseline(ResourceKind::MedPacks, u64::MAX);

        assert_eq!(
            solve(&[10], hospital),
            SolveOutcome::Failed(SolverFailure::Precision(u64::MAX))
        );
    }

    #[test]
    fn test_to_quantity() {
        assert_eq!(to_quantity(19.999_999), Some(20));
        assert_eq!(to_quantity(-1e-9), Some(0));
        assert_eq!(to_quantity(-3.0), None);
        assert_eq!(to_quantity(f64::NAN), None);
    }
}
