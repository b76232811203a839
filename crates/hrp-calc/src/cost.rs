//! 規劃成本計算

use chrono::NaiveDate;
use hrp_core::{CostParams, ResourceKind, ResourceSuggestion};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單日成本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCost {
    pub date: NaiveDate,
    pub cost: Decimal,
}

/// 整份規劃的成本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCost {
    /// 每日成本
    pub daily: Vec<DailyCost>,

    /// 總成本
    pub total: Decimal,
}

impl PlanCost {
    /// 計算成本：Σ 單位成本 × 額外量
    pub fn compute(suggestions: &[ResourceSuggestion], params: &CostParams) -> Self {
        let daily: Vec<DailyCost> = suggestions
            .iter()
            .map(|s| DailyCost {
                date: s.date,
                cost: Self::day_cost(s, params),
            })
            .collect();

        let total = daily
            .iter()
            .fold(Decimal::ZERO, |acc, d| acc.saturating_add(d.cost));

        Self { daily, total }
    }

    /// 單日成本
    pub fn day_cost(suggestion: &ResourceSuggestion, params: &CostParams) -> Decimal {
        ResourceKind::ALL.iter().fold(Decimal::ZERO, |acc, &kind| {
            let line = params
                .unit_cost(kind)
                .saturating_mul(Decimal::from(suggestion.extra(kind)));
            acc.saturating_add(line)
        })
    }
}
