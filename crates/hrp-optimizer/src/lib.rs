//! # HRP Optimizer
//!
//! 整數線性規劃：在覆蓋與容量約束下求最低成本的額外資源配置

pub mod model;
pub mod solver;

// Re-export 主要類型
pub use model::ResourceModel;
pub use solver::ResourceOptimizer;

use std::time::Duration;

use hrp_core::ResourceSuggestion;

/// 求解失敗原因
///
/// 這些都不是使用者可見的錯誤，只會觸發後備估算並記錄日誌。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverFailure {
    #[error("求解逾時（{}ms）", .0.as_millis())]
    Timeout(Duration),

    #[error("目標函數無下界")]
    Unbounded,

    #[error("求解器錯誤: {0}")]
    Backend(String),

    #[error("求解執行緒異常結束")]
    Disconnected,

    #[error("求解結果未通過驗證: {0}")]
    CoverageViolated(String),

    /// 數量超出 f64 可精確表示的整數範圍，求解器無法可靠求解
    #[error("數值 {0} 超出求解器的精確整數範圍")]
    Precision(u64),
}

/// 最佳解
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedPlan {
    /// 每日建議（與需求同順序）
    pub suggestions: Vec<ResourceSuggestion>,

    /// 求解器回報的目標值
    pub objective: f64,
}

/// 求解結果
///
/// 不可行是正常結果，不是錯誤；三種情況都由呼叫端決定是否改用後備估算。
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// 找到最佳解
    Optimal(OptimizedPlan),
    /// 約束互相矛盾
    Infeasible,
    /// 求解失敗
    Failed(SolverFailure),
}

impl SolveOutcome {
    /// 檢查是否可行
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveOutcome::Optimal(_))
    }

    /// 取出建議（非最佳解時為 None）
    pub fn into_suggestions(self) -> Option<Vec<ResourceSuggestion>> {
        match self {
            SolveOutcome::Optimal(plan) => Some(plan.suggestions),
            SolveOutcome::Infeasible | SolveOutcome::Failed(_) => None,
        }
    }

    /// 非最佳解時的原因描述
    pub fn fallback_reason(&self) -> Option<String> {
        match self {
            SolveOutcome::Optimal(_) => None,
            SolveOutcome::Infeasible => Some("infeasible".to_string()),
            SolveOutcome::Failed(failure) => Some(failure.to_string()),
        }
    }
}
