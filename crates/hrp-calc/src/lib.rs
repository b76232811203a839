//! # HRP Calculation
//!
//! 後備估算、覆蓋檢查與成本計算

pub mod cost;
pub mod coverage;
pub mod heuristic;

// Re-export 主要類型
pub use cost::PlanCost;
pub use coverage::{CoverageChecker, CoverageViolation, ViolationKind};
pub use heuristic::HeuristicEstimator;
