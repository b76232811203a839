//! 規劃器配置

use std::time::Duration;

use hrp_optimizer::ResourceOptimizer;

/// 規劃器配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// ILP 求解時限，超過即改用貪婪估算
    pub solver_timeout: Duration,

    /// 是否使用 ILP 求解器（false 時一律使用貪婪估算）
    pub use_optimizer: bool,

    /// 是否呼叫外部文字產生器（false 時一律輸出純文字）
    pub narrator_enabled: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            solver_timeout: ResourceOptimizer::DEFAULT_TIMEOUT,
            use_optimizer: true,
            narrator_enabled: true,
        }
    }
}

impl PlannerConfig {
    /// 建構器模式：設置求解時限
    pub fn with_solver_timeout(mut self, timeout: Duration) -> Self {
        self.solver_timeout = timeout;
        self
    }

    /// 建構器模式：設置是否使用求解器
    pub fn with_optimizer(mut self, enabled: bool) -> Self {
        self.use_optimizer = enabled;
        self
    }

    /// 建構器模式：設置是否呼叫外部文字產生器
    pub fn with_narrator(mut self, enabled: bool) -> Self {
        self.narrator_enabled = enabled;
        self
    }
}
