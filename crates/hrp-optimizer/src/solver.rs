//! 有時限的求解執行

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use hrp_core::{CostParams, DailyDemand, HospitalState};

use crate::{ResourceModel, SolveOutcome, SolverFailure};

/// 資源優化器
///
/// 每次求解在獨立執行緒中進行，超過時限即視為求解失敗。
/// 逾時的執行緒不會被中斷，結果直接丟棄；也不會重試。
#[derive(Debug, Clone)]
pub struct ResourceOptimizer {
    timeout: Duration,
}

impl ResourceOptimizer {
    /// 預設求解時限
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// 創建新的優化器
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// 求解時限
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 求解整個規劃期間
    pub fn optimize(
        &self,
        demands: &[DailyDemand],
        hospital: &HospitalState,
        params: &CostParams,
    ) -> SolveOutcome {
        let model = ResourceModel::new(demands.to_vec(), hospital.clone(), params.clone());

        let start_time = Instant::now();
        let outcome = self.run_bounded(move || model.solve());

        tracing::debug!(
            "ILP 求解結束：{} 天，耗時 {:?}，最佳解 {}",
            demands.len(),
            start_time.elapsed(),
            outcome.is_optimal()
        );

        outcome
    }

    /// 在時限內執行求解工作
    fn run_bounded<F>(&self, job: F) -> SolveOutcome
    where
        F: FnOnce() -> SolveOutcome + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("hrp-ilp".to_string())
            .spawn(move || {
                // 逾時後接收端已釋放，送出失敗可忽略
                let _ = tx.send(job());
            });
        if let Err(e) = spawned {
            return SolveOutcome::Failed(SolverFailure::Backend(format!("無法啟動求解執行緒: {e}")));
        }

        match rx.recv_timeout(self.timeout) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => SolveOutcome::Failed(SolverFailure::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => SolveOutcome::Failed(SolverFailure::Disconnected),
        }
    }
}

impl Default for ResourceOptimizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}
