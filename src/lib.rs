//! # HRP
//!
//! 醫院資源規劃入口：驗證請求 → 整數規劃求解 → 失敗時貪婪估算 → 產生規劃文字

pub mod config;

pub use config::PlannerConfig;

pub use hrp_calc::{CoverageChecker, HeuristicEstimator, PlanCost};
pub use hrp_core::{
    CostOverrides, CostParams, DailyDemand, Forecast, ForecastPoint, HospitalState, HrpError,
    OptimizeRequest, OptimizeResponse, PlanInput, PlanStrategy, ResourceKind, ResourceSuggestion,
};
pub use hrp_narrative::{
    GenerativeNarrator, Narration, NarratorError, PlainTextNarrator, PlanNarrator, TextGenerator,
};
pub use hrp_optimizer::{ResourceOptimizer, SolveOutcome, SolverFailure};

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use uuid::Uuid;

/// 每日建議與其來源
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub suggestions: Vec<ResourceSuggestion>,
    pub strategy: PlanStrategy,
    /// 改用估算法的原因
    pub fallback_reason: Option<String>,
}

/// 資源規劃器
///
/// 不持有任何跨請求的可變狀態，可在多個執行緒間共用並同時處理請求。
pub struct Planner {
    config: PlannerConfig,
    optimizer: ResourceOptimizer,
    narrator: Option<Arc<dyn PlanNarrator>>,
}

impl Planner {
    /// 創建新的規劃器（不含外部文字產生器）
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            optimizer: ResourceOptimizer::new(config.solver_timeout),
            config,
            narrator: None,
        }
    }

    /// 建構器模式：注入文字產生器
    pub fn with_narrator(mut self, narrator: Arc<dyn PlanNarrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// 規劃器配置
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 從 JSON 請求規劃
    pub fn plan_json(&self, raw: &str) -> hrp_core::Result<OptimizeResponse> {
        let request = OptimizeRequest::from_json(raw)?;
        self.plan(&request)
    }

    /// 驗證請求並規劃
    ///
    /// 只有驗證錯誤會回傳 `Err`；求解或文字產生失敗都會降級處理。
    pub fn plan(&self, request: &OptimizeRequest) -> hrp_core::Result<OptimizeResponse> {
        let input = request.validate().inspect_err(|e| {
            tracing::info!("醫院 {} 請求驗證失敗: {}", request.hospital.hospital_id, e);
        })?;
        Ok(self.plan_input(&input))
    }

    /// 批次規劃（各請求彼此獨立，平行處理，結果與輸入同順序）
    pub fn plan_batch(
        &self,
        requests: &[OptimizeRequest],
    ) -> Vec<hrp_core::Result<OptimizeResponse>> {
        tracing::info!("開始批次規劃：{} 筆請求", requests.len());
        requests.par_iter().map(|request| self.plan(request)).collect()
    }

    /// 以已驗證的輸入規劃
    pub fn plan_input(&self, input: &PlanInput) -> OptimizeResponse {
        let plan_id = Uuid::new_v4();
        let hospital_id = input.hospital().hospital_id.clone();
        let span = tracing::info_span!("plan", %plan_id, hospital = %hospital_id);
        let _guard = span.enter();

        let peak = input.forecast().peak();
        tracing::info!(
            "開始資源規劃：{} 天（{} ~ {}），尖峰 {} 人於 {}",
            input.forecast().len(),
            input.forecast().start_date(),
            input.forecast().end_date(),
            peak.predicted_admissions,
            peak.date
        );
        let start_time = Instant::now();

        let allocation = self.allocate(input);

        let cost = PlanCost::compute(&allocation.suggestions, input.params());

        let narrator = if self.config.narrator_enabled {
            self.narrator.as_deref()
        } else {
            None
        };
        let narration = Narration::produce(narrator, &hospital_id, &allocation.suggestions);

        tracing::info!(
            "資源規劃完成，策略 {:?}，總成本 {}，耗時 {:?}",
            allocation.strategy,
            cost.total,
            start_time.elapsed()
        );

        OptimizeResponse {
            plan_id,
            hospital_id,
            strategy: allocation.strategy,
            fallback_reason: allocation.fallback_reason,
            total_cost: cost.total,
            suggestions: allocation.suggestions,
            plan_text: narration.into_text(),
        }
    }

    /// 先嘗試整數規劃，失敗或不可行時改用貪婪估算
    pub fn allocate(&self, input: &PlanInput) -> Allocation {
        if !self.config.use_optimizer {
            tracing::debug!("求解器已停用，直接使用貪婪估算");
            return Self::heuristic(input, Some("optimizer disabled".to_string()));
        }

        let outcome = self
            .optimizer
            .optimize(input.demands(), input.hospital(), input.params());

        match outcome {
            SolveOutcome::Optimal(plan) => {
                tracing::debug!("ILP 最佳解，目標值 {}", plan.objective);
                Allocation {
                    suggestions: plan.suggestions,
                    strategy: PlanStrategy::Optimizer,
                    fallback_reason: None,
                }
            }
            other => {
                let reason = other.fallback_reason();
                tracing::warn!(
                    "ILP 未取得最佳解，改用貪婪估算: {}",
                    reason.as_deref().unwrap_or("unknown")
                );
                Self::heuristic(input, reason)
            }
        }
    }

    fn heuristic(input: &PlanInput, reason: Option<String>) -> Allocation {
        Allocation {
            suggestions: HeuristicEstimator::estimate(input.demands(), input.hospital()),
            strategy: PlanStrategy::Heuristic,
            fallback_reason: reason,
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
