//! 規劃回應模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ResourceSuggestion;

/// 產生建議所使用的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStrategy {
    /// 整數線性規劃求得的最低成本解
    Optimizer,
    /// 逐資源貪婪估算（求解失敗或停用時）
    Heuristic,
}

/// 規劃回應
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
    /// 規劃ID（用於日誌追蹤）
    pub plan_id: Uuid,

    pub hospital_id: String,

    pub strategy: PlanStrategy,

    /// 改用估算法的原因
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,

    /// 所有額外資源的總成本
    pub total_cost: Decimal,

    /// 每日建議（與正規化後的預測同順序）
    pub suggestions: Vec<ResourceSuggestion>,

    /// 可讀的規劃文字，一定存在
    pub plan_text: String,
}

impl OptimizeResponse {
    /// 檢查是否使用了後備估算
    pub fn used_fallback(&self) -> bool {
        self.strategy == PlanStrategy::Heuristic
    }
}
