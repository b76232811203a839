//! # HRP Core
//!
//! 醫院資源規劃的核心資料模型與類型定義

pub mod demand;
pub mod forecast;
pub mod hospital;
pub mod params;
pub mod request;
pub mod resource;
pub mod response;
pub mod suggestion;

// Re-export 主要類型
pub use demand::DailyDemand;
pub use forecast::{parse_forecast_date, Forecast, ForecastPoint};
pub use hospital::HospitalState;
pub use params::{CostOverrides, CostParams};
pub use request::{ForecastDayInput, HospitalInput, OptimizeRequest, PlanInput};
pub use resource::ResourceKind;
pub use response::{OptimizeResponse, PlanStrategy};
pub use suggestion::ResourceSuggestion;

use chrono::NaiveDate;

/// HRP 錯誤類型
///
/// 只涵蓋驗證錯誤；求解器與文字生成的失敗不屬於錯誤，
/// 由各自的結果類型表示並降級處理。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HrpError {
    #[error("預測序列不可為空")]
    EmptyForecast,

    #[error("無效的日期 {field}: {value:?}")]
    InvalidDate { field: String, value: String },

    #[error("{field} 不可為負數: {value}")]
    NegativeValue { field: String, value: i64 },

    #[error("預測日期重複 {field}: {date}")]
    DuplicateDate { field: String, date: NaiveDate },

    #[error("{field} 上限 {bound} 低於基準量 {baseline}")]
    BoundBelowBaseline {
        field: String,
        bound: u64,
        baseline: u64,
    },

    #[error("無效的參數 {field}: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("未知的規則參數: {0}")]
    UnknownRule(String),

    #[error("數值超出可計算範圍 {field}: {reason}")]
    ValueOutOfRange { field: String, reason: String },

    /// `field` 為 JSON 路徑；語法錯誤等無法定位的情況為 None
    #[error("請求格式錯誤 {}: {reason}", .field.as_deref().unwrap_or("<request>"))]
    MalformedRequest {
        field: Option<String>,
        reason: String,
    },
}

impl HrpError {
    /// 出錯的欄位路徑（如 `forecast[2].date`）
    pub fn field(&self) -> Option<&str> {
        match self {
            HrpError::EmptyForecast => Some("forecast"),
            HrpError::InvalidDate { field, .. }
            | HrpError::NegativeValue { field, .. }
            | HrpError::DuplicateDate { field, .. }
            | HrpError::BoundBelowBaseline { field, .. }
            | HrpError::InvalidParameter { field, .. }
            | HrpError::ValueOutOfRange { field, .. } => Some(field),
            HrpError::UnknownRule(_) => Some("rules"),
            HrpError::MalformedRequest { field, .. } => field.as_deref(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HrpError>;
