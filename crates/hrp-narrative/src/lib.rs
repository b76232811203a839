//! # HRP Narrative
//!
//! 規劃文字產生的外部協作邊界。外部文字產生器失敗時，
//! 一律改用由建議清單直接產生的純文字，規劃結果永遠可交付。

pub mod generative;
pub mod plain;
pub mod prompt;

// Re-export 主要類型
pub use generative::{GenerativeNarrator, TextGenerator};
pub use plain::{render_plain_text, PlainTextNarrator};
pub use prompt::build_prompt;

use hrp_core::ResourceSuggestion;

/// 文字產生失敗原因
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NarratorError {
    #[error("文字產生服務無法使用: {0}")]
    Unavailable(String),

    #[error("文字產生失敗: {0}")]
    Generation(String),

    #[error("文字產生服務回傳空白內容")]
    EmptyResponse,
}

/// 規劃文字產生器
///
/// 於程序啟動時建立一次，注入每次規劃呼叫；實作必須可跨執行緒共用。
pub trait PlanNarrator: Send + Sync {
    /// 將每日建議轉為可讀文字
    fn narrate(
        &self,
        hospital_id: &str,
        suggestions: &[ResourceSuggestion],
    ) -> Result<String, NarratorError>;
}

/// 文字產生結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narration {
    /// 外部產生器成功
    Generated(String),
    /// 改用純文字（附失敗原因）
    Fallback { text: String, error: NarratorError },
    /// 未設定產生器，直接使用純文字
    Plain(String),
}

impl Narration {
    /// 產生文字，失敗時改用純文字
    pub fn produce(
        narrator: Option<&dyn PlanNarrator>,
        hospital_id: &str,
        suggestions: &[ResourceSuggestion],
    ) -> Self {
        let Some(narrator) = narrator else {
            return Narration::Plain(render_plain_text(hospital_id, suggestions));
        };

        match narrator.narrate(hospital_id, suggestions) {
            Ok(text) => Narration::Generated(text),
            Err(error) => {
                tracing::warn!("醫院 {} 規劃文字產生失敗，改用純文字: {}", hospital_id, error);
                Narration::Fallback {
                    text: render_plain_text(hospital_id, suggestions),
                    error,
                }
            }
        }
    }

    /// 文字內容
    pub fn text(&self) -> &str {
        match self {
            Narration::Generated(text) | Narration::Plain(text) => text,
            Narration::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Narration::Generated(text) | Narration::Plain(text) => text,
            Narration::Fallback { text, .. } => text,
        }
    }

    /// 檢查是否因失敗而改用純文字
    pub fn is_fallback(&self) -> bool {
        matches!(self, Narration::Fallback { .. })
    }
}
