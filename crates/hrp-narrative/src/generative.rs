//! 以外部文字產生服務撰寫規劃摘要

use hrp_core::ResourceSuggestion;

use crate::{build_prompt, NarratorError, PlanNarrator};

/// 外部文字產生服務（例如 LLM 用戶端）
///
/// 本 crate 不綁定任何服務；呼叫端注入實作。
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, NarratorError>;
}

/// 透過 [`TextGenerator`] 產生規劃文字
pub struct GenerativeNarrator<G> {
    generator: G,
}

impl<G: TextGenerator> GenerativeNarrator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

impl<G: TextGenerator> PlanNarrator for GenerativeNarrator<G> {
    fn narrate(
        &self,
        hospital_id: &str,
        suggestions: &[ResourceSuggestion],
    ) -> Result<String, NarratorError> {
        let prompt = build_prompt(hospital_id, suggestions);
        tracing::debug!("送出規劃摘要提示詞：{} 字元", prompt.len());

        let text = self.generator.generate(&prompt)?;
        if text.trim().is_empty() {
            return Err(NarratorError::EmptyResponse);
        }
        Ok(text)
    }
}
