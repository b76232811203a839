//! 純文字規劃摘要

use hrp_core::ResourceSuggestion;

use crate::{NarratorError, PlanNarrator};

/// 產生固定格式的純文字摘要
///
/// ```text
/// Hospital H-001 - Resource Plan Summary:
/// 2025-01-01: +20 nurses, +6 doctors, +115 beds, +10 oxygen, +30 med packs (predicted 100)
/// ```
pub fn render_plain_text(hospital_id: &str, suggestions: &[ResourceSuggestion]) -> String {
    let mut lines = Vec::with_capacity(suggestions.len() + 1);
    lines.push(format!("Hospital {hospital_id} - Resource Plan Summary:"));

    for s in suggestions {
        lines.push(format!(
            "{}: +{} nurses, +{} doctors, +{} beds, +{} oxygen, +{} med packs (predicted {})",
            s.date,
            s.extra_nurses,
            s.extra_doctors,
            s.extra_beds,
            s.extra_oxygen_units,
            s.extra_med_packs,
            s.predicted_admissions
        ));
    }

    lines.join("\n")
}

/// 純文字產生器（永不失敗）
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextNarrator;

impl PlanNarrator for PlainTextNarrator {
    fn narrate(
        &self,
        hospital_id: &str,
        suggestions: &[ResourceSuggestion],
    ) -> Result<String, NarratorError> {
        Ok(render_plain_text(hospital_id, suggestions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hrp_core::ResourceKind;

    #[test]
    fn test_render_plain_text() {
        let suggestions = vec![
            ResourceSuggestion::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 100)
                .with_extra(ResourceKind::Beds, 115)
                .with_extra(ResourceKind::Nurses, 20)
                .with_extra(ResourceKind::Doctors, 6)
                .with_extra(ResourceKind::OxygenUnits, 10)
                .with_extra(ResourceKind::MedPacks, 30),
            ResourceSuggestion::new(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), 0),
        ];

        let text = render_plain_text("H-001", &suggestions);

        assert_eq!(
            text,
            "Hospital H-001 - Resource Plan Summary:\n\
             2025-01-01: +20 nurses, +6 doctors, +115 beds, +10 oxygen, +30 med packs (predicted 100)\n\
             2025-01-02: +0 nurses, +0 doctors, +0 beds, +0 oxygen, +0 med packs (predicted 0)"
        );
    }

    #[test]
    fn test_plain_narrator_never_fails() {
        let text = PlainTextNarrator.narrate("H-002", &[]).unwrap();
        assert_eq!(text, "Hospital H-002 - Resource Plan Summary:");
    }
}
