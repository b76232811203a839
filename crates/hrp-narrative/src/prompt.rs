//! 文字產生器的提示詞

use hrp_core::ResourceSuggestion;

/// 建立規劃摘要提示詞
///
/// 列出每日預測入院人數與建議的額外資源，要求產生器針對尖峰日給出
/// 人力配置、保留床位、氧氣與藥品包數量，以及一行理由與警示。
pub fn build_prompt(hospital_id: &str, suggestions: &[ResourceSuggestion]) -> String {
    let days: Vec<String> = suggestions
        .iter()
        .map(|s| {
            format!(
                "{}: {} predicted admissions; extra nurses {}, doctors {}, beds {}, oxygen cylinders {}, med packs {}",
                s.date,
                s.predicted_admissions,
                s.extra_nurses,
                s.extra_doctors,
                s.extra_beds,
                s.extra_oxygen_units,
                s.extra_med_packs
            )
        })
        .collect();

    format!(
        "You are an operations advisor for hospitals.\n\
         \n\
         Hospital ID: {hospital_id}\n\
         Forecasted admissions and recommended extra resources:\n\
         {}\n\
         \n\
         For each peak day, produce:\n\
         1) A short staffing plan with numbers (nurses, doctors).\n\
         2) Beds to reserve.\n\
         3) Oxygen cylinders and medicine pack quantities to order.\n\
         4) One-line rationale and critical warnings.\n\
         \n\
         Be concise and use bullet points.\n",
        days.join("\n")
    )
}
