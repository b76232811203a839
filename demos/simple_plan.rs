//! 簡單規劃範例：一週入院預測，部分資源設有上限

use chrono::NaiveDate;
use hrp::{CostParams, Forecast, ForecastPoint, HospitalState, PlanInput, Planner, ResourceKind};

fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let start = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();
    let admissions = [82, 95, 120, 160, 140, 110, 90];
    let points = admissions
        .iter()
        .enumerate()
        .map(|(i, &pred)| ForecastPoint::new(start + chrono::Days::new(i as u64), pred))
        .collect();

    let hospital = HospitalState::new("CITY-GENERAL")
        .with_baseline(ResourceKind::Beds, 120)
        .with_baseline(ResourceKind::Nurses, 18)
        .with_baseline(ResourceKind::Doctors, 5)
        .with_baseline(ResourceKind::OxygenUnits, 8)
        .with_baseline(ResourceKind::MedPacks, 30)
        .with_max_bound(ResourceKind::Beds, 200)
        .with_max_bound(ResourceKind::Nurses, 40);

    let input = PlanInput::new(
        Forecast::new(points).unwrap(),
        hospital,
        CostParams::default(),
    )
    .unwrap();

    let response = Planner::default().plan_input(&input);

    println!("策略: {:?}", response.strategy);
    println!("總成本: {}", response.total_cost);
    println!("{}", response.plan_text);
}
