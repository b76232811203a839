//! 規劃請求模型與驗證

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    parse_forecast_date, CostOverrides, CostParams, DailyDemand, Forecast, ForecastPoint,
    HospitalState, HrpError, ResourceKind, Result,
};

/// 請求中的單日預測（未驗證）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDayInput {
    /// ISO-8601 日期字串
    pub date: String,

    pub predicted_admissions: i64,
}

/// 請求中的醫院現況（未驗證）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalInput {
    pub hospital_id: String,
    pub baseline_beds: i64,
    pub baseline_nurses: i64,
    pub baseline_doctors: i64,
    pub baseline_oxygen_units: i64,
    pub baseline_med_packs: i64,
    #[serde(default)]
    pub max_bed_capacity: Option<i64>,
    #[serde(default)]
    pub max_nurses: Option<i64>,
    #[serde(default)]
    pub max_doctors: Option<i64>,
}

/// 規劃請求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub forecast: Vec<ForecastDayInput>,

    pub hospital: HospitalInput,

    /// 參數覆寫（參數名稱 → 數值）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Map<String, Value>>,
}

impl OptimizeRequest {
    /// 從 JSON 解析請求
    ///
    /// 型別不符時錯誤會帶出欄位路徑（如 `forecast[1].predicted_admissions`）。
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let request: Self =
            serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
                let field = e.path().iter().next().is_some().then(|| e.path().to_string());
                HrpError::MalformedRequest {
                    field,
                    reason: e.into_inner().to_string(),
                }
            })?;
        deserializer.end().map_err(|e| HrpError::MalformedRequest {
            field: None,
            reason: e.to_string(),
        })?;
        Ok(request)
    }

    /// 驗證並轉換為規劃輸入
    ///
    /// 任何欄位不合法都會在求解前整筆拒絕。
    pub fn validate(&self) -> Result<PlanInput> {
        let mut points = Vec::with_capacity(self.forecast.len());
        for (index, day) in self.forecast.iter().enumerate() {
            let date = parse_forecast_date(&day.date).ok_or_else(|| HrpError::InvalidDate {
                field: format!("forecast[{index}].date"),
                value: day.date.clone(),
            })?;
            let predicted = non_negative(
                || format!("forecast[{index}].predicted_admissions"),
                day.predicted_admissions,
            )?;
            points.push(ForecastPoint::new(date, predicted));
        }
        let forecast = Forecast::new(points)?;

        let hospital = self.hospital.to_state()?;

        let overrides = match &self.rules {
            Some(rules) => CostOverrides::from_rules(rules)?,
            None => CostOverrides::default(),
        };
        let params = CostParams::default().with_overrides(&overrides);

        PlanInput::new(forecast, hospital, params)
    }
}

impl HospitalInput {
    /// 請求中的基準量
    pub fn baseline(&self, kind: ResourceKind) -> i64 {
        match kind {
            ResourceKind::Beds => self.baseline_beds,
            ResourceKind::Nurses => self.baseline_nurses,
            ResourceKind::Doctors => self.baseline_doctors,
            ResourceKind::OxygenUnits => self.baseline_oxygen_units,
            ResourceKind::MedPacks => self.baseline_med_packs,
        }
    }

    /// 請求中的上限
    pub fn max_bound(&self, kind: ResourceKind) -> Option<i64> {
        match kind {
            ResourceKind::Beds => self.max_bed_capacity,
            ResourceKind::Nurses => self.max_nurses,
            ResourceKind::Doctors => self.max_doctors,
            ResourceKind::OxygenUnits | ResourceKind::MedPacks => None,
        }
    }

    /// 轉換為醫院現況（檢查非負）
    pub fn to_state(&self) -> Result<HospitalState> {
        let mut state = HospitalState::new(self.hospital_id.clone());
        for kind in ResourceKind::ALL {
            let baseline = non_negative(|| kind.baseline_field().into(), self.baseline(kind))?;
            state = state.with_baseline(kind, baseline);

            if let (Some(bound), Some(field)) = (self.max_bound(kind), kind.bound_field()) {
                state = state.with_max_bound(kind, non_negative(|| field.into(), bound)?);
            }
        }
        Ok(state)
    }
}

fn non_negative(field: impl FnOnce() -> String, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| HrpError::NegativeValue {
        field: field(),
        value,
    })
}

/// 已驗證的規劃輸入
///
/// 只能經由 [`PlanInput::new`] 建立，因此持有者可假設內容都已通過驗證，
/// 每日需求也已預先算好。
#[derive(Debug, Clone, PartialEq)]
pub struct PlanInput {
    forecast: Forecast,
    hospital: HospitalState,
    params: CostParams,
    demands: Vec<DailyDemand>,
}

impl PlanInput {
    /// 驗證並建立規劃輸入
    pub fn new(forecast: Forecast, hospital: HospitalState, params: CostParams) -> Result<Self> {
        hospital.validate()?;
        params.validate()?;
        let demands = DailyDemand::from_forecast(&forecast, &params)?;

        Ok(Self {
            forecast,
            hospital,
            params,
            demands,
        })
    }

    pub fn forecast(&self) -> &Forecast {
        &self.forecast
    }

    pub fn hospital(&self) -> &HospitalState {
        &self.hospital
    }

    pub fn params(&self) -> &CostParams {
        &self.params
    }

    /// 每日需求（與預測同順序）
    pub fn demands(&self) -> &[DailyDemand] {
        &self.demands
    }
}
