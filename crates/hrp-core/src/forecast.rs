//! 入院預測模型

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{HrpError, Result};

/// 單日入院預測
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 預測日期
    pub date: NaiveDate,

    /// 預測入院人數
    pub predicted_admissions: u64,
}

impl ForecastPoint {
    /// 創建新的預測點
    pub fn new(date: NaiveDate, predicted_admissions: u64) -> Self {
        Self {
            date,
            predicted_admissions,
        }
    }
}

/// 解析預測日期
///
/// 接受 `YYYY-MM-DD`，或 RFC 3339 時間戳（只取日期部分）。
pub fn parse_forecast_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// 正規化後的預測序列
///
/// 保證：至少一筆、依日期升冪排列、日期不重複。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Forecast {
    points: Vec<ForecastPoint>,
}

impl Forecast {
    /// 正規化預測序列
    ///
    /// 重複日期一律拒絕，不做合併。
    pub fn new(points: Vec<ForecastPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(HrpError::EmptyForecast);
        }

        let mut seen: HashMap<NaiveDate, usize> = HashMap::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            if seen.insert(point.date, index).is_some() {
                return Err(HrpError::DuplicateDate {
                    field: format!("forecast[{index}].date"),
                    date: point.date,
                });
            }
        }

        let mut points = points;
        points.sort_by_key(|p| p.date);

        Ok(Self { points })
    }

    /// 所有預測點（已排序）
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastPoint> {
        self.points.iter()
    }

    /// 天數
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 第一天
    pub fn start_date(&self) -> NaiveDate {
        self.points[0].date
    }

    /// 最後一天
    pub fn end_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    /// 尖峰日（同值取最早日期）
    pub fn peak(&self) -> ForecastPoint {
        self.points
            .iter()
            .copied()
            .fold(self.points[0], |peak, p| {
                if p.predicted_admissions > peak.predicted_admissions {
                    p
                } else {
                    peak
                }
            })
    }
}

impl<'a> IntoIterator for &'a Forecast {
    type Item = &'a ForecastPoint;
    type IntoIter = std::slice::Iter<'a, ForecastPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    #[test]
    fn test_forecast_is_sorted() {
        let forecast = Forecast::new(vec![
            ForecastPoint::new(day(3), 30),
            ForecastPoint::new(day(1), 10),
            ForecastPoint::new(day(2), 20),
        ])
        .unwrap();

        let dates: Vec<_> = forecast.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_eq!(forecast.start_date(), day(1));
        assert_eq!(forecast.end_date(), day(3));
    }

    #[test]
    fn test_empty_forecast_rejected() {
        assert_eq!(Forecast::new(vec![]), Err(HrpError::EmptyForecast));
    }

    #[test]
    fn test_duplicate_date_rejected() {
        let err = Forecast::new(vec![
            ForecastPoint::new(day(1), 10),
            ForecastPoint::new(day(2), 20),
            ForecastPoint::new(day(1), 99),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            HrpError::DuplicateDate {
                field: "forecast[2].date".to_string(),
                date: day(1),
            }
        );
    }

    #[test]
    fn test_peak_prefers_earliest_tie() {
        let forecast = Forecast::new(vec![
            ForecastPoint::new(day(2), 50),
            ForecastPoint::new(day(1), 50),
            ForecastPoint::new(day(3), 20),
        ])
        .unwrap();

        assert_eq!(forecast.peak(), ForecastPoint::new(day(1), 50));
    }

    #[rstest]
    #[case("2025-11-30", Some((2025, 11, 30)))]
    #[case(" 2025-01-01 ", Some((2025, 1, 1)))]
    #[case("2025-11-30T08:15:00Z", Some((2025, 11, 30)))]
    #[case("2025-11-30T23:00:00+08:00", Some((2025, 11, 30)))]
    #[case("2025-02-30", None)]
    #[case("30/11/2025", None)]
    #[case("", None)]
    fn test_parse_forecast_date(#[case] raw: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let expected = expected.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert_eq!(parse_forecast_date(raw), expected);
    }
}
