//! Forecast horizons and the shaping of forecast payloads into one continuous,
//! partitioned series.

use std::fmt;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::ShapeError;
use crate::historical::CumulativeReturn;
use crate::price::PricePoint;

/// Forecast window offered by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Horizon {
    #[default]
    SevenDay,
    OneDay,
}

impl Horizon {
    pub const ALL: [Horizon; 2] = [Horizon::SevenDay, Horizon::OneDay];

    /// Endpoint path for this horizon, relative to the backend base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Horizon::SevenDay => "/api/forecast_7day",
            Horizon::OneDay => "/api/forecast_1day",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Horizon::SevenDay => "7-Day Forecast",
            Horizon::OneDay => "1-Day Forecast",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body returned by the forecast endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub historical_data: Vec<PricePoint>,
    #[serde(deserialize_with = "deserialize_forecast_values")]
    pub forecast: Vec<Decimal>,
}

/// The model emits each value either bare or wrapped in a one-element array.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawForecastValue {
    Bare(Decimal),
    Wrapped(Vec<Decimal>),
}

fn deserialize_forecast_values<'de, D>(deserializer: D) -> Result<Vec<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<RawForecastValue>::deserialize(deserializer)?
        .into_iter()
        .enumerate()
        .map(|(i, raw)| match raw {
            RawForecastValue::Bare(value) => Ok(value),
            RawForecastValue::Wrapped(values) => match values.as_slice() {
                [value] => Ok(*value),
                _ => Err(serde::de::Error::custom(format!(
                    "forecast value {} must hold exactly one number, got {}",
                    i,
                    values.len()
                ))),
            },
        })
        .collect()
}

/// A point of a forecast chart, tagged with whether its close is a model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedPoint {
    pub point: PricePoint,
    pub is_projected: bool,
}

/// Historical tail followed by projected points.
///
/// Built only through [`ForecastSeries::from_payload`], which guarantees that
/// `is_projected` is false on a prefix and true on the remaining suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastSeries {
    points: Vec<ProjectedPoint>,
    last_historical: Option<usize>,
}

impl ForecastSeries {
    /// Merges the historical tail with the raw forecast values.
    ///
    /// Forecast value `i` is dated `anchor + (i + 1)` days, where the anchor is
    /// the last historical day, whatever the spacing of the historical data.
    pub fn from_payload(payload: ForecastPayload) -> Result<Self, ShapeError> {
        let ForecastPayload {
            historical_data,
            forecast,
        } = payload;

        let anchor = match historical_data.last() {
            Some(point) => Some(point.timestamp),
            None if forecast.is_empty() => None,
            None => {
                return Err(ShapeError::MissingAnchor {
                    forecast_len: forecast.len(),
                });
            }
        };

        let mut points: Vec<ProjectedPoint> = historical_data
            .into_iter()
            .map(|item| ProjectedPoint {
                point: PricePoint::new(item.timestamp, item.close),
                is_projected: false,
            })
            .collect();
        let last_historical = points.len().checked_sub(1);

        if let Some(anchor) = anchor {
            for (i, close) in forecast.into_iter().enumerate() {
                points.push(ProjectedPoint {
                    point: PricePoint::new(projected_day(anchor, i), close),
                    is_projected: true,
                });
            }
        }

        debug!(
            total = points.len(),
            last_historical = ?last_historical,
            "Shaped forecast series"
        );

        Ok(Self {
            points,
            last_historical,
        })
    }

    pub fn points(&self) -> &[ProjectedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the last observed point, `None` when there is no history.
    pub fn last_historical_index(&self) -> Option<usize> {
        self.last_historical
    }

    /// Index of the first projected point, i.e. the historical/projected boundary.
    pub fn boundary(&self) -> usize {
        self.last_historical.map_or(0, |i| i + 1)
    }

    pub fn last_historical(&self) -> Option<&PricePoint> {
        self.last_historical
            .and_then(|i| self.points.get(i))
            .map(|p| &p.point)
    }

    pub fn projected(&self) -> &[ProjectedPoint] {
        &self.points[self.boundary()..]
    }

    /// Inclusive index range of the shaded forecast band, `None` when nothing
    /// is projected.
    pub fn projected_band(&self) -> Option<(usize, usize)> {
        let start = self.boundary();
        let end = self.points.len().checked_sub(1)?;
        (start <= end).then_some((start, end))
    }

    /// Days at the edges of the shaded band.
    pub fn projected_band_days(&self) -> Option<(String, String)> {
        let (start, end) = self.projected_band()?;
        Some((self.points[start].point.day(), self.points[end].point.day()))
    }

    /// Price axis range: floor of the lowest close to ceiling of the highest,
    /// `(0, 0)` for an empty series.
    pub fn axis_bounds(&self) -> (i64, i64) {
        let min = self.points.iter().map(|p| p.point.close).min();
        let max = self.points.iter().map(|p| p.point.close).max();
        match (min, max) {
            (Some(min), Some(max)) => (
                min.floor().to_i64().unwrap_or_default(),
                max.ceil().to_i64().unwrap_or_default(),
            ),
            _ => (0, 0),
        }
    }

    pub fn days(&self) -> Vec<String> {
        self.points.iter().map(|p| p.point.day()).collect()
    }

    pub fn closes_f64(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.point.close_f64()).collect()
    }

    /// Summary figures for the stats strip.
    pub fn summary(&self) -> Option<ForecastSummary> {
        let last_close = self.last_historical()?.close;
        let final_projection = self.projected().last()?;
        Some(ForecastSummary {
            last_close,
            final_close: final_projection.point.close,
            final_day: final_projection.point.timestamp,
            change: CumulativeReturn::between(last_close, final_projection.point.close),
        })
    }
}

/// Last observed close versus the final projected close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastSummary {
    pub last_close: Decimal,
    pub final_close: Decimal,
    pub final_day: NaiveDate,
    pub change: Option<CumulativeReturn>,
}

fn projected_day(anchor: NaiveDate, index: usize) -> NaiveDate {
    let offset = Days::new(index as u64 + 1);
    anchor.checked_add_days(offset).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payload(json: &str) -> ForecastPayload {
        serde_json::from_str(json).expect("Should parse payload")
    }

    fn assert_partitioned(series: &ForecastSeries) {
        let k = series
            .points()
            .iter()
            .position(|p| p.is_projected)
            .unwrap_or(series.len());
        assert!(series.points()[..k].iter().all(|p| !p.is_projected));
        assert!(series.points()[k..].iter().all(|p| p.is_projected));
        assert_eq!(k, series.boundary());
    }

    #[test]
    fn test_forecast_values_may_be_wrapped_in_arrays() {
        let payload = payload(
            r#"{
                "historical_data": [{"timestamp": "2023-06-01", "close": 50.0}],
                "forecast": [[51.0], 52.0, [52.5]]
            }"#,
        );
        assert_eq!(
            payload.forecast,
            vec![Decimal::new(51, 0), Decimal::new(52, 0), Decimal::new(525, 1)]
        );

        let series = ForecastSeries::from_payload(payload).unwrap();
        assert_eq!(series.projected().len(), 3);
        assert_eq!(series.points()[1].point.timestamp, day(2023, 6, 2));
    }

    #[test]
    fn test_forecast_value_arrays_must_hold_one_number() {
        let err = serde_json::from_str::<ForecastPayload>(
            r#"{"historical_data": [], "forecast": [[51.0, 52.0]]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exactly one number"));
    }

    #[test]
    fn test_horizon_endpoints() {
        assert_eq!(Horizon::default(), Horizon::SevenDay);
        assert_eq!(Horizon::SevenDay.endpoint(), "/api/forecast_7day");
        assert_eq!(Horizon::OneDay.endpoint(), "/api/forecast_1day");
        assert_eq!(Horizon::ALL.len(), 2);
    }

    #[test]
    fn test_single_history_two_forecasts() {
        let series = ForecastSeries::from_payload(payload(
            r#"{"historical_data": [{"timestamp": "2023-06-01", "close": 50}], "forecast": [51, 52]}"#,
        ))
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.days(), vec!["2023-06-01", "2023-06-02", "2023-06-03"]);
        let flags: Vec<bool> = series.points().iter().map(|p| p.is_projected).collect();
        assert_eq!(flags, vec![false, true, true]);
        assert_eq!(series.points()[1].point.close, Decimal::new(51, 0));
        assert_eq!(series.points()[2].point.close, Decimal::new(52, 0));
        assert_eq!(series.last_historical_index(), Some(0));
        assert_eq!(series.projected_band(), Some((1, 2)));
        assert_eq!(
            series.projected_band_days(),
            Some(("2023-06-02".to_string(), "2023-06-03".to_string()))
        );
        assert_partitioned(&series);
    }

    #[test]
    fn test_forecast_dates_follow_anchor_daily() {
        let forecast: Vec<Decimal> = (0..7).map(|i| Decimal::new(100 + i, 0)).collect();
        let payload = ForecastPayload {
            historical_data: vec![
                PricePoint::new(day(2024, 2, 20), Decimal::new(90, 0)),
                PricePoint::new(day(2024, 2, 27), Decimal::new(95, 0)),
            ],
            forecast,
        };

        let series = ForecastSeries::from_payload(payload).unwrap();

        let anchor = day(2024, 2, 27);
        for (i, projected) in series.projected().iter().enumerate() {
            assert_eq!(
                projected.point.timestamp,
                anchor + chrono::Duration::days(i as i64 + 1)
            );
        }
        // Weekly history still projects daily, across the leap day
        assert_eq!(series.projected()[1].point.timestamp, day(2024, 2, 29));
        assert_eq!(series.projected()[6].point.timestamp, day(2024, 3, 5));
        assert_partitioned(&series);
    }

    #[test]
    fn test_historical_points_keep_only_date_and_close() {
        let series = ForecastSeries::from_payload(payload(
            r#"{"historical_data": [{"timestamp": "2023-06-01T00:00:00", "close": 50, "open": 49, "volume": 10}], "forecast": []}"#,
        ))
        .unwrap();

        assert_eq!(
            series.points()[0].point,
            PricePoint::new(day(2023, 6, 1), Decimal::new(50, 0))
        );
        assert_eq!(series.projected_band(), None);
        assert_partitioned(&series);
    }

    #[test]
    fn test_empty_payload_is_empty_series() {
        let series = ForecastSeries::from_payload(payload(
            r#"{"historical_data": [], "forecast": []}"#,
        ))
        .unwrap();

        assert!(series.is_empty());
        assert_eq!(series.axis_bounds(), (0, 0));
        assert_eq!(series.projected_band(), None);
        assert_eq!(series.last_historical_index(), None);
        assert_eq!(series.summary(), None);
    }

    #[test]
    fn test_forecast_without_history_is_rejected() {
        let result = ForecastSeries::from_payload(payload(
            r#"{"historical_data": [], "forecast": [1.5, 2.5]}"#,
        ));
        assert_eq!(result, Err(ShapeError::MissingAnchor { forecast_len: 2 }));
    }

    #[test]
    fn test_axis_bounds_floor_and_ceil() {
        let series = ForecastSeries::from_payload(payload(
            r#"{"historical_data": [{"timestamp": "2023-06-01", "close": 50.4}, {"timestamp": "2023-06-02", "close": 49.6}], "forecast": [53.2]}"#,
        ))
        .unwrap();

        assert_eq!(series.axis_bounds(), (49, 54));
    }

    #[test]
    fn test_summary_compares_last_close_with_final_projection() {
        let series = ForecastSeries::from_payload(payload(
            r#"{"historical_data": [{"timestamp": "2023-06-01", "close": 50}], "forecast": [51, 55]}"#,
        ))
        .unwrap();

        let summary = series.summary().expect("History and forecast present");
        assert_eq!(summary.last_close, Decimal::new(50, 0));
        assert_eq!(summary.final_close, Decimal::new(55, 0));
        assert_eq!(summary.final_day, day(2023, 6, 3));
        assert_eq!(summary.change.map(|c| c.to_string()), Some("10.00".to_string()));
    }
}
