//! Maps pointer hover events on the historical chart back to price records.

use chrono::NaiveDate;

use crate::price::{ChartSeries, PricePoint, parse_calendar_day};

/// What the chart reports about a hover.
///
/// Chart libraries report either the index of the point under the cursor, the
/// x value of the cursor, or both. The index wins when it is in range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverEvent {
    pub point_index: Option<usize>,
    pub x: Option<String>,
}

impl HoverEvent {
    pub fn at_index(index: usize) -> Self {
        Self {
            point_index: Some(index),
            x: None,
        }
    }

    pub fn at_x(x: impl Into<String>) -> Self {
        Self {
            point_index: None,
            x: Some(x.into()),
        }
    }
}

/// The record a hover selects, cloned out of the series.
pub fn resolve_hover(series: &ChartSeries, event: &HoverEvent) -> Option<PricePoint> {
    if let Some(point) = event.point_index.and_then(|i| series.get(i)) {
        return Some(point.clone());
    }

    let day = parse_calendar_day(event.x.as_deref()?).ok()?;
    nearest_index(series, day).and_then(|i| series.get(i)).cloned()
}

/// Index of the point closest to `day`; ties go to the earlier point.
pub fn nearest_index(series: &ChartSeries, day: NaiveDate) -> Option<usize> {
    series
        .iter()
        .enumerate()
        .min_by_key(|(_, point)| (point.timestamp - day).num_days().abs())
        .map(|(i, _)| i)
}
