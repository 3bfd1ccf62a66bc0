//! Historical range queries and the cumulative return derived from them.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::price::ChartSeries;

/// Path of the historical endpoint, relative to the backend base URL.
pub const HISTORICAL_ENDPOINT: &str = "/api/historical";

/// User-edited date range of the historical panel. Either bound may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Why a [`DateRange`] cannot be queried yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeIssue {
    /// One or both bounds are unset; the fetch action is a silent no-op
    Incomplete,
    /// Both bounds are set but the start lies after the end
    Inverted,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn with_start(self, start: Option<NaiveDate>) -> Self {
        Self { start, ..self }
    }

    pub fn with_end(self, end: Option<NaiveDate>) -> Self {
        Self { end, ..self }
    }

    /// Validated query for this range, or the reason no request may be sent.
    pub fn query(&self) -> Result<HistoricalQuery, RangeIssue> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start <= end => Ok(HistoricalQuery { start, end }),
            (Some(_), Some(_)) => Err(RangeIssue::Inverted),
            _ => Err(RangeIssue::Incomplete),
        }
    }
}

/// A fully specified, inclusive historical range request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HistoricalQuery {
    /// `start=YYYY-MM-DD&end=YYYY-MM-DD`
    pub fn query_string(&self) -> String {
        format!(
            "start={}&end={}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }

    /// Endpoint path including the query string.
    pub fn endpoint(&self) -> String {
        format!("{}?{}", HISTORICAL_ENDPOINT, self.query_string())
    }
}

/// Percentage change between the first and last close of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulativeReturn(Decimal);

impl CumulativeReturn {
    /// `(last - first) / first * 100`, or `None` when the series is empty or
    /// starts at zero.
    pub fn of(series: &ChartSeries) -> Option<Self> {
        let first = series.first()?.close;
        let last = series.last()?.close;
        Self::between(first, last)
    }

    /// Return from `from` to `to`, `None` when `from` is zero or the
    /// result overflows.
    pub fn between(from: Decimal, to: Decimal) -> Option<Self> {
        let ratio = to.checked_sub(from)?.checked_div(from)?;
        ratio.checked_mul(Decimal::ONE_HUNDRED).map(Self)
    }

    /// Unrounded percentage.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Percentage rounded half away from zero to two places.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for CumulativeReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}
