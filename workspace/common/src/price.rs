use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};

/// A single daily record of the index.
///
/// Historical points carry the full OHLC/volume/P-E record; points synthesized
/// for a forecast only carry a date and a projected close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(deserialize_with = "deserialize_calendar_day")]
    pub timestamp: NaiveDate,
    pub close: Decimal,
    #[serde(default)]
    pub open: Option<Decimal>,
    #[serde(default)]
    pub high: Option<Decimal>,
    #[serde(default)]
    pub low: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_volume")]
    pub volume: Option<u64>,
    #[serde(default)]
    pub pe_ratio: Option<Decimal>,
}

impl PricePoint {
    /// A point carrying only a date and a close.
    pub fn new(timestamp: NaiveDate, close: Decimal) -> Self {
        Self {
            timestamp,
            close,
            open: None,
            high: None,
            low: None,
            volume: None,
            pe_ratio: None,
        }
    }

    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Close as a float for plotting; chart libraries only take `f64`.
    pub fn close_f64(&self) -> f64 {
        self.close.to_f64().unwrap_or_default()
    }

    /// ISO calendar day, the format used on the wire and on chart axes.
    pub fn day(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

/// Ordered sequence of price points, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartSeries(Vec<PricePoint>);

impl ChartSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.0.last()
    }

    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.0.iter()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.0
    }

    pub fn days(&self) -> Vec<String> {
        self.0.iter().map(PricePoint::day).collect()
    }

    pub fn closes_f64(&self) -> Vec<f64> {
        self.0.iter().map(PricePoint::close_f64).collect()
    }

    /// Volumes for the bar trace; a missing volume plots as zero.
    pub fn volumes(&self) -> Vec<u64> {
        self.0.iter().map(|p| p.volume.unwrap_or(0)).collect()
    }
}

impl FromIterator<PricePoint> for ChartSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ChartSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Accepts `YYYY-MM-DD` as well as date-times such as `2023-01-02T00:00:00`,
/// keeping only the calendar day.
fn deserialize_calendar_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_day(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn parse_calendar_day(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVolume {
    Integer(u64),
    Float(f64),
}

fn deserialize_volume<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawVolume>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawVolume::Integer(v)) => Ok(Some(v)),
        Some(RawVolume::Float(v)) if v.is_finite() && v >= 0.0 => Ok(Some(v.round() as u64)),
        Some(RawVolume::Float(v)) => Err(serde::de::Error::custom(format!(
            "volume must be a non-negative number, got {}",
            v
        ))),
    }
}
