//! Target-independent model of the dashboard: price records as the backend
//! sends them, the series shaping behind each chart, and the per-panel state
//! the frontend renders from.
//!
//! Nothing here touches the browser, so the whole crate is tested on the host.

pub mod config;
pub mod error;
pub mod forecast;
pub mod format;
pub mod historical;
pub mod hover;
pub mod price;
pub mod request;

pub use config::ApiConfig;
pub use error::{ConfigError, FetchError, ShapeError};
pub use forecast::{ForecastPayload, ForecastSeries, ForecastSummary, Horizon, ProjectedPoint};
pub use historical::{CumulativeReturn, DateRange, HistoricalQuery, RangeIssue};
pub use hover::{HoverEvent, resolve_hover};
pub use price::{ChartSeries, PricePoint};
pub use request::{PanelState, PanelStatus, RequestSequence, RequestTicket, Resolution};
