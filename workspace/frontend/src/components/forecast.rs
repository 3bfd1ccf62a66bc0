mod chart;
mod stats;
mod view;

pub use view::ForecastPanel;
