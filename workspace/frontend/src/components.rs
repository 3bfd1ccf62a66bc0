mod dashboard;
mod detail;
mod forecast;
mod historical;

pub use dashboard::Dashboard;
