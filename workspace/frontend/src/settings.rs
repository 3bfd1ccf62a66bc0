use common::format::DEFAULT_CURRENCY;
use common::{ApiConfig, ConfigError};
use log::Level;
use web_sys::window;

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend location, or why none is usable
    pub api: Result<ApiConfig, ConfigError>,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,

    /// ISO code of the currency prices are quoted in
    pub currency_code: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api: ApiConfig::resolve([option_env!("NIFTY_API_BASE_URL")]),
            log_level: Level::Info,
            debug_mode: false,
            toast_duration_ms: 5000,
            currency_code: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl AppSettings {
    /// Create settings from the build environment, window location and
    /// localStorage overrides.
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

            // In development, use more verbose logging
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            let item = |key: &str| storage.get_item(key).ok().flatten();

            let base_url_override = item("nifty_api_base_url");
            settings.api = ApiConfig::resolve([
                base_url_override.as_deref(),
                option_env!("NIFTY_API_BASE_URL"),
            ]);

            if let Some(level) = item("nifty_log_level").as_deref().and_then(parse_log_level) {
                settings.log_level = level;
            }

            if let Some(duration) = item("nifty_toast_duration_ms").and_then(|v| v.parse().ok()) {
                settings.toast_duration_ms = duration;
            }

            if let Some(currency) = item("nifty_currency") {
                settings.currency_code = currency.trim().to_uppercase();
            }
        }

        settings
    }

    /// Backend configuration, failing if none was provided.
    pub fn api(&self) -> Result<&ApiConfig, ConfigError> {
        self.api.as_ref().map_err(Clone::clone)
    }
}

fn parse_log_level(raw: &str) -> Option<Level> {
    match raw.trim().to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
