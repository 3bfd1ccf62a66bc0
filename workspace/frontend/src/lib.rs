use yew::prelude::*;

mod components;
pub mod api_client;
pub mod chart;
pub mod hooks;
pub mod settings;
pub mod theme;
pub mod widgets;

use components::Dashboard;
use theme::GlobalStyle;
use widgets::error::ErrorDisplay;
use widgets::toast::ToastProvider;

#[function_component(App)]
pub fn app() -> Html {
    let settings = settings::get_settings();

    let body = match settings.api() {
        Ok(_) => html! {
            <ToastProvider>
                <Dashboard />
            </ToastProvider>
        },
        Err(e) => {
            log::error!("Refusing to start without a usable backend: {}", e);
            html! {
                <div class="container mx-auto p-4">
                    <ErrorDisplay title={Some("Configuration error".to_string())} message={e.to_string()} />
                </div>
            }
        }
    };

    html! {
        <>
            <GlobalStyle />
            {body}
        </>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Nifty50 Dashboard Starting ===");
    log::info!("Application settings: {:?}", settings);
    match settings.api() {
        Ok(api) => log::debug!("API base URL: {}", api.base_url()),
        Err(e) => log::error!("API configuration invalid: {}", e),
    }
    log::debug!("Debug mode: {}", settings.debug_mode);

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
