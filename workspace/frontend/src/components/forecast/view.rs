use common::Horizon;
use yew::prelude::*;

use super::chart::ForecastChart;
use super::stats::ForecastStats;
use crate::api_client::forecast::get_forecast;
use crate::hooks::use_sequenced_fetch;
use crate::widgets::error::ErrorDisplay;
use crate::widgets::loading::Loading;

#[function_component(ForecastPanel)]
pub fn forecast_panel() -> Html {
    let horizon = use_state(Horizon::default);
    let (store, fetch) = use_sequenced_fetch(get_forecast);

    {
        let fetch = fetch.clone();
        use_effect_with(*horizon, move |horizon| {
            log::info!("Loading {}", horizon);
            fetch.emit(*horizon);
            || ()
        });
    }

    let on_retry = {
        let fetch = fetch.clone();
        let horizon = *horizon;
        Callback::from(move |_| fetch.emit(horizon))
    };

    let toggles = Horizon::ALL.iter().copied().map(|option| {
        let active = option == *horizon;
        let onclick = {
            let horizon = horizon.clone();
            Callback::from(move |_: MouseEvent| {
                if *horizon != option {
                    log::debug!("Switching forecast to {}", option);
                    horizon.set(option);
                }
            })
        };
        html! {
            <button
                class={classes!("btn", "btn-sm", "join-item", active.then_some("btn-primary"))}
                aria-pressed={active.to_string()}
                {onclick}
            >
                {option.label()}
            </button>
        }
    });

    html! {
        <div class="panel">
            <h2 class="panel-title">{"Forecast"}</h2>

            <div class="join mb-2">
                {for toggles}
            </div>

            {if store.is_loading() {
                html! { <Loading text={Some(format!("Loading {}...", *horizon))} /> }
            } else {
                html! {}
            }}

            {if let Some(err) = store.error() {
                html! {
                    <ErrorDisplay
                        title={Some("Could not load forecast".to_string())}
                        message={err.to_string()}
                        on_retry={Some(on_retry)}
                    />
                }
            } else {
                html! {}
            }}

            {match &store.data {
                Some(series) if !series.is_empty() => html! {
                    <>
                        <ForecastChart series={series.clone()} />
                        {if let Some(summary) = series.summary() {
                            html! { <ForecastStats {summary} /> }
                        } else {
                            html! {}
                        }}
                    </>
                },
                Some(_) => html! {
                    <p class="text-sm text-muted py-4">{"No forecast data available."}</p>
                },
                None => html! {},
            }}
        </div>
    }
}
