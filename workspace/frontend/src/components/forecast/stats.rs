use common::format::{format_day, format_price};
use common::ForecastSummary;
use yew::prelude::*;

use crate::settings::get_settings;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub summary: ForecastSummary,
}

#[function_component(ForecastStats)]
pub fn forecast_stats(props: &Props) -> Html {
    let currency = get_settings().currency_code;
    let summary = &props.summary;

    let change = match summary.change {
        Some(change) => {
            let class = if change.value().is_sign_negative() { "text-error" } else { "accent" };
            html! { <span class={class}>{format!("{}%", change)}</span> }
        }
        None => html! { <span class="text-muted">{"N/A"}</span> },
    };

    html! {
        <div class="stats stats-vertical sm:stats-horizontal w-full mt-4">
            <div class="stat">
                <div class="stat-title text-muted">{"Last Close"}</div>
                <div class="stat-value text-lg">{format_price(summary.last_close, &currency)}</div>
            </div>
            <div class="stat">
                <div class="stat-title text-muted">{"Final Projection"}</div>
                <div class="stat-value text-lg">{format_price(summary.final_close, &currency)}</div>
                <div class="stat-desc text-muted">{format_day(summary.final_day)}</div>
            </div>
            <div class="stat">
                <div class="stat-title text-muted">{"Projected Change"}</div>
                <div class="stat-value text-lg">{change}</div>
            </div>
        </div>
    }
}
