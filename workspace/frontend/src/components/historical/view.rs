use chrono::NaiveDate;
use common::{CumulativeReturn, DateRange, HistoricalQuery, PricePoint, RangeIssue};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::chart::HistoricalChart;
use crate::api_client::historical::get_historical;
use crate::hooks::use_sequenced_fetch;
use crate::widgets::error::ErrorDisplay;
use crate::widgets::loading::Loading;
use crate::widgets::toast::ToastContext;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Receives the full record under the cursor on every chart hover
    pub on_hover: Callback<PricePoint>,
}

#[function_component(HistoricalPanel)]
pub fn historical_panel(props: &Props) -> Html {
    let range = use_state(DateRange::default);
    let last_query = use_state(|| None::<HistoricalQuery>);
    let toast_ctx = use_context::<ToastContext>();
    let (store, fetch) = use_sequenced_fetch(get_historical);

    let on_start_change = {
        let range = range.clone();
        Callback::from(move |e: Event| {
            let start = parse_date_input(&e);
            log::debug!("Start date changed to {:?}", start);
            range.set(range.with_start(start));
        })
    };

    let on_end_change = {
        let range = range.clone();
        Callback::from(move |e: Event| {
            let end = parse_date_input(&e);
            log::debug!("End date changed to {:?}", end);
            range.set(range.with_end(end));
        })
    };

    let on_fetch = {
        let range = range.clone();
        let last_query = last_query.clone();
        let fetch = fetch.clone();
        Callback::from(move |_: MouseEvent| match range.query() {
            Ok(query) => {
                log::info!("Fetching historical data for {}", query.query_string());
                last_query.set(Some(query));
                fetch.emit(query);
            }
            Err(RangeIssue::Incomplete) => {
                log::debug!("Fetch ignored, date range incomplete");
            }
            Err(RangeIssue::Inverted) => {
                log::warn!("Fetch ignored, start date after end date");
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_warning("Start date must be on or before the end date".to_string());
                }
            }
        })
    };

    let on_retry = last_query.map(|query| {
        let fetch = fetch.clone();
        Callback::from(move |_| fetch.emit(query))
    });

    let cumulative_return = store.data.as_ref().and_then(CumulativeReturn::of);
    let range_inverted = range.query() == Err(RangeIssue::Inverted);

    html! {
        <div class="panel">
            <h2 class="panel-title">{"Historical Data"}</h2>

            <div class="flex flex-wrap items-end gap-2 mb-2">
                <label class="form-control">
                    <span class="label-text text-muted">{"Start Date"}</span>
                    <input
                        type="date"
                        class="input input-bordered input-sm"
                        value={date_input_value(range.start)}
                        onchange={on_start_change}
                    />
                </label>
                <label class="form-control">
                    <span class="label-text text-muted">{"End Date"}</span>
                    <input
                        type="date"
                        class="input input-bordered input-sm"
                        value={date_input_value(range.end)}
                        onchange={on_end_change}
                    />
                </label>
                <button class="btn btn-primary btn-sm" onclick={on_fetch}>{"Fetch Data"}</button>
            </div>

            {if range_inverted {
                html! { <p class="text-sm text-warning">{"The start date must not be after the end date."}</p> }
            } else {
                html! {}
            }}

            {if store.is_loading() {
                html! { <Loading text={Some("Loading historical data...".to_string())} /> }
            } else {
                html! {}
            }}

            {if let Some(err) = store.error() {
                html! {
                    <ErrorDisplay
                        title={Some("Could not load historical data".to_string())}
                        message={err.to_string()}
                        on_retry={on_retry}
                    />
                }
            } else {
                html! {}
            }}

            {match &store.data {
                Some(series) if !series.is_empty() => html! {
                    <HistoricalChart series={series.clone()} on_hover={props.on_hover.clone()} />
                },
                Some(_) => html! {
                    <p class="text-sm text-muted py-4">{"No data available for the selected range."}</p>
                },
                None => html! {
                    <p class="text-sm text-muted py-4">{"Pick a start and end date, then fetch."}</p>
                },
            }}

            {if let Some(ret) = cumulative_return {
                html! {
                    <h3 class="text-lg mt-4">
                        {"Cumulative Return: "}<span class="accent">{format!("{}%", ret)}</span>
                    </h3>
                }
            } else {
                html! {}
            }}
        </div>
    }
}

fn parse_date_input(e: &Event) -> Option<NaiveDate> {
    let input: HtmlInputElement = e.target_unchecked_into();
    let value = input.value();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|err| log::warn!("Invalid date input '{}': {}", value, err))
        .ok()
}

fn date_input_value(day: Option<NaiveDate>) -> String {
    day.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}
