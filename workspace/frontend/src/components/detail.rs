use common::format::{format_day, format_optional_price, format_price, format_ratio, format_volume};
use common::PricePoint;
use yew::prelude::*;

use crate::settings::get_settings;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Last hovered historical record, if any
    #[prop_or_default]
    pub record: Option<PricePoint>,
}

#[function_component(DetailPanel)]
pub fn detail_panel(props: &Props) -> Html {
    html! {
        <div class="panel">
            <h2 class="panel-title">{"Information"}</h2>
            {match &props.record {
                Some(record) => render_record(record, &get_settings().currency_code),
                None => html! {
                    <p class="text-muted">{"Hover over a point in the chart to see the details here."}</p>
                },
            }}
        </div>
    }
}

fn render_record(record: &PricePoint, currency: &str) -> Html {
    let rows = detail_rows(record, currency).into_iter().map(|(label, value)| {
        html! {
            <tr>
                <th class="text-muted font-normal text-left pr-4">{label}</th>
                <td class="text-right">{value}</td>
            </tr>
        }
    });

    html! {
        <table class="table table-sm w-full">
            <tbody>{for rows}</tbody>
        </table>
    }
}

fn detail_rows(record: &PricePoint, currency: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Date", format_day(record.timestamp)),
        ("Open", format_optional_price(record.open, currency)),
        ("Close", format_price(record.close, currency)),
        ("High", format_optional_price(record.high, currency)),
        ("Low", format_optional_price(record.low, currency)),
        ("P/E Ratio", format_ratio(record.pe_ratio)),
        ("Volume", format_volume(record.volume)),
    ]
}
