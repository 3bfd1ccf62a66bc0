use common::format::format_volume;
use common::{resolve_hover, ChartSeries, PricePoint};
use plotly::common::{Line, Marker, Mode};
use plotly::{Bar, Scatter};
use serde_json::{json, Value};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::chart::{self, base_layout, merge, trace_json, PlotSpec};
use crate::theme::THEME;

const DIV_ID: &str = "chart-historical";

#[derive(Properties, PartialEq)]
pub struct Props {
    pub series: ChartSeries,
    pub on_hover: Callback<PricePoint>,
}

/// Inputs the plot is drawn from. A new hover callback alone must not redraw
/// the chart, or the hover label would vanish as soon as it appears.
type PlotDeps = (NodeRef, ChartSeries);

fn plot_deps(container_ref: &NodeRef, props: &Props) -> PlotDeps {
    (container_ref.clone(), props.series.clone())
}

/// Close price (line, left axis) and volume (bars, right axis) over time.
#[function_component(HistoricalChart)]
pub fn historical_chart(props: &Props) -> Html {
    let container_ref = use_node_ref();
    let on_hover = use_mut_ref(|| props.on_hover.clone());
    *on_hover.borrow_mut() = props.on_hover.clone();

    use_effect_with(plot_deps(&container_ref, props), move |(container_ref, series)| {
        let mut listener = None;

        if let Some(element) = container_ref.cast::<HtmlElement>() {
            element.set_id(DIV_ID);
            match plot_spec(series) {
                Ok(spec) => {
                    if let Err(e) = spec.render(DIV_ID) {
                        log::error!("Failed to render historical chart: {:?}", e);
                    } else {
                        let series = series.clone();
                        let bound = chart::on_hover(&element, move |event| {
                            if let Some(point) = resolve_hover(&series, &event) {
                                log::trace!("Hovered {}", point.day());
                                let callback = on_hover.borrow().clone();
                                callback.emit(point);
                            }
                        });
                        match bound {
                            Ok(l) => listener = Some(l),
                            Err(e) => log::error!("Failed to bind chart hover: {:?}", e),
                        }
                    }
                }
                Err(e) => log::error!("Failed to build historical chart: {}", e),
            }
        }

        move || {
            chart::clear(DIV_ID);
            drop(listener);
        }
    });

    html! {
        <div ref={container_ref} style="width:100%; height:300px;"></div>
    }
}

fn plot_spec(series: &ChartSeries) -> Result<PlotSpec, serde_json::Error> {
    let palette = THEME.palette;
    let days = series.days();
    let volumes: Vec<String> = series.iter().map(|p| format_volume(p.volume)).collect();

    let close = Scatter::new(days.clone(), series.closes_f64())
        .mode(Mode::Lines)
        .name("Closing Price")
        .line(Line::new().color(palette.primary).width(2.0));
    let close = trace_json(
        &close,
        json!({
            "yaxis": "y",
            "customdata": volumes,
            "hovertemplate": "Date: %{x}<br>Close: %{y:.2f}<br>Volume: %{customdata}<extra></extra>",
        }),
    )?;

    let volume = Bar::new(days, series.volumes())
        .name("Volume")
        .marker(Marker::new().color(palette.forecast_band));
    let volume = trace_json(&volume, json!({"yaxis": "y2", "opacity": 0.6, "hoverinfo": "skip"}))?;

    Ok(PlotSpec {
        traces: vec![volume, close],
        layout: layout(),
    })
}

fn layout() -> Value {
    let mut layout = base_layout();
    merge(
        &mut layout,
        json!({
            "hovermode": "x unified",
            "yaxis": {"title": {"text": "Close"}, "autorange": true},
            "yaxis2": {
                "title": {"text": "Volume"},
                "overlaying": "y",
                "side": "right",
                "autorange": true,
                "showgrid": false,
            },
        }),
    );
    layout
}
