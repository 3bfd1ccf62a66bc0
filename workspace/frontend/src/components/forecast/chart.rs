use common::ForecastSeries;
use plotly::common::{Line, Mode};
use plotly::Scatter;
use serde_json::{json, Value};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::chart::{self, base_layout, merge, trace_json, PlotSpec};
use crate::theme::THEME;

const DIV_ID: &str = "chart-forecast";

#[derive(Properties, PartialEq)]
pub struct Props {
    pub series: ForecastSeries,
}

/// Continuous close line across history and projection, with the projected
/// stretch shaded.
#[function_component(ForecastChart)]
pub fn forecast_chart(props: &Props) -> Html {
    let container_ref = use_node_ref();

    use_effect_with(
        (container_ref.clone(), props.series.clone()),
        move |(container_ref, series)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(DIV_ID);
                match plot_spec(series) {
                    Ok(spec) => {
                        if let Err(e) = spec.render(DIV_ID) {
                            log::error!("Failed to render forecast chart: {:?}", e);
                        }
                    }
                    Err(e) => log::error!("Failed to build forecast chart: {}", e),
                }
            }

            || chart::clear(DIV_ID)
        },
    );

    html! {
        <div ref={container_ref} style="width:100%; height:300px;"></div>
    }
}

fn plot_spec(series: &ForecastSeries) -> Result<PlotSpec, serde_json::Error> {
    let trace = Scatter::new(series.days(), series.closes_f64())
        .mode(Mode::Lines)
        .name("Close")
        .line(Line::new().color(THEME.palette.secondary).width(2.0));
    let trace = trace_json(
        &trace,
        json!({"hovertemplate": "Date: %{x}<br>Close: %{y:.2f}<extra></extra>"}),
    )?;

    Ok(PlotSpec {
        traces: vec![trace],
        layout: layout(series),
    })
}

fn layout(series: &ForecastSeries) -> Value {
    let (low, high) = series.axis_bounds();
    let shapes: Vec<Value> = series
        .projected_band_days()
        .map(|(x0, x1)| {
            json!({
                "type": "rect",
                "xref": "x",
                "yref": "paper",
                "x0": x0,
                "x1": x1,
                "y0": 0,
                "y1": 1,
                "fillcolor": THEME.palette.forecast_band,
                "opacity": 0.3,
                "line": {"width": 0},
                "layer": "below",
            })
        })
        .into_iter()
        .collect();

    let mut layout = base_layout();
    merge(
        &mut layout,
        json!({
            "hovermode": "closest",
            "yaxis": {"range": [low, high], "autorange": false},
            "shapes": shapes,
        }),
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ForecastPayload;

    fn series(json: &str) -> ForecastSeries {
        let payload: ForecastPayload = serde_json::from_str(json).unwrap();
        ForecastSeries::from_payload(payload).unwrap()
    }

    #[test]
    fn test_band_spans_first_to_last_projected_day() {
        let spec = plot_spec(&series(
            r#"{
                "historical_data": [
                    {"timestamp": "2023-05-31", "close": 49.8},
                    {"timestamp": "2023-06-01", "close": 50.0}
                ],
                "forecast": [51.0, 52.0]
            }"#,
        ))
        .unwrap();

        assert_eq!(spec.traces.len(), 1);
        assert_eq!(
            spec.traces[0]["x"],
            json!(["2023-05-31", "2023-06-01", "2023-06-02", "2023-06-03"])
        );

        let shapes = spec.layout["shapes"].as_array().unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0]["x0"], "2023-06-02");
        assert_eq!(shapes[0]["x1"], "2023-06-03");
        assert_eq!(shapes[0]["yref"], "paper");
        assert_eq!(spec.layout["yaxis"]["range"], json!([49, 52]));
    }

    #[test]
    fn test_no_band_without_projection() {
        let spec = plot_spec(&series(
            r#"{
                "historical_data": [{"timestamp": "2023-06-01", "close": 50.5}],
                "forecast": []
            }"#,
        ))
        .unwrap();

        assert_eq!(spec.layout["shapes"], json!([]));
        assert_eq!(spec.layout["yaxis"]["range"], json!([50, 51]));
    }
}
