//! Glue between Rust-built plot descriptions and the Plotly.js global loaded by
//! `index.html`.

use common::HoverEvent;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::theme::THEME;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Plotly, js_name = newPlot)]
    fn new_plot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = Plotly)]
    fn purge(div_id: &str) -> Result<(), JsValue>;
}

/// Traces and layout of one chart, as Plotly JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub traces: Vec<Value>,
    pub layout: Value,
}

impl PlotSpec {
    pub fn render(&self, div_id: &str) -> Result<(), JsValue> {
        let data = to_js(&Value::Array(self.traces.clone()))?;
        let layout = to_js(&self.layout)?;
        let config = to_js(&json!({"responsive": true, "displayModeBar": false}))?;
        new_plot(div_id, data, layout, config)?;
        Ok(())
    }
}

/// Removes the plot and its event listeners from the element.
pub fn clear(div_id: &str) {
    if let Err(e) = purge(div_id) {
        log::warn!("Failed to purge chart {}: {:?}", div_id, e);
    }
}

/// Serializes a `plotly` trace and overlays extra attributes the builder does
/// not cover.
pub fn trace_json<T: Serialize>(trace: &T, extra: Value) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(trace)?;
    merge(&mut value, extra);
    Ok(value)
}

/// Layout shared by all charts: transparent background, themed text and grid.
pub fn base_layout() -> Value {
    let palette = THEME.palette;
    json!({
        "height": 300,
        "margin": {"t": 10, "r": 50, "l": 50, "b": 40},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "font": {"family": THEME.font_family, "color": palette.text_secondary},
        "xaxis": {"type": "date", "showgrid": false},
        "yaxis": {"showgrid": true, "gridcolor": palette.grid, "zeroline": false},
        "legend": {"orientation": "h", "y": -0.25},
    })
}

/// Recursively overlays `patch` onto `target`; objects merge, anything else
/// replaces.
pub fn merge(target: &mut Value, patch: Value) {
    if let Value::Object(patch) = patch {
        if let Value::Object(target) = target {
            for (key, value) in patch {
                merge(target.entry(key).or_insert(Value::Null), value);
            }
            return;
        }
        *target = Value::Object(patch);
    } else {
        *target = patch;
    }
}

fn to_js(value: &Value) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&text)
}

/// Keeps a `plotly_hover` listener alive. Purge the plot before dropping it.
pub struct HoverListener {
    _closure: Closure<dyn FnMut(JsValue)>,
}

/// Subscribes `handler` to hover events of a rendered plot.
pub fn on_hover<H>(element: &HtmlElement, mut handler: H) -> Result<HoverListener, JsValue>
where
    H: FnMut(HoverEvent) + 'static,
{
    let on: js_sys::Function = js_sys::Reflect::get(element, &JsValue::from_str("on"))?.dyn_into()?;

    let closure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        match parse_hover_event(event) {
            Some(hover) => handler(hover),
            None => log::trace!("Ignoring hover event without points"),
        }
    });
    on.call2(
        element,
        &JsValue::from_str("plotly_hover"),
        closure.as_ref().unchecked_ref(),
    )?;

    Ok(HoverListener { _closure: closure })
}

#[derive(Deserialize)]
struct RawHover {
    #[serde(default)]
    points: Vec<RawHoverPoint>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHoverPoint {
    #[serde(default)]
    point_index: Option<usize>,
    #[serde(default)]
    point_number: Option<usize>,
    #[serde(default)]
    x: Option<Value>,
}

fn parse_hover_event(event: JsValue) -> Option<HoverEvent> {
    let raw: RawHover = serde_wasm_bindgen::from_value(event)
        .map_err(|e| log::warn!("Unreadable hover event: {}", e))
        .ok()?;
    let point = raw.points.into_iter().next()?;

    Some(HoverEvent {
        point_index: point.point_index.or(point.point_number),
        x: point.x.and_then(|x| match x {
            Value::String(s) => Some(s),
            _ => None,
        }),
    })
}
