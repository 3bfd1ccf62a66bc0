use common::PricePoint;
use yew::prelude::*;

use super::detail::DetailPanel;
use super::forecast::ForecastPanel;
use super::historical::HistoricalPanel;

/// Page layout: historical and forecast panels side by side, details on the
/// right. Owns the hovered record shared between them.
#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let hovered = use_state(|| None::<PricePoint>);

    let on_hover = {
        let hovered = hovered.setter();
        use_callback((), move |point: PricePoint, _| hovered.set(Some(point)))
    };

    html! {
        <div class="container mx-auto p-4">
            <h1 class="text-3xl font-bold text-center mb-6">{"Nifty50 ETF Dashboard"}</h1>
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-4">
                <HistoricalPanel {on_hover} />
                <ForecastPanel />
                <DetailPanel record={(*hovered).clone()} />
            </div>
        </div>
    }
}
