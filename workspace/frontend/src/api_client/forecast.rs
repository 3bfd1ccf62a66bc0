use common::{FetchError, ForecastPayload, ForecastSeries, Horizon};

use crate::api_client;

/// Requests the forecast for `horizon` and merges it with its historical tail.
pub async fn get_forecast(horizon: Horizon) -> Result<ForecastSeries, FetchError> {
    log::trace!("Fetching {}", horizon);

    let payload = api_client::post_empty::<ForecastPayload>(horizon.endpoint()).await?;
    let series = ForecastSeries::from_payload(payload).map_err(|e| {
        log::error!("Failed to shape {} payload: {}", horizon, e);
        FetchError::from(e)
    })?;

    log::info!(
        "{}: {} point(s), {} projected",
        horizon,
        series.len(),
        series.projected().len()
    );
    Ok(series)
}
