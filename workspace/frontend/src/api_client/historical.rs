use common::{ChartSeries, FetchError, HistoricalQuery};

use crate::api_client;

/// Daily records between the query's bounds, inclusive, oldest first.
pub async fn get_historical(query: HistoricalQuery) -> Result<ChartSeries, FetchError> {
    log::trace!("Fetching historical data from {} to {}", query.start, query.end);

    let series = api_client::get::<ChartSeries>(&query.endpoint()).await?;

    log::info!(
        "Fetched {} historical point(s) for {} to {}",
        series.len(),
        query.start,
        query.end
    );
    Ok(series)
}
