pub mod forecast;
pub mod historical;

use common::FetchError;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::settings;

fn api_url(endpoint: &str) -> Result<String, FetchError> {
    let settings = settings::get_settings();
    let api = settings.api().map_err(|e| {
        log::error!("{} - {}", endpoint, e);
        FetchError::from(e)
    })?;
    Ok(api.url(endpoint))
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let url = api_url(endpoint)?;
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let err = FetchError::Transport(e.to_string());
        log::error!("GET {} - {}", endpoint, err);
        err
    })?;

    read_json("GET", endpoint, response).await
}

/// POST without a request body
pub async fn post_empty<T>(endpoint: &str) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let url = api_url(endpoint)?;
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url).send().await.map_err(|e| {
        let err = FetchError::Transport(e.to_string());
        log::error!("POST {} - {}", endpoint, err);
        err
    })?;

    read_json("POST", endpoint, response).await
}

async fn read_json<T>(method: &str, endpoint: &str, response: Response) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    if !response.ok() {
        let err = FetchError::Status {
            status: response.status(),
            endpoint: endpoint.to_string(),
        };
        log::error!("{} {} - {}", method, endpoint, err);
        return Err(err);
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let data = response.json::<T>().await.map_err(|e| {
        let err = FetchError::Decode(e.to_string());
        log::error!("{} {} - {}", method, endpoint, err);
        err
    })?;

    log::info!("{} {} - Success", method, endpoint);
    Ok(data)
}
