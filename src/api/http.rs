use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::ApiError;

/// Shape of the backend's error bodies; either field may be missing.
#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub async fn post_json<B, R>(path: &str, body: &B) -> Result<R, ApiError>
where
    B: Serialize,
    R: DeserializeOwned,
{
    let url = config::endpoint(path);
    log::info!("POST {}", url);
    let response = Request::post(&url).json(body)?.send().await?;
    decode(response).await
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        let message = body
            .message
            .or(body.error)
            .unwrap_or_else(|| response.status_text());
        return Err(ApiError::Status { status, message });
    }
    response
        .json::<R>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
