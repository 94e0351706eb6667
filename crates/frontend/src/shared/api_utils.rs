//! API utilities for frontend-backend communication
//!
//! Every call goes to `CONFIG.api_url` with the bearer token from
//! localStorage. A 401 from any authenticated call ends the session.

use contracts::shared::error::ApiError;
use contracts::shared::wire::decode_body;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CONFIG;
use crate::system::auth::{context, storage};

/// Get the base URL for API requests, without trailing slash
pub fn api_base() -> &'static str {
    &CONFIG.api_url
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust
/// # use frontend::shared::api_utils::api_url;
/// let url = api_url("/clientes/12");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

#[derive(Debug, Clone, Copy)]
enum Verb {
    Post,
    Put,
    Patch,
}

impl Verb {
    fn builder(self, url: &str) -> RequestBuilder {
        match self {
            Verb::Post => Request::post(url),
            Verb::Put => Request::put(url),
            Verb::Patch => Request::patch(url),
        }
    }
}

fn network(path: &str, e: gloo_net::Error) -> ApiError {
    log::error!("Request to {} failed: {}", path, e);
    ApiError::Network(e.to_string())
}

fn authorized(builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
    let token = storage::get_token().ok_or(ApiError::NotAuthenticated)?;
    Ok(builder.header("Authorization", &format!("Bearer {}", token)))
}

/// Read the body, turning non-2xx answers into `ApiError`.
async fn read_body(path: &str, response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if (200..300).contains(&status) {
        return Ok(body);
    }

    let err = ApiError::from_status(status, &body);
    if err.is_unauthorized() {
        log::warn!("{} answered 401, closing session", path);
        context::expire_session();
    } else {
        log::warn!("{} answered {}: {}", path, status, err);
    }
    Err(err)
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    decode_body(body).map_err(|e| {
        log::error!("Unexpected payload from {}: {}", path, e);
        ApiError::Parse(e.to_string())
    })
}

/// GET `path` and decode the (optionally `{data: ..}`-wrapped) JSON body.
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = authorized(Request::get(&api_url(path)))?
        .send()
        .await
        .map_err(|e| network(path, e))?;
    let body = read_body(path, response).await?;
    decode(path, &body)
}

async fn send_json<B, T>(verb: Verb, path: &str, payload: &B) -> Result<Option<T>, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = authorized(verb.builder(&api_url(path)))?
        .json(payload)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| network(path, e))?;
    let body = read_body(path, response).await?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    // Some endpoints answer with `{message}` only; the caller refetches then.
    match decode_body::<T>(&body) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::debug!("{} answered without a usable row: {}", path, e);
            Ok(None)
        }
    }
}

/// POST a payload; `Ok(None)` when the server does not echo the row back.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    payload: &B,
) -> Result<Option<T>, ApiError> {
    send_json(Verb::Post, path, payload).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    payload: &B,
) -> Result<Option<T>, ApiError> {
    send_json(Verb::Put, path, payload).await
}

pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    payload: &B,
) -> Result<Option<T>, ApiError> {
    send_json(Verb::Patch, path, payload).await
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let response = authorized(Request::delete(&api_url(path)))?
        .send()
        .await
        .map_err(|e| network(path, e))?;
    read_body(path, response).await.map(|_| ())
}

/// POST without bearer token; used only by the login call.
pub async fn post_public<B: Serialize, T: DeserializeOwned>(
    path: &str,
    payload: &B,
) -> Result<T, ApiError> {
    let response = Request::post(&api_url(path))
        .json(payload)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| network(path, e))?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !(200..300).contains(&status) {
        return Err(ApiError::from_login_status(status, &body));
    }
    decode(path, &body)
}
