//! Generic CRUD calls for any [`Resource`].
//!
//! Resource-specific endpoints live next to their pages
//! (`domain/a005_task/api.rs`, `dashboards/*/api.rs`).

use contracts::shared::error::ApiError;
use contracts::shared::resource::Resource;
use serde::de::DeserializeOwned;

use crate::shared::api_utils::{delete, get_json, post_json, put_json};

fn item_path<R: Resource>(id: i64) -> String {
    format!("{}/{}", R::ENDPOINT, id)
}

pub async fn fetch_list<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, ApiError> {
    get_json(path).await
}

pub async fn create<R: Resource>(draft: &R::Draft) -> Result<Option<R>, ApiError> {
    post_json(R::ENDPOINT, draft).await
}

pub async fn update<R: Resource>(id: i64, draft: &R::Draft) -> Result<Option<R>, ApiError> {
    put_json(&item_path::<R>(id), draft).await
}

pub async fn remove<R: Resource>(id: i64) -> Result<(), ApiError> {
    delete(&item_path::<R>(id)).await
}
