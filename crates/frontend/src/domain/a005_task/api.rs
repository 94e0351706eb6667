//! Task endpoints beyond plain CRUD.

use contracts::domain::a005_task::{StatusChange, Task};
use contracts::shared::error::ApiError;

use crate::shared::api_utils::patch_json;
use crate::shared::data::service;

/// `GET /tareas/mensajero/{id}`
pub async fn fetch_by_courier(courier_id: i64) -> Result<Vec<Task>, ApiError> {
    service::fetch_list(&format!("/tareas/mensajero/{}", courier_id)).await
}

/// `PATCH /tareas/{id}/estado`; `Ok(None)` when the server does not echo the task.
pub async fn change_status(task_id: i64, status_id: i64) -> Result<Option<Task>, ApiError> {
    log::info!("Task {} -> status {}", task_id, status_id);
    patch_json(&format!("/tareas/{}/estado", task_id), &StatusChange { status_id }).await
}
