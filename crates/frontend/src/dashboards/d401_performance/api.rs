use contracts::dashboards::d401_performance::{PerformanceQuery, PerformanceRow};
use contracts::shared::error::ApiError;

use crate::shared::api_utils::get_json;

/// `GET /rendimiento?desde=YYYY-MM-DD&hasta=YYYY-MM-DD`
pub async fn fetch_performance(query: &PerformanceQuery) -> Result<Vec<PerformanceRow>, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Parse(e.to_string()))?;
    get_json(&format!("/rendimiento?{}", qs)).await
}
