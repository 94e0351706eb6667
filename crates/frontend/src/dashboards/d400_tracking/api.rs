use contracts::dashboards::d400_tracking::CourierLocation;
use contracts::shared::error::ApiError;

use crate::shared::api_utils::get_json;

/// Latest known position of every courier.
pub async fn fetch_locations() -> Result<Vec<CourierLocation>, ApiError> {
    get_json("/seguimiento/mensajeros").await
}
