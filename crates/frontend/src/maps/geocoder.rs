use contracts::geo::Coordinates;
use js_sys::{Array, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use super::bindings::{latlng_from_js, to_js, Geocoder};
use super::error::MapError;
use super::loader;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeocodeRequest<'a> {
    address: &'a str,
    region: &'static str,
}

/// First geocoder hit for `address`, biased to Colombia.
pub async fn geocode(address: &str) -> Result<Coordinates, MapError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(MapError::Geocode("dirección vacía".to_string()));
    }
    loader::ensure_loaded().await?;

    let request = to_js(&GeocodeRequest {
        address,
        region: "co",
    });
    let response = JsFuture::from(Geocoder::new().geocode(&request))
        .await
        .map_err(|_| MapError::Geocode(address.to_string()))?;

    let first = Reflect::get(&response, &JsValue::from_str("results"))
        .ok()
        .map(|v| Array::from(&v))
        .filter(|results| results.length() > 0)
        .map(|results| results.get(0))
        .ok_or_else(|| MapError::Geocode(address.to_string()))?;

    let location = Reflect::get(&first, &JsValue::from_str("geometry"))
        .and_then(|g| Reflect::get(&g, &JsValue::from_str("location")))
        .map_err(|_| MapError::Geocode(address.to_string()))?;

    let coords = latlng_from_js(&location).ok_or_else(|| MapError::Geocode(address.to_string()))?;
    log::debug!("Geocoded '{}' to {}", address, coords.to_display());
    Ok(coords.rounded())
}
