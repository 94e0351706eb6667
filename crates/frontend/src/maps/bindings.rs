//! Thin `wasm_bindgen` bindings for the parts of `google.maps` we use.
//! No state and no logic here.

use contracts::geo::Coordinates;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    pub type GoogleMap;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Map")]
    pub fn new(container: &web_sys::HtmlElement, options: &JsValue) -> GoogleMap;

    #[wasm_bindgen(method, js_name = panTo)]
    pub fn pan_to(this: &GoogleMap, position: &JsValue);

    #[wasm_bindgen(method, js_name = setZoom)]
    pub fn set_zoom(this: &GoogleMap, zoom: f64);

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &GoogleMap, bounds: &JsValue, padding: f64);

    #[wasm_bindgen(method, js_name = addListener)]
    pub fn add_listener(this: &GoogleMap, event: &str, handler: &js_sys::Function) -> JsValue;

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Marker)]
    pub type Marker;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Marker")]
    pub fn new(options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = setPosition)]
    pub fn set_position(this: &Marker, position: &JsValue);

    /// Pass `JsValue::NULL` to detach the marker.
    #[wasm_bindgen(method, js_name = setMap)]
    pub fn set_map(this: &Marker, map: &JsValue);

    #[wasm_bindgen(method, js_name = setIcon)]
    pub fn set_icon(this: &Marker, icon: &JsValue);

    #[wasm_bindgen(method, js_name = setTitle)]
    pub fn set_title(this: &Marker, title: &str);

    #[wasm_bindgen(method, js_name = setZIndex)]
    pub fn set_z_index(this: &Marker, z: f64);

    #[wasm_bindgen(method, js_name = addListener)]
    pub fn add_listener(this: &Marker, event: &str, handler: &js_sys::Function) -> JsValue;

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Geocoder)]
    pub type Geocoder;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Geocoder")]
    pub fn new() -> Geocoder;

    #[wasm_bindgen(method)]
    pub fn geocode(this: &Geocoder, request: &JsValue) -> js_sys::Promise;
}

/// `google.maps.LatLngLiteral`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinates> for LatLngLiteral {
    fn from(c: Coordinates) -> Self {
        Self { lat: c.lat, lng: c.lng }
    }
}

/// `google.maps.LatLngBoundsLiteral`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BoundsLiteral {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub center: LatLngLiteral,
    pub zoom: f64,
    pub map_type_control: bool,
    pub street_view_control: bool,
    pub fullscreen_control: bool,
    pub clickable_icons: bool,
}

/// Circle symbol (`google.maps.SymbolPath.CIRCLE` is `0`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleIcon {
    pub path: u8,
    pub scale: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub stroke_color: &'static str,
    pub stroke_weight: f64,
}

impl CircleIcon {
    pub fn new(fill_color: &'static str, scale: f64) -> Self {
        Self {
            path: 0,
            scale,
            fill_color,
            fill_opacity: 1.0,
            stroke_color: "#ffffff",
            stroke_weight: 2.0,
        }
    }
}

/// Serialize an options struct into a plain JS object.
pub fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::UNDEFINED)
}

/// Read `{lat(), lng()}` off a `google.maps.LatLng`.
pub fn latlng_from_js(value: &JsValue) -> Option<Coordinates> {
    let call = |name: &str| -> Option<f64> {
        let func: js_sys::Function = js_sys::Reflect::get(value, &JsValue::from_str(name))
            .ok()?
            .dyn_into()
            .ok()?;
        func.call0(value).ok()?.as_f64()
    };
    Coordinates::new(call("lat")?, call("lng")?)
}
