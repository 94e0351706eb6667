//! Loads the Google Maps JavaScript API once per page.

use std::cell::RefCell;

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::error::MapError;
use crate::config::CONFIG;

const SCRIPT_ID: &str = "sgr-google-maps";

thread_local! {
    static PENDING: RefCell<Option<Promise>> = const { RefCell::new(None) };
}

pub fn script_url(api_key: &str) -> String {
    format!(
        "https://maps.googleapis.com/maps/api/js?key={}&language=es&region=CO&v=weekly",
        urlencoding::encode(api_key)
    )
}

fn maps_ready() -> bool {
    let global = js_sys::global();
    Reflect::get(&global, &JsValue::from_str("google"))
        .ok()
        .filter(|g| g.is_object())
        .and_then(|g| Reflect::get(&g, &JsValue::from_str("maps")).ok())
        .is_some_and(|m| m.is_object())
}

fn inject(api_key: &str) -> Result<Promise, MapError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| MapError::ScriptFailed("sin documento".to_string()))?;
    let head = document
        .head()
        .ok_or_else(|| MapError::ScriptFailed("sin <head>".to_string()))?;

    let script: web_sys::HtmlScriptElement = document
        .create_element("script")
        .map_err(|_| MapError::ScriptFailed("no se pudo crear <script>".to_string()))?
        .unchecked_into();
    script.set_id(SCRIPT_ID);
    script.set_src(&script_url(api_key));
    script.set_async(true);
    script.set_defer(true);

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let onload = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("error de red"));
        });
        script.set_onload(Some(onload.unchecked_ref()));
        script.set_onerror(Some(onerror.unchecked_ref()));
    });

    head.append_child(&script)
        .map_err(|_| MapError::ScriptFailed("no se pudo insertar <script>".to_string()))?;
    log::info!("Loading Google Maps script");
    Ok(promise)
}

fn remove_script() {
    if let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(SCRIPT_ID))
    {
        el.remove();
    }
}

/// Resolves once `google.maps` is usable. Concurrent callers share one
/// script tag; a failed load can be retried.
pub async fn ensure_loaded() -> Result<(), MapError> {
    if maps_ready() {
        return Ok(());
    }
    let api_key = CONFIG.map.api_key.as_str();
    if api_key.is_empty() {
        return Err(MapError::MissingApiKey);
    }

    let pending = PENDING.with(|cell| cell.borrow().clone());
    let promise = match pending {
        Some(p) => p,
        None => {
            let p = inject(api_key)?;
            PENDING.with(|cell| *cell.borrow_mut() = Some(p.clone()));
            p
        }
    };

    match JsFuture::from(promise).await {
        Ok(_) if maps_ready() => Ok(()),
        Ok(_) => {
            PENDING.with(|cell| *cell.borrow_mut() = None);
            remove_script();
            Err(MapError::ScriptFailed("google.maps no disponible".to_string()))
        }
        Err(e) => {
            PENDING.with(|cell| *cell.borrow_mut() = None);
            remove_script();
            let reason = e.as_string().unwrap_or_else(|| "desconocido".to_string());
            log::error!("Google Maps failed to load: {}", reason);
            Err(MapError::ScriptFailed(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_url_encodes_key() {
        let url = script_url("abc 123&x");
        assert!(url.starts_with("https://maps.googleapis.com/maps/api/js?key=abc%20123%26x"));
        assert!(url.ends_with("&language=es&region=CO&v=weekly"));
    }
}
