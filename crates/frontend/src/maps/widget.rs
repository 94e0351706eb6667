use std::collections::HashMap;

use contracts::dashboards::d400_tracking::MarkerDiff;
use contracts::geo::{bounds, Coordinates};
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::bindings::{
    latlng_from_js, to_js, BoundsLiteral, CircleIcon, GoogleMap, LatLngLiteral, MapOptions, Marker,
};
use super::loader;
use crate::config::CONFIG;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerTone {
    Live,
    Stale,
    Unknown,
    Destination,
    Picked,
}

impl MarkerTone {
    pub fn color(&self) -> &'static str {
        match self {
            MarkerTone::Live => "#16a34a",
            MarkerTone::Stale => "#f59e0b",
            MarkerTone::Unknown => "#94a3b8",
            MarkerTone::Destination => "#2563eb",
            MarkerTone::Picked => "#dc2626",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: i64,
    pub position: Coordinates,
    pub title: String,
    pub tone: MarkerTone,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkerOptions<'a> {
    position: LatLngLiteral,
    title: &'a str,
    icon: CircleIcon,
    z_index: f64,
}

fn icon_for(marker: &MapMarker, selected: bool) -> CircleIcon {
    CircleIcon::new(marker.tone.color(), if selected { 11.0 } else { 8.0 })
}

/// Google map showing `markers`, reconciled in place on every change.
///
/// Markers are matched by id: new ids are created, moved ids are
/// repositioned and missing ids are detached. The map itself is created
/// once, after the script finished loading.
#[component]
pub fn MapView(
    #[prop(into)] markers: Signal<Vec<MapMarker>>,
    #[prop(optional, into)] selected: MaybeProp<i64>,
    #[prop(optional)] on_marker_click: Option<Callback<i64>>,
    #[prop(optional)] on_map_click: Option<Callback<Coordinates>>,
    /// Zoom to show every marker whenever new ones appear.
    #[prop(optional)]
    fit_to_markers: bool,
    #[prop(optional)] class: Option<&'static str>,
) -> impl IntoView {
    let container = NodeRef::<Div>::new();
    let map = StoredValue::new_local(None::<GoogleMap>);
    let js_markers = StoredValue::new_local(HashMap::<i64, Marker>::new());
    let positions = StoredValue::new(HashMap::<i64, Coordinates>::new());
    let last_selected = StoredValue::new(None::<i64>);
    let started = StoredValue::new(false);
    let ready = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let Some(el) = container.get() else {
            return;
        };
        if started.get_value() {
            return;
        }
        started.set_value(true);

        spawn_local(async move {
            if let Err(e) = loader::ensure_loaded().await {
                error.set(Some(e.to_string()));
                return;
            }
            // The page may have been left while the script loaded.
            if !el.is_connected() {
                log::debug!("Map container detached before Google Maps loaded");
                return;
            }
            let options = MapOptions {
                center: LatLngLiteral {
                    lat: CONFIG.map.center_lat,
                    lng: CONFIG.map.center_lng,
                },
                zoom: CONFIG.map.zoom,
                map_type_control: false,
                street_view_control: false,
                fullscreen_control: true,
                clickable_icons: false,
            };
            let gmap = GoogleMap::new(&el, &to_js(&options));

            if let Some(cb) = on_map_click {
                let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
                    let point = js_sys::Reflect::get(&event, &JsValue::from_str("latLng"))
                        .ok()
                        .and_then(|ll| latlng_from_js(&ll));
                    if let Some(point) = point {
                        cb.run(point.rounded());
                    }
                });
                gmap.add_listener("click", handler.as_ref().unchecked_ref());
                handler.forget();
            }

            map.set_value(Some(gmap));
            ready.set(true);
        });
    });

    Effect::new(move |_| {
        let items = markers.get();
        let selected = selected.get();
        if !ready.get() {
            return;
        }

        let incoming: Vec<(i64, Coordinates)> = items.iter().map(|m| (m.id, m.position)).collect();
        let diff = positions.with_value(|current| MarkerDiff::compute(current, &incoming));

        map.with_value(|gmap| {
            let Some(gmap) = gmap else {
                return;
            };
            let map_js: &JsValue = gmap.as_ref();

            js_markers.update_value(|live| {
                for id in &diff.removed {
                    if let Some(marker) = live.remove(id) {
                        marker.set_map(&JsValue::NULL);
                    }
                }
                for (id, pos) in &diff.moved {
                    if let Some(marker) = live.get(id) {
                        marker.set_position(&to_js(&LatLngLiteral::from(*pos)));
                    }
                }
                for (id, _) in &diff.added {
                    let Some(item) = items.iter().find(|m| m.id == *id) else {
                        continue;
                    };
                    let options = to_js(&MarkerOptions {
                        position: item.position.into(),
                        title: &item.title,
                        icon: icon_for(item, selected == Some(*id)),
                        z_index: 1.0,
                    });
                    let _ = js_sys::Reflect::set(&options, &JsValue::from_str("map"), map_js);
                    let marker = Marker::new(&options);

                    if let Some(cb) = on_marker_click {
                        let id = *id;
                        let handler = Closure::<dyn FnMut()>::new(move || cb.run(id));
                        marker.add_listener("click", handler.as_ref().unchecked_ref());
                        handler.forget();
                    }
                    live.insert(*id, marker);
                }

                // Tone, title and selection can change without a move.
                for item in &items {
                    if let Some(marker) = live.get(&item.id) {
                        let is_selected = selected == Some(item.id);
                        marker.set_icon(&to_js(&icon_for(item, is_selected)));
                        marker.set_title(&item.title);
                        marker.set_z_index(if is_selected { 1000.0 } else { 1.0 });
                    }
                }
            });

            if fit_to_markers && !diff.added.is_empty() {
                fit(gmap, &incoming);
            }

            if selected != last_selected.get_value() {
                if let Some(pos) = selected
                    .and_then(|id| incoming.iter().find(|(mid, _)| *mid == id))
                    .map(|(_, pos)| *pos)
                {
                    gmap.pan_to(&to_js(&LatLngLiteral::from(pos)));
                }
            }
        });

        last_selected.set_value(selected);
        positions.update_value(|current| diff.apply(current));
    });

    on_cleanup(move || {
        js_markers.try_update_value(|live| {
            for (_, marker) in live.drain() {
                marker.set_map(&JsValue::NULL);
            }
        });
    });

    view! {
        <div class=format!("map-view {}", class.unwrap_or_default())>
            <div class="map-view__canvas" node_ref=container></div>
            {move || error.get().map(|e| view! { <div class="map-view__error">{e}</div> })}
        </div>
    }
}

fn fit(gmap: &GoogleMap, points: &[(i64, Coordinates)]) {
    let coords: Vec<Coordinates> = points.iter().map(|(_, p)| *p).collect();
    match bounds(&coords) {
        Some((sw, ne)) if sw == ne => {
            gmap.pan_to(&to_js(&LatLngLiteral::from(sw)));
            gmap.set_zoom(15.0);
        }
        Some((sw, ne)) => {
            let b = BoundsLiteral {
                south: sw.lat,
                west: sw.lng,
                north: ne.lat,
                east: ne.lng,
            };
            gmap.fit_bounds(&to_js(&b), 48.0);
        }
        None => {}
    }
}
