use contracts::geo::{parse_maps_link, Coordinates};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance, Input};

use super::geocoder;
use super::widget::{MapMarker, MapView, MarkerTone};

/// Location field for forms: paste a Google Maps link, geocode the
/// address or click on the map.
#[component]
pub fn LocationPicker(
    #[prop(into)] value: Signal<Option<Coordinates>>,
    on_change: Callback<Option<Coordinates>>,
    /// Address used by "Buscar dirección".
    #[prop(into)]
    address: Signal<String>,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let link = RwSignal::new(String::new());
    let message = RwSignal::new(None::<String>);
    let searching = RwSignal::new(false);

    let apply_link = move |_| match parse_maps_link(&link.get_untracked()) {
        Ok(point) => {
            on_change.run(Some(point.rounded()));
            link.set(String::new());
            message.set(None);
        }
        Err(e) => message.set(Some(e.to_string())),
    };

    let search = move |_| {
        let query = address.get_untracked();
        searching.set(true);
        spawn_local(async move {
            match geocoder::geocode(&query).await {
                Ok(point) => {
                    on_change.run(Some(point));
                    message.set(None);
                }
                Err(e) => message.set(Some(e.to_string())),
            }
            searching.set(false);
        });
    };

    let markers = Signal::derive(move || {
        value
            .get()
            .map(|position| MapMarker {
                id: 0,
                position,
                title: position.to_display(),
                tone: MarkerTone::Picked,
            })
            .into_iter()
            .collect::<Vec<_>>()
    });

    let on_map_click = Callback::new(move |point: Coordinates| {
        on_change.run(Some(point));
        message.set(None);
    });

    view! {
        <div class="form__group location-picker">
            <label class="form__label">{label.unwrap_or_else(|| "Ubicación".to_string())}</label>
            <div class="location-picker__row">
                <Input value=link placeholder="Pegue un enlace de Google Maps o lat, lng" />
                <Button appearance=ButtonAppearance::Secondary on_click=apply_link>
                    "Usar enlace"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=search
                    disabled=Signal::derive(move || {
                        searching.get() || address.with(|a| a.trim().is_empty())
                    })
                >
                    {move || if searching.get() { "Buscando..." } else { "Buscar dirección" }}
                </Button>
            </div>
            <div class="location-picker__status">
                {move || match value.get() {
                    Some(point) => {
                        view! {
                            <span class="location-picker__coords">{point.to_display()}</span>
                            <a href=point.maps_url() target="_blank" rel="noopener">
                                "Ver en Google Maps"
                            </a>
                            <button
                                type="button"
                                class="location-picker__clear"
                                on:click=move |_| on_change.run(None)
                            >
                                "Quitar"
                            </button>
                        }
                            .into_any()
                    }
                    None => {
                        view! {
                            <span class="location-picker__empty">
                                "Sin ubicación. Haga clic en el mapa para marcarla."
                            </span>
                        }
                            .into_any()
                    }
                }}
            </div>
            {move || message.get().map(|m| view! { <div class="form__error">{m}</div> })}
            <MapView
                markers=markers
                on_map_click=on_map_click
                fit_to_markers=true
                class="map-view--picker"
            />
        </div>
    }
}
