use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use contracts::dashboards::d400_tracking::{retain_selection, CourierLocation, Freshness};
use contracts::domain::a005_task::Task;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::config::CONFIG;
use crate::dashboards::d400_tracking::api;
use crate::domain::a005_task::api as task_api;
use crate::maps::{MapMarker, MapView, MarkerTone};
use crate::shared::data::use_data;
use crate::shared::date_utils::{format_elapsed, format_opt_date};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;

fn tone(freshness: Freshness) -> MarkerTone {
    match freshness {
        Freshness::Live => MarkerTone::Live,
        Freshness::Stale => MarkerTone::Stale,
        Freshness::Unknown => MarkerTone::Unknown,
    }
}

fn freshness_class(freshness: Freshness) -> &'static str {
    match freshness {
        Freshness::Live => "courier-item__dot courier-item__dot--live",
        Freshness::Stale => "courier-item__dot courier-item__dot--stale",
        Freshness::Unknown => "courier-item__dot courier-item__dot--unknown",
    }
}

/// Live courier map, refreshed every `CONFIG.tracking_interval_secs`.
///
/// A tick is skipped while the previous request is still running. Failed
/// refreshes keep the last markers on screen.
#[component]
pub fn TrackingPage() -> impl IntoView {
    let data = use_data();
    let locations = RwSignal::new(Vec::<CourierLocation>::new());
    let selected = RwSignal::new(None::<i64>);
    let error = RwSignal::new(None::<String>);
    let last_refresh = RwSignal::new(None::<DateTime<Utc>>);
    let in_flight = RwSignal::new(false);
    let courier_tasks = RwSignal::new(Vec::<Task>::new());
    let alive = Arc::new(AtomicBool::new(true));

    let refresh = {
        let alive = alive.clone();
        move || {
            if in_flight.get_untracked() {
                log::debug!("Tracking refresh still running, skipping tick");
                return;
            }
            in_flight.set(true);
            let alive = alive.clone();
            spawn_local(async move {
                let result = api::fetch_locations().await;
                if !alive.load(Ordering::Relaxed) {
                    return;
                }
                match result {
                    Ok(rows) => {
                        selected.update(|s| *s = retain_selection(*s, &rows));
                        locations.set(rows);
                        last_refresh.set(Some(Utc::now()));
                        error.set(None);
                    }
                    Err(e) => {
                        log::warn!("Tracking refresh failed: {}", e);
                        error.set(Some(e.to_string()));
                    }
                }
                in_flight.set(false);
            });
        }
    };

    {
        let alive = alive.clone();
        let refresh = refresh.clone();
        let interval_ms = CONFIG.tracking_interval_secs.saturating_mul(1000);
        log::info!("Tracking polling every {} s", CONFIG.tracking_interval_secs);
        spawn_local(async move {
            while alive.load(Ordering::Relaxed) {
                refresh();
                TimeoutFuture::new(interval_ms).await;
            }
            log::debug!("Tracking polling stopped");
        });
    }

    on_cleanup({
        let alive = alive.clone();
        move || alive.store(false, Ordering::Relaxed)
    });

    // Tasks of the selected courier, for the side panel.
    Effect::new({
        let alive = alive.clone();
        move |_| {
            let Some(courier_id) = selected.get() else {
                courier_tasks.set(Vec::new());
                return;
            };
            let alive = alive.clone();
            spawn_local(async move {
                let result = task_api::fetch_by_courier(courier_id).await;
                if !alive.load(Ordering::Relaxed) || selected.get_untracked() != Some(courier_id) {
                    return;
                }
                match result {
                    Ok(tasks) => courier_tasks.set(tasks),
                    Err(e) => log::warn!("Tasks of courier {} failed: {}", courier_id, e),
                }
            });
        }
    });

    let freshness_of = move |loc: &CourierLocation| {
        let now = last_refresh.get().unwrap_or_else(Utc::now);
        loc.freshness(now, CONFIG.stale_after())
    };

    let markers = Signal::derive(move || {
        locations.with(|rows| {
            rows.iter()
                .filter_map(|loc| {
                    loc.position().map(|position| MapMarker {
                        id: loc.courier_id,
                        position,
                        title: loc.name.clone(),
                        tone: tone(freshness_of(loc)),
                    })
                })
                .collect::<Vec<_>>()
        })
    });

    let on_marker_click = Callback::new(move |id: i64| selected.set(Some(id)));
    let toggle = move |id: i64| {
        selected.update(|s| *s = if *s == Some(id) { None } else { Some(id) });
    };

    let counts = Memo::new(move |_| {
        locations.with(|rows| {
            let mut live = 0;
            let mut stale = 0;
            for loc in rows {
                match freshness_of(loc) {
                    Freshness::Live => live += 1,
                    Freshness::Stale => stale += 1,
                    Freshness::Unknown => {}
                }
            }
            (live, stale, rows.len())
        })
    });

    let manual_refresh = refresh.clone();

    view! {
        <PageFrame page_id="d400_tracking--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Seguimiento de mensajeros"
                subtitle=Signal::derive(move || {
                    last_refresh.get().map(|t| format!("Actualizado {}", format_elapsed(t, Utc::now())))
                })
            >
                <Badge color=BadgeColor::Success>{move || format!("{} en línea", counts.get().0)}</Badge>
                <Badge color=BadgeColor::Warning>{move || format!("{} sin señal", counts.get().1)}</Badge>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| manual_refresh()>
                    {icon("refresh")}
                    " Actualizar"
                </Button>
            </PageHeader>

            {move || error.get().map(|e| view! {
                <div class="alert alert--error">{icon("alert-triangle")}" "{e}</div>
            })}

            <div class="tracking">
                <aside class="tracking__list">
                    {move || {
                        let rows = locations.get();
                        if rows.is_empty() {
                            return view! { <p class="text-muted">"Sin mensajeros reportando."</p> }.into_any();
                        }
                        let now = last_refresh.get().unwrap_or_else(Utc::now);
                        rows.into_iter()
                            .map(|loc| {
                                let id = loc.courier_id;
                                let freshness = freshness_of(&loc);
                                let seen = loc
                                    .last_seen()
                                    .map(|t| format_elapsed(t, now))
                                    .unwrap_or_else(|| freshness.label().to_string());
                                let has_position = loc.position().is_some();
                                view! {
                                    <div
                                        class="courier-item"
                                        class:courier-item--selected=move || selected.get() == Some(id)
                                        class:courier-item--no-position=!has_position
                                        on:click=move |_| toggle(id)
                                    >
                                        <span class=freshness_class(freshness)></span>
                                        <div class="courier-item__text">
                                            <div class="courier-item__name">{loc.name.clone()}</div>
                                            <div class="courier-item__meta">
                                                {seen}
                                                {(loc.pending_tasks > 0).then(|| format!(" · {} pendientes", loc.pending_tasks))}
                                            </div>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}

                    {move || selected.get().map(|id| {
                        let name = data.user_name(Some(id));
                        view! {
                            <div class="tracking__tasks">
                                <h3>{format!("Tareas de {}", name)}</h3>
                                {move || {
                                    let tasks = courier_tasks.get();
                                    if tasks.is_empty() {
                                        return view! { <p class="text-muted">"Sin tareas asignadas."</p> }.into_any();
                                    }
                                    let catalog = data.task_statuses.items.get();
                                    tasks.into_iter()
                                        .map(|t| view! {
                                            <div class="tracking__task">
                                                <strong>{format!("#{} {}", t.id, t.title)}</strong>
                                                <span>{t.status_label(&catalog)}</span>
                                                <span class="text-muted">{format_opt_date(t.due_date.as_deref())}</span>
                                            </div>
                                        })
                                        .collect_view()
                                        .into_any()
                                }}
                            </div>
                        }
                    })}
                </aside>

                <MapView
                    markers=markers
                    selected=Signal::derive(move || selected.get())
                    on_marker_click=on_marker_click
                    fit_to_markers=true
                    class="tracking__map"
                />
            </div>
        </PageFrame>
    }
}
