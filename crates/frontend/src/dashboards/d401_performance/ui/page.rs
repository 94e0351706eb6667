use chrono::NaiveDate;
use contracts::dashboards::d401_performance::{
    chart_max, PerformanceQuery, PerformanceReport, PerformanceRow,
};
use contracts::shared::dates::parse_date;
use contracts::shared::indicators::{RateThresholds, ValueFormat};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d401_performance::api;
use crate::shared::components::stat_card::{format_value, StatCard};
use crate::shared::date_utils::{today, to_iso};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;

const DEFAULT_DAYS: u32 = 30;

fn percent(v: f64) -> String {
    format_value(v, &ValueFormat::Percent { decimals: 1 })
}

fn bar_height(value: u32, max: u32) -> String {
    format!("height: {:.1}%;", f64::from(value) * 100.0 / f64::from(max.max(1)))
}

/// The range to fetch, or the message to show instead.
fn checked_range(query: Option<PerformanceQuery>) -> Result<PerformanceQuery, &'static str> {
    match query {
        None => Err("Seleccione un rango de fechas válido"),
        Some(q) if !q.is_valid() => Err("La fecha inicial no puede ser posterior a la final"),
        Some(q) => Ok(q),
    }
}

#[component]
pub fn PerformancePage() -> impl IntoView {
    let initial = PerformanceQuery::last_days(today(), DEFAULT_DAYS);
    let date_from = RwSignal::new(to_iso(initial.from));
    let date_to = RwSignal::new(to_iso(initial.to));
    let rows = RwSignal::new(Vec::<PerformanceRow>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let query = Memo::new(move |_| {
        let from: Option<NaiveDate> = parse_date(&date_from.get());
        let to: Option<NaiveDate> = parse_date(&date_to.get());
        match (from, to) {
            (Some(from), Some(to)) => Some(PerformanceQuery { from, to }),
            _ => None,
        }
    });

    let report = Memo::new(move |_| rows.with(|r| PerformanceReport::build(r)));

    Effect::new(move |_| {
        let q = match checked_range(query.get()) {
            Ok(q) => q,
            Err(message) => {
                // An earlier fetch for a different range no longer owns the spinner.
                loading.set(false);
                error.set(Some(message.to_string()));
                return;
            }
        };
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let result = api::fetch_performance(&q).await;
            // A newer range may have been picked meanwhile.
            if query.try_get_untracked().flatten() != Some(q) {
                return;
            }
            match result {
                Ok(data) => {
                    log::debug!("Performance: {} rows for {} .. {}", data.len(), q.from, q.to);
                    rows.set(data);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    });

    let set_last_days = move |days: u32| {
        let q = PerformanceQuery::last_days(today(), days);
        date_from.set(to_iso(q.from));
        date_to.set(to_iso(q.to));
    };

    let summary = move || report.with(|r| r.summary);
    let has_data = move || report.with(|r| !r.is_empty());

    view! {
        <PageFrame page_id="d401_performance--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Rendimiento" subtitle="Indicadores de los mensajeros en el periodo">
                {move || loading.get().then(|| view! { <Spinner /> })}
            </PageHeader>

            <Flex class="page__toolbar" align=FlexAlign::End>
                <div class="form__group">
                    <label class="form__label">"Desde"</label>
                    <input
                        type="date"
                        class="form__input"
                        prop:value=move || date_from.get()
                        on:change=move |ev| date_from.set(event_target_value(&ev))
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"Hasta"</label>
                    <input
                        type="date"
                        class="form__input"
                        prop:value=move || date_to.get()
                        on:change=move |ev| date_to.set(event_target_value(&ev))
                    />
                </div>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| set_last_days(7)>"7 días"</Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| set_last_days(DEFAULT_DAYS)>"30 días"</Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| set_last_days(90)>"90 días"</Button>
            </Flex>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="stat-grid">
                <StatCard
                    label="Tareas asignadas"
                    icon_name="clipboard"
                    value=Signal::derive(move || has_data().then(|| f64::from(summary().assigned)))
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Tareas completadas"
                    icon_name="check-circle"
                    value=Signal::derive(move || has_data().then(|| f64::from(summary().completed)))
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Cumplimiento"
                    icon_name="bar-chart"
                    value=Signal::derive(move || has_data().then(|| summary().completion_rate()))
                    format=ValueFormat::Percent { decimals: 1 }
                    status=Signal::derive(move || {
                        RateThresholds::COMPLETION.status(has_data().then(|| summary().completion_rate()))
                    })
                    subtitle=Signal::derive(|| Some("Completadas / asignadas".to_string()))
                />
                <StatCard
                    label="Entregas a tiempo"
                    icon_name="clock"
                    value=Signal::derive(move || has_data().then(|| summary().on_time_rate()))
                    format=ValueFormat::Percent { decimals: 1 }
                    status=Signal::derive(move || {
                        RateThresholds::ON_TIME.status(has_data().then(|| summary().on_time_rate()))
                    })
                    subtitle=Signal::derive(|| Some("A tiempo / completadas".to_string()))
                />
                <StatCard
                    label="Tiempo de respuesta"
                    icon_name="truck"
                    value=Signal::derive(move || summary().avg_response_minutes())
                    format=ValueFormat::Minutes
                    subtitle=Signal::derive(|| Some("Promedio ponderado".to_string()))
                />
            </div>

            <Show
                when=has_data
                fallback=move || view! {
                    <div class="empty-state">
                        {icon("bar-chart")}
                        <p>"No hay datos de rendimiento en el periodo seleccionado."</p>
                    </div>
                }
            >
                <div class="dashboard-grid">
                    <section class="card">
                        <h2 class="card__title">"Ranking de mensajeros"</h2>
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"#"</TableHeaderCell>
                                    <TableHeaderCell>"Mensajero"</TableHeaderCell>
                                    <TableHeaderCell>"Asignadas"</TableHeaderCell>
                                    <TableHeaderCell>"Completadas"</TableHeaderCell>
                                    <TableHeaderCell>"Cumplimiento"</TableHeaderCell>
                                    <TableHeaderCell>"A tiempo"</TableHeaderCell>
                                    <TableHeaderCell>"Respuesta"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || {
                                    report
                                        .get()
                                        .couriers
                                        .into_iter()
                                        .enumerate()
                                        .map(|(i, c)| {
                                            let t = c.totals;
                                            let rank = i + 1;
                                            let name = c.courier_name;
                                            let assigned = t.assigned;
                                            let completed = t.completed;
                                            let completion = percent(t.completion_rate());
                                            let on_time = percent(t.on_time_rate());
                                            let response = t
                                                .avg_response_minutes()
                                                .map(|m| format_value(m, &ValueFormat::Minutes))
                                                .unwrap_or_else(|| "—".to_string());
                                            view! {
                                                <TableRow>
                                                    <TableCell><TableCellLayout>{rank}</TableCellLayout></TableCell>
                                                    <TableCell><TableCellLayout>{name}</TableCellLayout></TableCell>
                                                    <TableCell><TableCellLayout>{assigned}</TableCellLayout></TableCell>
                                                    <TableCell><TableCellLayout>{completed}</TableCellLayout></TableCell>
                                                    <TableCell><TableCellLayout>{completion}</TableCellLayout></TableCell>
                                                    <TableCell><TableCellLayout>{on_time}</TableCellLayout></TableCell>
                                                    <TableCell><TableCellLayout>{response}</TableCellLayout></TableCell>
                                                </TableRow>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </TableBody>
                        </Table>
                    </section>

                    <section class="card">
                        <h2 class="card__title">"Tareas por día"</h2>
                        <div class="bar-chart__legend">
                            <span class="bar-chart__swatch bar-chart__swatch--assigned"></span>"Asignadas "
                            <span class="bar-chart__swatch bar-chart__swatch--completed"></span>"Completadas"
                        </div>
                        <div class="bar-chart">
                            {move || {
                                let daily = report.get().daily;
                                let max = chart_max(&daily);
                                daily
                                    .into_iter()
                                    .map(|p| {
                                        let label = p.date.format("%d/%m").to_string();
                                        let title = format!(
                                            "{}: {} asignadas, {} completadas",
                                            p.date.format("%d/%m/%Y"),
                                            p.totals.assigned,
                                            p.totals.completed
                                        );
                                        view! {
                                            <div class="bar-chart__day" title=title>
                                                <div class="bar-chart__bars">
                                                    <div
                                                        class="bar-chart__bar bar-chart__bar--assigned"
                                                        style=bar_height(p.totals.assigned, max)
                                                    ></div>
                                                    <div
                                                        class="bar-chart__bar bar-chart__bar--completed"
                                                        style=bar_height(p.totals.completed, max)
                                                    ></div>
                                                </div>
                                                <div class="bar-chart__label">{label}</div>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </section>
                </div>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_height_scales_to_max() {
        assert_eq!(bar_height(5, 10), "height: 50.0%;");
        assert_eq!(bar_height(0, 0), "height: 0.0%;");
    }

    #[test]
    fn test_checked_range_rejects_reversed_dates() {
        let day = |d| chrono::NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        let ok = PerformanceQuery { from: day(1), to: day(31) };
        assert_eq!(checked_range(Some(ok)), Ok(ok));
        assert!(checked_range(Some(PerformanceQuery { from: day(20), to: day(2) })).is_err());
        assert!(checked_range(None).is_err());
    }

    #[test]
    fn test_percent_uses_decimal_comma() {
        assert_eq!(percent(87.26), "87,3%");
    }
}
