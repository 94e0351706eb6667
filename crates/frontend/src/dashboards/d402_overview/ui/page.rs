use std::collections::BTreeMap;

use chrono::NaiveDate;
use contracts::domain::a005_task::{Task, TaskStatus};
use contracts::shared::dates::parse_date;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;
use leptos_router::components::A;
use thaw::*;

use crate::shared::components::stat_card::StatCard;
use crate::shared::data::use_data;
use crate::shared::date_utils::{format_opt_date, today};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;

#[derive(Debug, Clone, Default, PartialEq)]
struct TaskSummary {
    open: usize,
    overdue: usize,
    unassigned: usize,
    /// Status label -> count, in label order.
    by_status: BTreeMap<String, usize>,
}

fn summarize_tasks(tasks: &[Task], catalog: &[TaskStatus], today: NaiveDate) -> TaskSummary {
    let mut summary = TaskSummary::default();
    for task in tasks {
        let terminal = task.state(catalog).is_some_and(|s| s.is_terminal());
        if !terminal {
            summary.open += 1;
            if task.courier_id.is_none() {
                summary.unassigned += 1;
            }
        }
        if task.is_overdue(catalog, today) {
            summary.overdue += 1;
        }
        *summary.by_status.entry(task.status_label(catalog)).or_default() += 1;
    }
    summary
}

/// Open tasks with the nearest due date first.
fn upcoming(tasks: &[Task], catalog: &[TaskStatus], limit: usize) -> Vec<Task> {
    let mut open: Vec<Task> = tasks
        .iter()
        .filter(|t| !t.state(catalog).is_some_and(|s| s.is_terminal()))
        .filter(|t| t.due_date.as_deref().and_then(parse_date).is_some())
        .cloned()
        .collect();
    open.sort_by_key(|t| t.due_date.as_deref().and_then(parse_date));
    open.truncate(limit);
    open
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let data = use_data();
    data.tasks.ensure_loaded();
    data.clients.ensure_loaded();
    data.users.ensure_loaded();
    data.branches.ensure_loaded();

    let summary = Memo::new(move |_| {
        let catalog = data.task_statuses.items.get();
        data.tasks
            .items
            .with(|tasks| summarize_tasks(tasks, &catalog, today()))
    });

    let count = |n: usize| Some(n as f64);

    view! {
        <PageFrame page_id="d402_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Panel general" subtitle="Resumen de la operación" />

            <div class="stat-grid">
                <StatCard
                    label="Tareas abiertas"
                    icon_name="clipboard"
                    value=Signal::derive(move || count(summary.get().open))
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Tareas vencidas"
                    icon_name="alert-triangle"
                    value=Signal::derive(move || count(summary.get().overdue))
                    format=ValueFormat::Integer
                    status=Signal::derive(move || {
                        if summary.get().overdue > 0 { IndicatorStatus::Bad } else { IndicatorStatus::Good }
                    })
                />
                <StatCard
                    label="Sin asignar"
                    icon_name="user"
                    value=Signal::derive(move || count(summary.get().unassigned))
                    format=ValueFormat::Integer
                    status=Signal::derive(move || {
                        if summary.get().unassigned > 0 { IndicatorStatus::Warning } else { IndicatorStatus::Neutral }
                    })
                />
                <StatCard
                    label="Mensajeros activos"
                    icon_name="truck"
                    value=Signal::derive(move || count(data.couriers().len()))
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Clientes"
                    icon_name="contact"
                    value=Signal::derive(move || count(data.clients.items.with(Vec::len)))
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Sucursales"
                    icon_name="building"
                    value=Signal::derive(move || count(data.branches.items.with(Vec::len)))
                    format=ValueFormat::Integer
                />
            </div>

            <div class="dashboard-grid">
                <section class="card">
                    <h2 class="card__title">"Tareas por estado"</h2>
                    <ul class="status-list">
                        {move || {
                            summary
                                .get()
                                .by_status
                                .into_iter()
                                .map(|(label, n)| view! {
                                    <li class="status-list__item">
                                        <span>{label}</span>
                                        <Badge>{n.to_string()}</Badge>
                                    </li>
                                })
                                .collect_view()
                        }}
                    </ul>
                </section>

                <section class="card">
                    <h2 class="card__title">"Próximos vencimientos"</h2>
                    {move || {
                        let catalog = data.task_statuses.items.get();
                        let list = data.tasks.items.with(|tasks| upcoming(tasks, &catalog, 8));
                        if list.is_empty() {
                            return view! { <p class="text-muted">"No hay tareas abiertas con fecha límite."</p> }.into_any();
                        }
                        let today = today();
                        view! {
                            <ul class="upcoming-list">
                                {list
                                    .into_iter()
                                    .map(|t| {
                                        let overdue = t.is_overdue(&catalog, today);
                                        view! {
                                            <li class="upcoming-list__item" class:upcoming-list__item--overdue=overdue>
                                                <span class="upcoming-list__date">{format_opt_date(t.due_date.as_deref())}</span>
                                                <span class="upcoming-list__title">{format!("#{} {}", t.id, t.title)}</span>
                                                <span class="text-muted">{data.user_name(t.courier_id)}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                            <A href="/tareas">"Ver todas las tareas"</A>
                        }
                            .into_any()
                    }}
                </section>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Vec<TaskStatus> {
        serde_json::from_value(json!([
            {"id_estado": 1, "nombre_estado": "Pendiente"},
            {"id_estado": 3, "nombre_estado": "En progreso"},
            {"id_estado": 4, "nombre_estado": "Completada"}
        ]))
        .unwrap()
    }

    fn tasks() -> Vec<Task> {
        serde_json::from_value(json!([
            {"id_tarea": 1, "titulo": "A", "id_estado": 1, "fecha_limite": "2024-05-01"},
            {"id_tarea": 2, "titulo": "B", "id_estado": 3, "id_mensajero": 7, "fecha_limite": "2024-05-20"},
            {"id_tarea": 3, "titulo": "C", "id_estado": 4, "fecha_limite": "2024-04-01"},
            {"id_tarea": 4, "titulo": "D", "id_estado": 1}
        ]))
        .unwrap()
    }

    #[test]
    fn test_summarize_tasks() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let s = summarize_tasks(&tasks(), &catalog(), today);
        assert_eq!(s.open, 3);
        assert_eq!(s.overdue, 1);
        assert_eq!(s.unassigned, 2);
        assert_eq!(s.by_status.get("Pendiente"), Some(&2));
        assert_eq!(s.by_status.get("Completada"), Some(&1));
    }

    #[test]
    fn test_upcoming_skips_closed_and_undated() {
        let ids: Vec<i64> = upcoming(&tasks(), &catalog(), 5).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
