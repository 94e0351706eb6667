//! Courier view: own tasks and the status buttons they are allowed to press.

use contracts::domain::a005_task::status::status_id_for;
use contracts::domain::a005_task::{Task, TaskState, TaskStatus};
use contracts::shared::dates::parse_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a005_task::api;
use crate::shared::data::use_data;
use crate::shared::date_utils::{format_opt_date, today};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;

fn action_label(state: TaskState) -> &'static str {
    match state {
        TaskState::EnProgreso => "Iniciar",
        TaskState::Completada => "Completar",
        other => other.label(),
    }
}

/// Open tasks first, then by due date (undated last), then newest.
fn courier_order(tasks: &mut [Task], catalog: &[TaskStatus]) {
    tasks.sort_by_key(|t| {
        let closed = t.state(catalog).is_some_and(|s| s.is_terminal());
        let due = t.due_date.as_deref().and_then(parse_date);
        (closed, due.is_none(), due, std::cmp::Reverse(t.id))
    });
}

#[component]
#[allow(non_snake_case)]
pub fn MyTasks() -> impl IntoView {
    let data = use_data();
    let tasks = data.tasks;
    let show_closed = RwSignal::new(false);
    let busy = RwSignal::new(None::<i64>);
    let action_error = RwSignal::new(None::<String>);

    let rows = Memo::new(move |_| {
        let catalog = data.task_statuses.items.get();
        let mut list: Vec<Task> = tasks
            .items
            .get()
            .into_iter()
            .filter(|t| show_closed.get() || !t.state(&catalog).is_some_and(|s| s.is_terminal()))
            .collect();
        courier_order(&mut list, &catalog);
        list
    });

    let advance = move |task_id: i64, next: TaskState| {
        let status_id = data
            .task_statuses
            .items
            .with_untracked(|catalog| status_id_for(catalog, next));
        let Some(status_id) = status_id else {
            action_error.set(Some(format!("El estado «{}» no existe en el catálogo", next.label())));
            return;
        };
        busy.set(Some(task_id));
        action_error.set(None);
        spawn_local(async move {
            match api::change_status(task_id, status_id).await {
                Ok(Some(task)) => tasks.replace(task),
                Ok(None) => tasks.load(),
                Err(e) => action_error.set(Some(e.to_string())),
            }
            busy.set(None);
        });
    };

    view! {
        <PageFrame page_id="a005_task--my_tasks" category=PAGE_CAT_LIST>
            <PageHeader title="Mis tareas" subtitle="Tareas asignadas a usted">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| show_closed.update(|v| *v = !*v)>
                    {move || if show_closed.get() { "Ocultar cerradas" } else { "Mostrar cerradas" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| tasks.load()>
                    {icon("refresh")}
                    " Actualizar"
                </Button>
            </PageHeader>

            {move || action_error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            {move || tasks.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            {move || (tasks.loading.get() && !tasks.loaded.get()).then(|| view! { <Spinner /> })}

            <div class="task-cards">
                {move || {
                    let catalog = data.task_statuses.items.get();
                    let today = today();
                    let list = rows.get();
                    if list.is_empty() && tasks.loaded.get() {
                        return view! {
                            <div class="empty-state">
                                {icon("check-circle")}
                                <p>"No tiene tareas pendientes."</p>
                            </div>
                        }
                            .into_any();
                    }
                    list.into_iter()
                        .map(|task| {
                            let state = task.state(&catalog);
                            let overdue = task.is_overdue(&catalog, today);
                            let id = task.id;
                            let badge_class = state
                                .map(|s| format!("badge {}", s.css_class()))
                                .unwrap_or_else(|| "badge".to_string());
                            let actions = state.map(|s| s.courier_next()).unwrap_or(&[]);
                            view! {
                                <div class="task-card" class:task-card--overdue=overdue>
                                    <div class="task-card__header">
                                        <span class="task-card__id">{format!("#{}", task.id)}</span>
                                        <h3 class="task-card__title">{task.title.clone()}</h3>
                                        <span class=badge_class>{task.status_label(&catalog)}</span>
                                    </div>
                                    <div class="task-card__body">
                                        {task.destination_address.clone().map(|a| view! {
                                            <p class="task-card__address">{icon("map-pin")}" "{a}</p>
                                        })}
                                        {task.description.clone().map(|d| view! { <p>{d}</p> })}
                                        <p class="task-card__meta">
                                            "Prioridad: "{task.priority.label()}
                                            " · Límite: "{format_opt_date(task.due_date.as_deref())}
                                            {overdue.then(|| view! { <Badge color=BadgeColor::Danger>"Vencida"</Badge> })}
                                        </p>
                                        {task.notes.clone().map(|n| view! { <p class="task-card__notes">{n}</p> })}
                                    </div>
                                    <div class="task-card__actions">
                                        {task.destination().map(|p| view! {
                                            <a class="button button--secondary" href=p.maps_url() target="_blank" rel="noopener">
                                                {icon("map-pin")}" Navegar"
                                            </a>
                                        })}
                                        {actions
                                            .iter()
                                            .copied()
                                            .map(|next| {
                                                view! {
                                                    <Button
                                                        appearance=ButtonAppearance::Primary
                                                        disabled=Signal::derive(move || busy.get().is_some())
                                                        on_click=move |_| advance(id, next)
                                                    >
                                                        {move || {
                                                            if busy.get() == Some(id) {
                                                                "Guardando...".to_string()
                                                            } else {
                                                                action_label(next).to_string()
                                                            }
                                                        }}
                                                    </Button>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
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
            {"id_estado": 4, "nombre_estado": "Completada"}
        ]))
        .unwrap()
    }

    fn task(id: i64, status: i64, due: Option<&str>) -> Task {
        serde_json::from_value(json!({
            "id_tarea": id,
            "titulo": format!("T{id}"),
            "id_estado": status,
            "fecha_limite": due,
        }))
        .unwrap()
    }

    #[test]
    fn test_courier_order_puts_open_and_urgent_first() {
        let mut list = vec![
            task(1, 4, Some("2024-01-01")),
            task(2, 1, None),
            task(3, 1, Some("2024-06-10")),
            task(4, 1, Some("2024-06-01")),
        ];
        courier_order(&mut list, &catalog());
        let ids: Vec<i64> = list.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(action_label(TaskState::EnProgreso), "Iniciar");
        assert_eq!(action_label(TaskState::Completada), "Completar");
    }
}
