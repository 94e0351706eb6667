use std::cmp::Ordering;

use contracts::domain::a005_task::{Priority, Task, TaskFilter, TaskStatus};
use contracts::shared::dates::parse_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a005_task::ui::details::TaskDetails;
use crate::shared::components::form::{id_value, parse_id};
use crate::shared::components::modal::confirm;
use crate::shared::data::use_data;
use crate::shared::date_utils::{format_opt_date, today};
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, sort_list, Sortable, SortableHeader};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;

impl Sortable for Task {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "title" => cmp_text(Some(&self.title), Some(&other.title)),
            "priority" => other.priority.cmp(&self.priority),
            "due" => {
                let a = self.due_date.as_deref().and_then(parse_date);
                let b = other.due_date.as_deref().and_then(parse_date);
                match (a, b) {
                    (Some(a), Some(b)) => a.cmp(&b),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
            "status" => self.status_id.cmp(&other.status_id),
            _ => other.id.cmp(&self.id),
        }
    }
}

fn status_badge(task: &Task, catalog: &[TaskStatus]) -> impl IntoView {
    let class = task
        .state(catalog)
        .map(|s| format!("badge {}", s.css_class()))
        .unwrap_or_else(|| "badge".to_string());
    view! { <span class=class>{task.status_label(catalog)}</span> }
}

fn priority_color(priority: Priority) -> BadgeColor {
    match priority {
        Priority::Baja => BadgeColor::Subtle,
        Priority::Media => BadgeColor::Informative,
        Priority::Alta => BadgeColor::Warning,
        Priority::Urgente => BadgeColor::Danger,
    }
}

#[component]
#[allow(non_snake_case)]
pub fn TaskList() -> impl IntoView {
    let data = use_data();
    let tasks = data.tasks;
    tasks.ensure_loaded();
    data.clients.ensure_loaded();
    data.users.ensure_loaded();

    let query = RwSignal::new(String::new());
    let status_filter = RwSignal::new(String::new());
    let courier_filter = RwSignal::new(String::new());
    let priority_filter = RwSignal::new(String::new());
    let sort_field = RwSignal::new("id".to_string());
    let sort_ascending = RwSignal::new(true);
    let editing = RwSignal::new(None::<Option<Task>>);

    let filter = Memo::new(move |_| TaskFilter {
        query: query.get(),
        status_id: parse_id(&status_filter.get()),
        courier_id: parse_id(&courier_filter.get()),
        priority: priority_filter.get().parse().ok(),
    });

    let rows = Memo::new(move |_| {
        let filter = filter.get();
        let mut list: Vec<Task> = tasks
            .items
            .get()
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();
        sort_list(&mut list, &sort_field.get(), sort_ascending.get());
        list
    });

    let overdue_count = Memo::new(move |_| {
        let today = today();
        data.task_statuses.items.with(|catalog| {
            rows.with(|list| list.iter().filter(|t| t.is_overdue(catalog, today)).count())
        })
    });

    let clear_filters = move |_| {
        query.set(String::new());
        status_filter.set(String::new());
        courier_filter.set(String::new());
        priority_filter.set(String::new());
    };

    let handle_delete = move |task: Task| {
        if !confirm(&format!("¿Eliminar la tarea #{} «{}»?", task.id, task.title)) {
            return;
        }
        spawn_local(async move {
            let _ = tasks.remove(task.id).await;
        });
    };

    view! {
        <PageFrame page_id="a005_task--list" category=PAGE_CAT_LIST>
            <PageHeader title="Tareas">
                <Badge>{move || rows.with(Vec::len).to_string()}</Badge>
                {move || {
                    let n = overdue_count.get();
                    (n > 0).then(|| view! { <Badge color=BadgeColor::Danger>{format!("{n} vencidas")}</Badge> })
                }}
                <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                    {icon("plus")}
                    " Nueva tarea"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| tasks.load()>
                    {icon("refresh")}
                    " Actualizar"
                </Button>
            </PageHeader>

            <Flex class="page__toolbar" align=FlexAlign::Center>
                <Input value=query placeholder="Buscar por título, descripción, dirección o número" />
                <select
                    class="form__select"
                    prop:value=move || status_filter.get()
                    on:change=move |ev| status_filter.set(event_target_value(&ev))
                >
                    <option value="">"Todos los estados"</option>
                    {move || {
                        data.task_statuses
                            .items
                            .get()
                            .into_iter()
                            .map(|s| view! { <option value=s.id.to_string()>{s.name}</option> })
                            .collect_view()
                    }}
                </select>
                <select
                    class="form__select"
                    prop:value=move || courier_filter.get()
                    on:change=move |ev| courier_filter.set(event_target_value(&ev))
                >
                    <option value="">"Todos los mensajeros"</option>
                    {move || {
                        data.couriers()
                            .into_iter()
                            .map(|u| view! { <option value=id_value(Some(u.id))>{u.display_name()}</option> })
                            .collect_view()
                    }}
                </select>
                <select
                    class="form__select"
                    prop:value=move || priority_filter.get()
                    on:change=move |ev| priority_filter.set(event_target_value(&ev))
                >
                    <option value="">"Todas las prioridades"</option>
                    {Priority::ALL
                        .iter()
                        .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                        .collect_view()}
                </select>
                <Show when=move || !filter.with(TaskFilter::is_empty)>
                    <Button appearance=ButtonAppearance::Subtle on_click=clear_filters>
                        {icon("x")}
                        " Limpiar filtros"
                    </Button>
                </Show>
            </Flex>

            {move || tasks.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            {move || (tasks.loading.get() && !tasks.loaded.get()).then(|| view! { <Spinner /> })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <SortableHeader label="#" field="id" sort_field sort_ascending />
                        <SortableHeader label="Título" field="title" sort_field sort_ascending />
                        <TableHeaderCell>"Cliente"</TableHeaderCell>
                        <TableHeaderCell>"Mensajero"</TableHeaderCell>
                        <SortableHeader label="Estado" field="status" sort_field sort_ascending />
                        <SortableHeader label="Prioridad" field="priority" sort_field sort_ascending />
                        <SortableHeader label="Fecha límite" field="due" sort_field sort_ascending />
                        <TableHeaderCell>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let catalog = data.task_statuses.items.get();
                        let today = today();
                        rows.get()
                            .into_iter()
                            .map(|task| {
                                let for_edit = task.clone();
                                let for_delete = task.clone();
                                let pending = task.id < 0;
                                let overdue = task.is_overdue(&catalog, today);
                                let number = if pending { "…".to_string() } else { task.id.to_string() };
                                let title = task.title.clone();
                                let client = data.client_name(task.client_id);
                                let courier = data.user_name(task.courier_id);
                                let status = status_badge(&task, &catalog);
                                let priority = task.priority;
                                let due = format_opt_date(task.due_date.as_deref());
                                let destination = task.destination();
                                view! {
                                    <TableRow class:table__row--pending=pending class:table__row--overdue=overdue>
                                        <TableCell>
                                            <TableCellLayout>
                                                {number}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <a
                                                    href="#"
                                                    class="table__link"
                                                    on:click=move |e| {
                                                        e.prevent_default();
                                                        if !pending {
                                                            editing.set(Some(Some(for_edit.clone())));
                                                        }
                                                    }
                                                >
                                                    {title}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{client}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{courier}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{status}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <Badge color=priority_color(priority)>{priority.label()}</Badge>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {due}
                                                {overdue.then(|| view! { <Badge color=BadgeColor::Danger>"Vencida"</Badge> })}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {destination.map(|p| view! {
                                                    <a href=p.maps_url() target="_blank" rel="noopener" title="Ver destino">
                                                        {icon("map-pin")}
                                                    </a>
                                                })}
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    disabled=pending
                                                    on_click=move |_| handle_delete(for_delete.clone())
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            })
                            .collect_view()
                    }}
                </TableBody>
            </Table>

            {move || {
                editing.get().map(|initial| {
                    view! {
                        <TaskDetails
                            initial=initial
                            on_close=Callback::new(move |_| editing.set(None))
                        />
                    }
                })
            }}
        </PageFrame>
    }
}
