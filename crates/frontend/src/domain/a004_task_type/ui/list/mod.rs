use std::cmp::Ordering;

use contracts::domain::a004_task_type::TaskType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_task_type::ui::details::TaskTypeDetails;
use crate::shared::components::modal::confirm;
use crate::shared::data::use_data;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, sort_list, Sortable, SortableHeader};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;

impl Sortable for TaskType {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "minutes" => self
                .estimated_minutes
                .partial_cmp(&other.estimated_minutes)
                .unwrap_or(Ordering::Equal),
            "category" => self.category_id.cmp(&other.category_id),
            _ => cmp_text(Some(&self.name), Some(&other.name)),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn TaskTypeList() -> impl IntoView {
    let data = use_data();
    let task_types = data.task_types;
    task_types.ensure_loaded();
    data.categories.ensure_loaded();

    let sort_field = RwSignal::new("name".to_string());
    let sort_ascending = RwSignal::new(true);
    let editing = RwSignal::new(None::<Option<TaskType>>);

    let rows = Memo::new(move |_| {
        let mut list = task_types.items.get();
        sort_list(&mut list, &sort_field.get(), sort_ascending.get());
        list
    });

    let category_name = move |id: Option<i64>| {
        id.and_then(|id| data.categories.find(id))
            .map(|c| c.name)
            .unwrap_or_else(|| "—".to_string())
    };

    let handle_delete = move |task_type: TaskType| {
        if !confirm(&format!("¿Eliminar el tipo de tarea «{}»?", task_type.name)) {
            return;
        }
        spawn_local(async move {
            let _ = task_types.remove(task_type.id).await;
        });
    };

    view! {
        <PageFrame page_id="a004_task_type--list" category=PAGE_CAT_LIST>
            <PageHeader title="Tipos de tarea">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                    {icon("plus")}
                    " Nuevo tipo"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| task_types.load()>
                    {icon("refresh")}
                    " Actualizar"
                </Button>
            </PageHeader>

            {move || task_types.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <SortableHeader label="Nombre" field="name" sort_field sort_ascending />
                        <SortableHeader label="Categoría" field="category" sort_field sort_ascending />
                        <TableHeaderCell>"Descripción"</TableHeaderCell>
                        <SortableHeader label="Tiempo estimado" field="minutes" sort_field sort_ascending />
                        <TableHeaderCell>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|task_type| {
                                let for_edit = task_type.clone();
                                let for_delete = task_type.clone();
                                let pending = task_type.id < 0;
                                let category_id = task_type.category_id;
                                let name = task_type.name.clone();
                                let description = task_type.description.clone().unwrap_or_default();
                                let minutes = task_type
                                    .estimated_minutes
                                    .map(|m| format!("{m:.0} min"))
                                    .unwrap_or_else(|| "—".to_string());
                                view! {
                                    <TableRow class:table__row--pending=pending>
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
                                                    {name}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{move || category_name(category_id)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{description}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {minutes}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
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
                        <TaskTypeDetails
                            initial=initial
                            on_close=Callback::new(move |_| editing.set(None))
                        />
                    }
                })
            }}
        </PageFrame>
    }
}
