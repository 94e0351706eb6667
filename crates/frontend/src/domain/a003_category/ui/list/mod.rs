use std::cmp::Ordering;

use contracts::domain::a003_category::Category;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_category::ui::details::CategoryDetails;
use crate::shared::components::modal::confirm;
use crate::shared::data::use_data;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, sort_list, Sortable, SortableHeader};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;

impl Sortable for Category {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "description" => cmp_text(self.description.as_deref(), other.description.as_deref()),
            _ => cmp_text(Some(&self.name), Some(&other.name)),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn CategoryList() -> impl IntoView {
    let data = use_data();
    let categories = data.categories;
    categories.ensure_loaded();
    data.task_types.ensure_loaded();

    let sort_field = RwSignal::new("name".to_string());
    let sort_ascending = RwSignal::new(true);
    let editing = RwSignal::new(None::<Option<Category>>);

    let rows = Memo::new(move |_| {
        let mut list = categories.items.get();
        sort_list(&mut list, &sort_field.get(), sort_ascending.get());
        list
    });

    let types_in = move |id: i64| {
        data.task_types
            .items
            .with(|types| types.iter().filter(|t| t.category_id == Some(id)).count())
    };

    let handle_delete = move |category: Category| {
        let in_use = types_in(category.id);
        let message = if in_use > 0 {
            format!(
                "La categoría «{}» tiene {} tipos de tarea. ¿Eliminarla de todos modos?",
                category.name, in_use
            )
        } else {
            format!("¿Eliminar la categoría «{}»?", category.name)
        };
        if !confirm(&message) {
            return;
        }
        spawn_local(async move {
            let _ = categories.remove(category.id).await;
        });
    };

    view! {
        <PageFrame page_id="a003_category--list" category=PAGE_CAT_LIST>
            <PageHeader title="Categorías" subtitle="Agrupan los tipos de tarea">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                    {icon("plus")}
                    " Nueva categoría"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| categories.load()>
                    {icon("refresh")}
                    " Actualizar"
                </Button>
            </PageHeader>

            {move || categories.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <SortableHeader label="Nombre" field="name" sort_field sort_ascending />
                        <SortableHeader label="Descripción" field="description" sort_field sort_ascending />
                        <TableHeaderCell>"Tipos de tarea"</TableHeaderCell>
                        <TableHeaderCell>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|category| {
                                let for_edit = category.clone();
                                let for_delete = category.clone();
                                let id = category.id;
                                let pending = id < 0;
                                let name = category.name.clone();
                                let description = category.description.clone().unwrap_or_default();
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
                                            <TableCellLayout>{description}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <Badge color=BadgeColor::Informative>{move || types_in(id).to_string()}</Badge>
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
                        <CategoryDetails
                            initial=initial
                            on_close=Callback::new(move |_| editing.set(None))
                        />
                    }
                })
            }}
        </PageFrame>
    }
}
