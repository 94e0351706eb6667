use std::cmp::Ordering;

use contracts::domain::a001_branch::Branch;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_branch::ui::details::BranchDetails;
use crate::shared::components::modal::confirm;
use crate::shared::data::use_data;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, sort_list, Sortable, SortableHeader};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;

impl Sortable for Branch {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "address" => cmp_text(self.address.as_deref(), other.address.as_deref()),
            "phone" => cmp_text(self.phone.as_deref(), other.phone.as_deref()),
            "active" => other.active.cmp(&self.active),
            _ => cmp_text(Some(&self.name), Some(&other.name)),
        }
    }
}

fn matches(branch: &Branch, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    q.is_empty()
        || branch.name.to_lowercase().contains(&q)
        || branch
            .address
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(&q))
}

#[component]
#[allow(non_snake_case)]
pub fn BranchList() -> impl IntoView {
    let branches = use_data().branches;
    branches.ensure_loaded();

    let query = RwSignal::new(String::new());
    let sort_field = RwSignal::new("name".to_string());
    let sort_ascending = RwSignal::new(true);
    // None: closed, Some(None): new, Some(Some(row)): edit.
    let editing = RwSignal::new(None::<Option<Branch>>);

    let rows = Memo::new(move |_| {
        let q = query.get();
        let mut list: Vec<Branch> = branches
            .items
            .get()
            .into_iter()
            .filter(|b| matches(b, &q))
            .collect();
        sort_list(&mut list, &sort_field.get(), sort_ascending.get());
        list
    });

    let handle_delete = move |branch: Branch| {
        if !confirm(&format!("¿Eliminar la sucursal «{}»?", branch.name)) {
            return;
        }
        spawn_local(async move {
            let _ = branches.remove(branch.id).await;
        });
    };

    view! {
        <PageFrame page_id="a001_branch--list" category=PAGE_CAT_LIST>
            <PageHeader title="Sucursales">
                <Badge>{move || rows.with(Vec::len).to_string()}</Badge>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                    {icon("plus")}
                    " Nueva sucursal"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| branches.load()>
                    {icon("refresh")}
                    " Actualizar"
                </Button>
            </PageHeader>

            <div class="page__toolbar">
                <Input value=query placeholder="Buscar por nombre o dirección" />
            </div>

            {move || branches.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            {move || {
                (branches.loading.get() && !branches.loaded.get()).then(|| view! { <Spinner /> })
            }}

            <Table>
                <TableHeader>
                    <TableRow>
                        <SortableHeader label="Nombre" field="name" sort_field sort_ascending />
                        <SortableHeader label="Dirección" field="address" sort_field sort_ascending />
                        <SortableHeader label="Teléfono" field="phone" sort_field sort_ascending />
                        <TableHeaderCell>"Ubicación"</TableHeaderCell>
                        <SortableHeader label="Estado" field="active" sort_field sort_ascending />
                        <TableHeaderCell>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || rows.get()
                        key=|b| (b.id, b.name.clone(), b.address.clone(), b.phone.clone(), b.active)
                        children=move |branch| {
                            let for_edit = branch.clone();
                            let for_delete = branch.clone();
                            let pending = branch.id < 0;
                            let name = branch.name.clone();
                            let address = branch.address.clone().unwrap_or_default();
                            let phone = branch.phone.clone().unwrap_or_default();
                            let location = branch.location();
                            let active = branch.active;
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
                                        <TableCellLayout>{address}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{phone}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            {match location {
                                                Some(p) => view! {
                                                    <a href=p.maps_url() target="_blank" rel="noopener">
                                                        {icon("map-pin")}
                                                    </a>
                                                }.into_any(),
                                                None => view! { <span class="text-muted">"—"</span> }.into_any(),
                                            }}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            {if active {
                                                view! { <Badge color=BadgeColor::Success>"Activa"</Badge> }.into_any()
                                            } else {
                                                view! { <Badge color=BadgeColor::Subtle>"Inactiva"</Badge> }.into_any()
                                            }}
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
                        }
                    />
                </TableBody>
            </Table>

            {move || {
                editing
                    .get()
                    .map(|initial| {
                        view! {
                            <BranchDetails
                                initial=initial
                                on_close=Callback::new(move |_| editing.set(None))
                            />
                        }
                    })
            }}
        </PageFrame>
    }
}
