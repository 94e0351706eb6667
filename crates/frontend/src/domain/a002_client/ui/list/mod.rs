use std::cmp::Ordering;

use contracts::domain::a002_client::Client;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_client::ui::details::ClientDetails;
use crate::shared::components::form::{id_value, parse_id};
use crate::shared::components::modal::confirm;
use crate::shared::data::use_data;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, sort_list, Sortable, SortableHeader};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;

impl Sortable for Client {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "document" => cmp_text(self.document.as_deref(), other.document.as_deref()),
            "phone" => cmp_text(self.phone.as_deref(), other.phone.as_deref()),
            "address" => cmp_text(self.address.as_deref(), other.address.as_deref()),
            _ => cmp_text(Some(&self.name), Some(&other.name)),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ClientList() -> impl IntoView {
    let data = use_data();
    let clients = data.clients;
    clients.ensure_loaded();
    data.branches.ensure_loaded();

    let query = RwSignal::new(String::new());
    let branch_filter = RwSignal::new(String::new());
    let sort_field = RwSignal::new("name".to_string());
    let sort_ascending = RwSignal::new(true);
    let editing = RwSignal::new(None::<Option<Client>>);

    let rows = Memo::new(move |_| {
        let q = query.get();
        let branch = parse_id(&branch_filter.get());
        let mut list: Vec<Client> = clients
            .items
            .get()
            .into_iter()
            .filter(|c| c.matches(&q))
            .filter(|c| branch.is_none() || c.branch_id == branch)
            .collect();
        sort_list(&mut list, &sort_field.get(), sort_ascending.get());
        list
    });

    let handle_delete = move |client: Client| {
        if !confirm(&format!("¿Eliminar el cliente «{}»?", client.name)) {
            return;
        }
        spawn_local(async move {
            let _ = clients.remove(client.id).await;
        });
    };

    view! {
        <PageFrame page_id="a002_client--list" category=PAGE_CAT_LIST>
            <PageHeader title="Clientes">
                <Badge>{move || rows.with(Vec::len).to_string()}</Badge>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                    {icon("plus")}
                    " Nuevo cliente"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| clients.load()>
                    {icon("refresh")}
                    " Actualizar"
                </Button>
            </PageHeader>

            <Flex class="page__toolbar" align=FlexAlign::Center>
                <Input value=query placeholder="Buscar por nombre, documento, teléfono o dirección" />
                <select
                    class="form__select"
                    prop:value=move || branch_filter.get()
                    on:change=move |ev| branch_filter.set(event_target_value(&ev))
                >
                    <option value="">"Todas las sucursales"</option>
                    {move || {
                        data.branches
                            .items
                            .get()
                            .into_iter()
                            .map(|b| view! { <option value=id_value(Some(b.id))>{b.name}</option> })
                            .collect_view()
                    }}
                </select>
            </Flex>

            {move || clients.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            {move || (clients.loading.get() && !clients.loaded.get()).then(|| view! { <Spinner /> })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <SortableHeader label="Nombre" field="name" sort_field sort_ascending />
                        <SortableHeader label="Documento" field="document" sort_field sort_ascending />
                        <SortableHeader label="Teléfono" field="phone" sort_field sort_ascending />
                        <SortableHeader label="Dirección" field="address" sort_field sort_ascending />
                        <TableHeaderCell>"Sucursal"</TableHeaderCell>
                        <TableHeaderCell>"Ubicación"</TableHeaderCell>
                        <TableHeaderCell>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|client| {
                                let for_edit = client.clone();
                                let for_delete = client.clone();
                                let pending = client.id < 0;
                                let branch_name = data.branch_name(client.branch_id);
                                let name = client.name.clone();
                                let inactive = !client.active;
                                let document = client.document.clone().unwrap_or_default();
                                let phone = client.phone.clone().unwrap_or_default();
                                let address = client.address.clone().unwrap_or_default();
                                let location = client.location();
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
                                                {inactive
                                                    .then(|| view! { <Badge color=BadgeColor::Subtle>"Inactivo"</Badge> })}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{document}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{phone}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{address}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{branch_name}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {location.map(|p| view! {
                                                    <a href=p.maps_url() target="_blank" rel="noopener" title=p.to_display()>
                                                        {icon("map-pin")}
                                                    </a>
                                                })}
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
                        <ClientDetails
                            initial=initial
                            on_close=Callback::new(move |_| editing.set(None))
                        />
                    }
                })
            }}
        </PageFrame>
    }
}
