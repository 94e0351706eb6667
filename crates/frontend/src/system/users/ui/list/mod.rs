use std::cmp::Ordering;

use contracts::system::roles::{Role, RoleRecord};
use contracts::system::users::User;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::modal::confirm;
use crate::shared::data::use_data;
use crate::shared::date_utils::format_opt_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, sort_list, Sortable, SortableHeader};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::context::use_auth;
use crate::system::users::ui::details::UserDetails;

impl Sortable for User {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "email" => cmp_text(Some(&self.email), Some(&other.email)),
            "role" => self.role_id.cmp(&other.role_id),
            "active" => other.active.cmp(&self.active),
            "created_at" => cmp_text(self.created_at.as_deref(), other.created_at.as_deref()),
            _ => cmp_text(Some(&self.display_name()), Some(&other.display_name())),
        }
    }
}

fn role_color(role: Option<Role>) -> BadgeColor {
    match role {
        Some(Role::Administrador) => BadgeColor::Brand,
        Some(Role::Supervisor) => BadgeColor::Important,
        Some(Role::Asesor) => BadgeColor::Informative,
        Some(Role::Mensajero) => BadgeColor::Success,
        None => BadgeColor::Subtle,
    }
}

fn role_label(user: &User, catalog: &[RoleRecord]) -> String {
    match user.resolve_role(catalog) {
        Some(role) => role.as_str().to_string(),
        None => user
            .role_id
            .and_then(|id| catalog.iter().find(|r| r.id == id))
            .map(|r| r.name.clone())
            .unwrap_or_else(|| "Sin rol".to_string()),
    }
}

#[component]
#[allow(non_snake_case)]
pub fn UserList() -> impl IntoView {
    let data = use_data();
    let users = data.users;
    users.ensure_loaded();
    data.branches.ensure_loaded();
    let (auth_state, _) = use_auth();
    let me = move || auth_state.with(|s| s.user_id());

    let query = RwSignal::new(String::new());
    let role_filter = RwSignal::new(String::new());
    let sort_field = RwSignal::new("name".to_string());
    let sort_ascending = RwSignal::new(true);
    let editing = RwSignal::new(None::<Option<User>>);

    let rows = Memo::new(move |_| {
        let q = query.get().trim().to_lowercase();
        let role: Option<Role> = role_filter.get().parse().ok();
        let catalog = data.roles.items.get();
        let mut list: Vec<User> = users
            .items
            .get()
            .into_iter()
            .filter(|u| {
                q.is_empty()
                    || u.display_name().to_lowercase().contains(&q)
                    || u.email.to_lowercase().contains(&q)
            })
            .filter(|u| role.is_none() || u.resolve_role(&catalog) == role)
            .collect();
        sort_list(&mut list, &sort_field.get(), sort_ascending.get());
        list
    });

    let handle_delete = move |user: User| {
        if !confirm(&format!("¿Eliminar el usuario «{}»?", user.display_name())) {
            return;
        }
        spawn_local(async move {
            let _ = users.remove(user.id).await;
        });
    };

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <PageHeader title="Usuarios">
                <Badge>{move || rows.with(Vec::len).to_string()}</Badge>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| editing.set(Some(None))>
                    {icon("plus")}
                    " Nuevo usuario"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| {
                        users.load();
                        data.roles.load();
                    }
                >
                    {icon("refresh")}
                    " Actualizar"
                </Button>
            </PageHeader>

            <Flex class="page__toolbar" align=FlexAlign::Center>
                <Input value=query placeholder="Buscar por nombre o correo" />
                <select
                    class="form__select"
                    prop:value=move || role_filter.get()
                    on:change=move |ev| role_filter.set(event_target_value(&ev))
                >
                    <option value="">"Todos los roles"</option>
                    {Role::ALL
                        .iter()
                        .map(|r| view! { <option value=r.as_str()>{r.as_str()}</option> })
                        .collect_view()}
                </select>
            </Flex>

            {move || users.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            {move || (users.loading.get() && !users.loaded.get()).then(|| view! { <Spinner /> })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <SortableHeader label="Nombre" field="name" sort_field sort_ascending />
                        <SortableHeader label="Correo" field="email" sort_field sort_ascending />
                        <TableHeaderCell>"Teléfono"</TableHeaderCell>
                        <SortableHeader label="Rol" field="role" sort_field sort_ascending />
                        <TableHeaderCell>"Sucursal"</TableHeaderCell>
                        <SortableHeader label="Estado" field="active" sort_field sort_ascending />
                        <SortableHeader label="Creado" field="created_at" sort_field sort_ascending />
                        <TableHeaderCell>"Acciones"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let catalog = data.roles.items.get();
                        let current = me();
                        rows.get()
                            .into_iter()
                            .map(|user| {
                                let for_edit = user.clone();
                                let for_delete = user.clone();
                                let pending = user.id < 0;
                                let locked = pending || Some(user.id) == current;
                                let role = user.resolve_role(&catalog);
                                let role_text = role_label(&user, &catalog);
                                let name = user.display_name();
                                let email = user.email.clone();
                                let phone = user.phone.clone().unwrap_or_default();
                                let branch = data.branch_name(user.branch_id);
                                let active = user.active;
                                let created = format_opt_date(user.created_at.as_deref());
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
                                            <TableCellLayout>{email}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{phone}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <Badge color=role_color(role)>{role_text}</Badge>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{branch}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {if active {
                                                    view! { <Badge color=BadgeColor::Success>"Activo"</Badge> }.into_any()
                                                } else {
                                                    view! { <Badge color=BadgeColor::Subtle>"Inactivo"</Badge> }.into_any()
                                                }}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{created}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    disabled=locked
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
                        <UserDetails
                            initial=initial
                            on_close=Callback::new(move |_| editing.set(None))
                        />
                    }
                })
            }}
        </PageFrame>
    }
}
