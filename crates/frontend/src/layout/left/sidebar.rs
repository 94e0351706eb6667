//! Sidebar with collapsible sections, built from the route table.

use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use contracts::system::access::{menu_for, AppRoute, MenuSection};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[component]
pub fn Sidebar() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let pathname = use_location().pathname;

    // Sections the user folded away; everything starts expanded.
    let collapsed = RwSignal::new(Vec::<MenuSection>::new());

    let menu = Memo::new(move |_| {
        auth_state
            .with(|s| s.role())
            .map(menu_for)
            .unwrap_or_default()
    });

    view! {
        <nav class="app-sidebar__content">
            <For
                each=move || menu.get()
                key=|(section, items)| (*section, items.clone())
                children=move |(section, items): (MenuSection, Vec<AppRoute>)| {
                    let is_open = move || !collapsed.get().contains(&section);
                    let toggle = move |_| {
                        collapsed.update(|list| {
                            if let Some(pos) = list.iter().position(|s| *s == section) {
                                list.remove(pos);
                            } else {
                                list.push(section);
                            }
                        });
                    };
                    view! {
                        <div class="app-sidebar__group">
                            <div class="app-sidebar__group-title" on:click=toggle>
                                <span>{section.label()}</span>
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=is_open
                                >
                                    {icon("chevron-right")}
                                </div>
                            </div>
                            <Show when=is_open>
                                <div class="app-sidebar__children">
                                    {items.iter().map(|route| {
                                        let route = *route;
                                        let is_active = move || {
                                            pathname.with(|p| AppRoute::from_path(p) == Some(route))
                                        };
                                        view! {
                                            <A href=route.path() attr:class="app-sidebar__link">
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=is_active
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon(route.icon())}
                                                        <span>{route.label()}</span>
                                                    </div>
                                                </div>
                                            </A>
                                        }
                                    }).collect_view()}
                                </div>
                            </Show>
                        </div>
                    }
                }
            />
        </nav>
    }
}
