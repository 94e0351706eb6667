//! TopHeader component - application top navigation bar.
//!
//! Contains the sidebar toggle, the application title, the signed-in user
//! and the logout button.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use contracts::system::access::LOGIN_PATH;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();
    let navigate = use_navigate();

    let is_sidebar_visible = move || ctx.left_open.get();

    let logout = move |_| {
        do_logout(set_auth_state);
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"SGR · Gestión de Rutas"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    <span class="top-header__avatar">
                        {move || auth_state.with(|s| s.user.as_ref().map(|u| u.initials()).unwrap_or_default())}
                    </span>
                    <div class="top-header__user-text">
                        <span>
                            {move || auth_state.with(|s| s.user.as_ref().map(|u| u.display_name()).unwrap_or_default())}
                        </span>
                        <span class="top-header__role">
                            {move || auth_state.with(|s| s.role().map(|r| r.as_str()).unwrap_or_default())}
                        </span>
                    </div>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Cerrar sesión">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
