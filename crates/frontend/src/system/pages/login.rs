use contracts::shared::validation;
use contracts::system::access::home_for;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::context::{do_login, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (auth_state, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get().trim().to_string();
        let password_val = password.get();

        if let Err(msg) = validation::email(&email_val) {
            set_error_message.set(Some(msg));
            return;
        }
        if password_val.is_empty() {
            set_error_message.set(Some("Ingrese la contraseña".to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match do_login(set_auth_state, email_val, password_val).await {
                // the redirect below reacts to the new session
                Ok(_) => set_is_loading.set(false),
                Err(e) => {
                    set_error_message.set(Some(e.to_string()));
                    set_is_loading.set(false);
                }
            }
        });
    };

    // Signed in (already, or just now): go to the role's home.
    let signed_in_home = move || auth_state.with(|s| s.role()).map(|r| home_for(r).path());

    view! {
        {move || signed_in_home().map(|path| view! { <Redirect path=path /> })}
        <PageFrame page_id="sys_login--system" category=PAGE_CAT_SYSTEM>
            <div class="login-container">
                <div class="login-box">
                    <h1>"SGR"</h1>
                    <h2>"Sistema de Gestión de Rutas"</h2>

                    <Show when=move || error_message.get().is_some()>
                        <div class="error-message" role="alert">
                            {move || error_message.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <form on:submit=on_submit>
                        <div class="form-group">
                            <label for="correo">"Correo electrónico"</label>
                            <input
                                type="email"
                                id="correo"
                                placeholder="usuario@empresa.com"
                                autocomplete="username"
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <div class="form-group">
                            <label for="contrasena">"Contraseña"</label>
                            <input
                                type="password"
                                id="contrasena"
                                autocomplete="current-password"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <button
                            type="submit"
                            class="btn-primary"
                            disabled=move || is_loading.get()
                        >
                            {move || if is_loading.get() { "Ingresando..." } else { "Ingresar" }}
                        </button>
                    </form>
                </div>
            </div>
        </PageFrame>
    }
}
