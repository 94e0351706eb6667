use std::cell::Cell;

use contracts::shared::error::ApiError;
use contracts::system::auth::SessionUser;
use contracts::system::roles::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

impl AuthState {
    fn from_storage() -> Self {
        match (storage::get_token(), storage::get_user()) {
            (Some(token), Some(user)) => Self {
                token: Some(token),
                user: Some(user),
            },
            _ => Self::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.token.as_ref().and(self.user.as_ref()).map(|u| u.role)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }
}

thread_local! {
    // Lets the HTTP layer end the session without a reactive owner.
    static SESSION_WRITER: Cell<Option<WriteSignal<AuthState>>> = const { Cell::new(None) };
}

/// Drop the session after the backend rejected the token.
pub fn expire_session() {
    storage::clear_session();
    SESSION_WRITER.with(|cell| {
        if let Some(set_auth_state) = cell.get() {
            set_auth_state.set(AuthState::default());
        }
    });
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    // Cached session renders immediately; `/auth/me` confirms it below.
    let (auth_state, set_auth_state) = signal(AuthState::from_storage());
    SESSION_WRITER.with(|cell| cell.set(Some(set_auth_state)));

    if auth_state.get_untracked().token.is_some() {
        spawn_local(async move {
            match api::get_current_user().await {
                Ok(user) if user.active => {
                    storage::save_user(&user);
                    set_auth_state.update(|state| state.user = Some(user));
                }
                Ok(user) => {
                    log::warn!("Stored session belongs to inactive user {}", user.id);
                    expire_session();
                }
                Err(e) => {
                    log::warn!("Stored session rejected: {}", e);
                    expire_session();
                }
            }
        });
    }

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Helper: Perform login
pub async fn do_login(
    set_auth_state: WriteSignal<AuthState>,
    email: String,
    password: String,
) -> Result<SessionUser, ApiError> {
    let response = api::login(email, password).await?;

    if !response.user.active {
        log::info!("Login refused for inactive user {}", response.user.id);
        return Err(ApiError::Validation(
            "El usuario está inactivo. Contacte al administrador.".to_string(),
        ));
    }

    storage::save_session(&response.token, &response.user);
    set_auth_state.set(AuthState {
        token: Some(response.token),
        user: Some(response.user.clone()),
    });

    log::info!("User {} logged in as {}", response.user.id, response.user.role);
    Ok(response.user)
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_session();
    set_auth_state.set(AuthState::default());
}
