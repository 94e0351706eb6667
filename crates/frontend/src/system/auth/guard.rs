use contracts::system::access::{check_access, Access, AppRoute, LOGIN_PATH};
use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth;

/// Renders `children` only when the session role may open `route`.
///
/// Without a session the user is sent to `/login`; with the wrong role,
/// to the home page of their role.
#[component]
pub fn ProtectedRoute(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let decision = Memo::new(move |_| auth_state.with(|s| check_access(s.role(), route)));

    move || match decision.get() {
        Access::Granted => children().into_any(),
        Access::RedirectToLogin => view! { <Redirect path=LOGIN_PATH /> }.into_any(),
        Access::RedirectTo(home) => {
            log::debug!("{} not allowed for this role, going to {}", route.path(), home);
            view! { <Redirect path=home /> }.into_any()
        }
    }
}
