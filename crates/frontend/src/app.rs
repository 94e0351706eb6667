use crate::layout::global_context::AppGlobalContext;
use crate::routes::AppRoutes;
use crate::shared::data::DataProvider;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Sidebar visibility and other shell state.
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <DataProvider>
                <AppRoutes />
            </DataProvider>
        </AuthProvider>
    }
}
