use crate::dashboards::d400_tracking::ui::TrackingPage;
use crate::dashboards::d401_performance::ui::PerformancePage;
use crate::dashboards::d402_overview::ui::OverviewDashboard;
use crate::domain::a001_branch::ui::list::BranchList;
use crate::domain::a002_client::ui::list::ClientList;
use crate::domain::a003_category::ui::list::CategoryList;
use crate::domain::a004_task_type::ui::list::TaskTypeList;
use crate::domain::a005_task::ui::list::TaskList;
use crate::domain::a005_task::ui::my_tasks::MyTasks;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::ProtectedRoute;
use crate::system::pages::login::LoginPage;
use crate::system::pages::not_found::NotFoundPage;
use crate::system::users::ui::list::UserList;
use contracts::system::access::{home_for, AppRoute, LOGIN_PATH};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

/// Guarded page inside the application shell.
#[component]
fn Page(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let children = StoredValue::new(children);
    view! {
        <ProtectedRoute route=route>
            <Shell>{children.with_value(|c| c())}</Shell>
        </ProtectedRoute>
    }
}

/// `/` sends the user to their role's home, or to the login form.
#[component]
fn HomeRedirect() -> impl IntoView {
    let (auth_state, _) = use_auth();
    move || {
        let target = auth_state
            .with(|s| s.role())
            .map(|role| home_for(role).path())
            .unwrap_or(LOGIN_PATH);
        view! { <Redirect path=target /> }
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/") view=HomeRedirect />
                <Route
                    path=path!("/dashboard")
                    view=|| view! { <Page route=AppRoute::Dashboard><OverviewDashboard /></Page> }
                />
                <Route
                    path=path!("/sucursales")
                    view=|| view! { <Page route=AppRoute::Branches><BranchList /></Page> }
                />
                <Route
                    path=path!("/clientes")
                    view=|| view! { <Page route=AppRoute::Clients><ClientList /></Page> }
                />
                <Route
                    path=path!("/categorias")
                    view=|| view! { <Page route=AppRoute::Categories><CategoryList /></Page> }
                />
                <Route
                    path=path!("/tipos-tarea")
                    view=|| view! { <Page route=AppRoute::TaskTypes><TaskTypeList /></Page> }
                />
                <Route
                    path=path!("/usuarios")
                    view=|| view! { <Page route=AppRoute::Users><UserList /></Page> }
                />
                <Route
                    path=path!("/tareas")
                    view=|| view! { <Page route=AppRoute::Tasks><TaskList /></Page> }
                />
                <Route
                    path=path!("/seguimiento")
                    view=|| view! { <Page route=AppRoute::Tracking><TrackingPage /></Page> }
                />
                <Route
                    path=path!("/rendimiento")
                    view=|| view! { <Page route=AppRoute::Performance><PerformancePage /></Page> }
                />
                <Route
                    path=path!("/mis-tareas")
                    view=|| view! { <Page route=AppRoute::MyTasks><MyTasks /></Page> }
                />
            </Routes>
        </Router>
    }
}
