use contracts::domain::a001_branch::Branch;
use contracts::domain::a002_client::Client;
use contracts::domain::a003_category::Category;
use contracts::domain::a004_task_type::TaskType;
use contracts::domain::a005_task::{Task, TaskStatus};
use contracts::system::access::{preload_for, Dataset};
use contracts::system::auth::SessionUser;
use contracts::system::roles::{Role, RoleRecord};
use contracts::system::users::User;
use leptos::prelude::*;

use super::collection::{Catalog, Collection};
use crate::system::auth::context::use_auth;

#[derive(Clone, Copy)]
pub struct DataContext {
    pub branches: Collection<Branch>,
    pub clients: Collection<Client>,
    pub categories: Collection<Category>,
    pub task_types: Collection<TaskType>,
    pub users: Collection<User>,
    pub tasks: Collection<Task>,
    pub roles: Catalog<RoleRecord>,
    pub task_statuses: Catalog<TaskStatus>,
}

impl DataContext {
    pub fn new() -> Self {
        Self {
            branches: Collection::new(),
            clients: Collection::new(),
            categories: Collection::new(),
            task_types: Collection::new(),
            users: Collection::new(),
            tasks: Collection::new(),
            roles: Catalog::new("/roles"),
            task_statuses: Catalog::new("/estados-tarea"),
        }
    }

    /// Fetch what the user's role works with.
    pub fn load_for(self, user: &SessionUser) {
        log::info!("Preloading data for {}", user.role);
        for dataset in preload_for(user.role) {
            match dataset {
                Dataset::Branches => self.branches.load(),
                Dataset::Clients => self.clients.load(),
                Dataset::Categories => self.categories.load(),
                Dataset::TaskTypes => self.task_types.load(),
                Dataset::Users => self.users.load(),
                Dataset::Tasks => self.tasks.load(),
                Dataset::Roles => self.roles.load(),
                Dataset::TaskStatuses => self.task_statuses.load(),
            }
        }
        if user.role == Role::Mensajero {
            self.tasks.set_source(format!("/tareas/mensajero/{}", user.id));
            self.tasks.load();
        }
    }

    pub fn clear(self) {
        self.branches.clear();
        self.clients.clear();
        self.categories.clear();
        self.task_types.clear();
        self.users.clear();
        self.tasks.clear();
        self.roles.clear();
        self.task_statuses.clear();
    }

    /// Active users whose role resolves to `role`, tracked.
    pub fn users_with_role(self, role: Role) -> Vec<User> {
        let roles = self.roles.items.get();
        self.users.items.with(|users| {
            users
                .iter()
                .filter(|u| u.active && u.resolve_role(&roles) == Some(role))
                .cloned()
                .collect()
        })
    }

    pub fn couriers(self) -> Vec<User> {
        self.users_with_role(Role::Mensajero)
    }

    pub fn user_name(self, id: Option<i64>) -> String {
        id.and_then(|id| self.users.find(id))
            .map(|u| u.display_name())
            .unwrap_or_else(|| "Sin asignar".to_string())
    }

    pub fn client_name(self, id: Option<i64>) -> String {
        id.and_then(|id| self.clients.find(id))
            .map(|c| c.name)
            .unwrap_or_else(|| "—".to_string())
    }

    pub fn branch_name(self, id: Option<i64>) -> String {
        id.and_then(|id| self.branches.find(id))
            .map(|b| b.name)
            .unwrap_or_else(|| "—".to_string())
    }
}

impl Default for DataContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides [`DataContext`] and keeps it in step with the session:
/// a new session reloads, logout clears.
#[component]
pub fn DataProvider(children: Children) -> impl IntoView {
    let data = DataContext::new();
    provide_context(data);

    let (auth_state, _) = use_auth();
    let session_key = Memo::new(move |_| {
        auth_state.with(|s| s.token.as_ref().and(s.user.as_ref()).map(|u| (u.id, u.role)))
    });

    Effect::new(move |_| {
        let key = session_key.get();
        data.clear();
        if key.is_some() {
            if let Some(user) = auth_state.get_untracked().user {
                data.load_for(&user);
            }
        }
    });

    children()
}

pub fn use_data() -> DataContext {
    use_context::<DataContext>().expect("DataProvider not found in component tree")
}
