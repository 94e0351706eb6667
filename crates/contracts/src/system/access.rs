//! Route table and role gating.
//!
//! Every page of the dashboard is listed once in [`AppRoute`]; the router,
//! the sidebar and the `ProtectedRoute` guard all read from here.

use super::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Dashboard,
    Branches,
    Clients,
    Categories,
    TaskTypes,
    Users,
    Tasks,
    Tracking,
    Performance,
    MyTasks,
}

/// Sidebar groups, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuSection {
    Overview,
    Catalogs,
    Operations,
    Analytics,
}

impl MenuSection {
    pub fn label(&self) -> &'static str {
        match self {
            MenuSection::Overview => "General",
            MenuSection::Catalogs => "Catálogos",
            MenuSection::Operations => "Operación",
            MenuSection::Analytics => "Análisis",
        }
    }
}

pub const LOGIN_PATH: &str = "/login";

impl AppRoute {
    pub const ALL: [AppRoute; 10] = [
        AppRoute::Dashboard,
        AppRoute::Branches,
        AppRoute::Clients,
        AppRoute::Categories,
        AppRoute::TaskTypes,
        AppRoute::Users,
        AppRoute::Tasks,
        AppRoute::Tracking,
        AppRoute::Performance,
        AppRoute::MyTasks,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            AppRoute::Dashboard => "/dashboard",
            AppRoute::Branches => "/sucursales",
            AppRoute::Clients => "/clientes",
            AppRoute::Categories => "/categorias",
            AppRoute::TaskTypes => "/tipos-tarea",
            AppRoute::Users => "/usuarios",
            AppRoute::Tasks => "/tareas",
            AppRoute::Tracking => "/seguimiento",
            AppRoute::Performance => "/rendimiento",
            AppRoute::MyTasks => "/mis-tareas",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppRoute::Dashboard => "Panel",
            AppRoute::Branches => "Sucursales",
            AppRoute::Clients => "Clientes",
            AppRoute::Categories => "Categorías",
            AppRoute::TaskTypes => "Tipos de tarea",
            AppRoute::Users => "Usuarios",
            AppRoute::Tasks => "Tareas",
            AppRoute::Tracking => "Seguimiento",
            AppRoute::Performance => "Rendimiento",
            AppRoute::MyTasks => "Mis tareas",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AppRoute::Dashboard => "layout-dashboard",
            AppRoute::Branches => "building",
            AppRoute::Clients => "contact",
            AppRoute::Categories => "layers",
            AppRoute::TaskTypes => "list",
            AppRoute::Users => "users",
            AppRoute::Tasks => "clipboard",
            AppRoute::Tracking => "map-pin",
            AppRoute::Performance => "bar-chart",
            AppRoute::MyTasks => "clipboard",
        }
    }

    pub fn section(&self) -> MenuSection {
        match self {
            AppRoute::Dashboard | AppRoute::MyTasks => MenuSection::Overview,
            AppRoute::Branches
            | AppRoute::Clients
            | AppRoute::Categories
            | AppRoute::TaskTypes
            | AppRoute::Users => MenuSection::Catalogs,
            AppRoute::Tasks | AppRoute::Tracking => MenuSection::Operations,
            AppRoute::Performance => MenuSection::Analytics,
        }
    }

    pub fn allowed_roles(&self) -> &'static [Role] {
        use Role::*;
        match self {
            AppRoute::Dashboard => &[Administrador, Supervisor],
            AppRoute::Branches
            | AppRoute::Categories
            | AppRoute::TaskTypes
            | AppRoute::Users => &[Administrador],
            AppRoute::Clients => &[Administrador, Asesor],
            AppRoute::Tasks | AppRoute::Tracking => &[Administrador, Asesor, Supervisor],
            AppRoute::Performance => &[Administrador, Supervisor],
            AppRoute::MyTasks => &[Mensajero],
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    pub fn from_path(path: &str) -> Option<AppRoute> {
        let trimmed = path.trim_end_matches('/');
        AppRoute::ALL.into_iter().find(|r| r.path() == trimmed)
    }
}

/// Landing page after login or when a role opens a page it cannot see.
pub fn home_for(role: Role) -> AppRoute {
    match role {
        Role::Administrador => AppRoute::Dashboard,
        Role::Asesor => AppRoute::Tasks,
        Role::Supervisor => AppRoute::Tracking,
        Role::Mensajero => AppRoute::MyTasks,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
    RedirectTo(&'static str),
}

/// Decide what the guard does for `route` given the session role
/// (`None` when nobody is logged in).
pub fn check_access(role: Option<Role>, route: AppRoute) -> Access {
    match role {
        None => Access::RedirectToLogin,
        Some(role) if route.allows(role) => Access::Granted,
        Some(role) => Access::RedirectTo(home_for(role).path()),
    }
}

/// Sidebar entries for a role, grouped by section in display order.
pub fn menu_for(role: Role) -> Vec<(MenuSection, Vec<AppRoute>)> {
    let sections = [
        MenuSection::Overview,
        MenuSection::Catalogs,
        MenuSection::Operations,
        MenuSection::Analytics,
    ];
    sections
        .into_iter()
        .filter_map(|section| {
            let items: Vec<AppRoute> = AppRoute::ALL
                .into_iter()
                .filter(|r| r.section() == section && r.allows(role))
                .collect();
            if items.is_empty() {
                None
            } else {
                Some((section, items))
            }
        })
        .collect()
}

/// Collections held by the client-side data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Branches,
    Clients,
    Categories,
    TaskTypes,
    Users,
    Tasks,
    Roles,
    TaskStatuses,
}

/// Datasets fetched right after login for a role.
///
/// Couriers get their task list from a dedicated endpoint, so `Tasks` is
/// deliberately absent for them.
pub fn preload_for(role: Role) -> &'static [Dataset] {
    use Dataset::*;
    match role {
        Role::Administrador => &[
            Branches,
            Clients,
            Categories,
            TaskTypes,
            Users,
            Tasks,
            Roles,
            TaskStatuses,
        ],
        Role::Asesor => &[
            Branches,
            Clients,
            Categories,
            TaskTypes,
            Users,
            Tasks,
            Roles,
            TaskStatuses,
        ],
        Role::Supervisor => &[Branches, Clients, TaskTypes, Users, Tasks, Roles, TaskStatuses],
        Role::Mensajero => &[TaskStatuses],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_home_is_allowed() {
        for role in Role::ALL {
            assert!(home_for(role).allows(role), "{role} home not allowed");
        }
    }

    #[test]
    fn test_check_access() {
        assert_eq!(check_access(None, AppRoute::Tasks), Access::RedirectToLogin);
        assert_eq!(
            check_access(Some(Role::Administrador), AppRoute::Users),
            Access::Granted
        );
        assert_eq!(
            check_access(Some(Role::Mensajero), AppRoute::Users),
            Access::RedirectTo("/mis-tareas")
        );
        assert_eq!(
            check_access(Some(Role::Asesor), AppRoute::Performance),
            Access::RedirectTo("/tareas")
        );
    }

    #[test]
    fn test_courier_sees_only_own_tasks() {
        let menu = menu_for(Role::Mensajero);
        assert_eq!(menu, vec![(MenuSection::Overview, vec![AppRoute::MyTasks])]);
    }

    #[test]
    fn test_admin_menu_has_catalogs() {
        let menu = menu_for(Role::Administrador);
        let catalogs = menu
            .iter()
            .find(|(s, _)| *s == MenuSection::Catalogs)
            .map(|(_, items)| items.clone())
            .unwrap();
        assert_eq!(
            catalogs,
            vec![
                AppRoute::Branches,
                AppRoute::Clients,
                AppRoute::Categories,
                AppRoute::TaskTypes,
                AppRoute::Users
            ]
        );
        assert!(!menu.iter().any(|(_, items)| items.contains(&AppRoute::MyTasks)));
    }

    #[test]
    fn test_paths_are_unique_and_resolvable() {
        for route in AppRoute::ALL {
            assert_eq!(AppRoute::from_path(route.path()), Some(route));
        }
        assert_eq!(AppRoute::from_path("/tareas/"), Some(AppRoute::Tasks));
        assert_eq!(AppRoute::from_path("/nada"), None);
    }

    #[test]
    fn test_courier_preloads_only_statuses() {
        assert_eq!(preload_for(Role::Mensajero), &[Dataset::TaskStatuses]);
        assert!(preload_for(Role::Administrador).contains(&Dataset::Roles));
        assert!(!preload_for(Role::Supervisor).contains(&Dataset::Categories));
    }
}
