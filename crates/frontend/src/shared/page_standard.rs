//! Page category constants.
//!
//! Every page declares an HTML `id` in the format `{entity}--{category}`
//! (e.g. `"a002_client--list"`) and `data-page-category` with one of the
//! constants below, so a DOM id leads straight to its source directory.

/// List of records with filters.
pub const PAGE_CAT_LIST: &str = "list";

/// Analytical dashboard / map view.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// System page (login, not found).
pub const PAGE_CAT_SYSTEM: &str = "system";
