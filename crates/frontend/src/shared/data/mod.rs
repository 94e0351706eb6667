//! Client-side cache of the backend collections.

mod collection;
mod context;
pub mod service;

pub use collection::{Catalog, Collection};
pub use context::{use_data, DataContext, DataProvider};
