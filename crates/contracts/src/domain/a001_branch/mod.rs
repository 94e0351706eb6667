pub mod aggregate;

pub use aggregate::{Branch, BranchDraft};
