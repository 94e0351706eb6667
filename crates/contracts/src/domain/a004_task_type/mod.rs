pub mod aggregate;

pub use aggregate::{TaskType, TaskTypeDraft};
