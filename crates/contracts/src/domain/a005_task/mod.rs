pub mod aggregate;
pub mod status;

pub use aggregate::{Priority, StatusChange, Task, TaskDraft, TaskFilter};
pub use status::{TaskState, TaskStatus};
