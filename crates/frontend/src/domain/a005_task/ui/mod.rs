pub mod details;
pub mod list;
pub mod my_tasks;
