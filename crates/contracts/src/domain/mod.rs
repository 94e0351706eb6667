pub mod a001_branch;
pub mod a002_client;
pub mod a003_category;
pub mod a004_task_type;
pub mod a005_task;
