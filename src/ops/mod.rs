pub mod input;
pub mod task_list;
