pub mod board;
pub mod dialogs;
pub mod task_editor;
pub mod task_list;
pub mod theme;
pub mod toolbar;
