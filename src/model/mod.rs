pub mod board;
pub mod directory;
pub mod task;

pub use board::BoardViewport;
pub use directory::{Directory, Room, Staff};
pub use task::{Task, TaskPriority, TaskStatus, TaskType};
