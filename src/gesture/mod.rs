pub mod drag;
pub mod resize;

pub use drag::{DragController, DragPreview, PendingMove};
pub use resize::{ResizeController, ResizeEdge, ResizePreview};
