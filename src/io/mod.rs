pub mod csv_export;
pub mod file;

pub use file::{load_board, save_board, BoardFile};
