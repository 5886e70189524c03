//! Filesystem operations: unique naming and the collision-safe mover.

mod file_move;
mod helpers;
mod unique;

pub use file_move::{ensure_destination, move_file, MoveOutcome};
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use unique::{entry_exists, make_unique};
