//! `rewardboard-core`: reward categorization board.
//!
//! Pure model crate: command history, board layout, drag-and-drop handling
//! and the blob-store seam. No file system or terminal dependencies.

pub mod actions;
pub mod board;
pub mod controller;
pub mod error;
pub mod events;
pub mod history;
pub mod store;

pub use board::{Board, Catalog, Entry, Layout, RestoreReport};
pub use controller::BoardController;
pub use error::{BoardError, StoreError};
pub use events::{DragOver, DropEvent, DropOutcome, DropSource};
pub use history::{Affordances, Command, CommandId, FnCommand, History};
pub use store::{BlobStore, MemoryStore, LAYOUT_KEY};
