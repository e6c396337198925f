// File I/O operations

pub mod file_store;

pub use file_store::FileStore;
