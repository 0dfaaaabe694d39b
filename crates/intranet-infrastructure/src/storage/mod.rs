//! Key-value store backends.

pub mod atomic_json;
mod file_store;
mod memory_store;
mod observed_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use observed_store::ObservedStore;
