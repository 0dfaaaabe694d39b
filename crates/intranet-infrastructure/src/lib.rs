pub mod config_service;
pub mod notifier;
pub mod paths;
pub mod state_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::notifier::BroadcastNotifier;
pub use crate::paths::IntranetPaths;
pub use crate::state_repository::StateRepositoryImpl;
pub use crate::storage::{FileStore, MemoryStore, ObservedStore};
