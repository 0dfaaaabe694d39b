pub mod clock;
pub mod config;
pub mod error;
pub mod landing;
pub mod oracle;
pub mod session;
pub mod state;
pub mod storage;
pub mod sync;
pub mod view;

// Re-export common error type
pub use error::{IntranetError, Result};
