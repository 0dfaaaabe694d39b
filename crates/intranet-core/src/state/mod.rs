//! Application state domain module.
//!
//! # Module Structure
//!
//! - `model`: the persisted data (`ApplicationState` and its entries)
//! - `transition`: pure command application (`Command`, `Transition`)
//! - `repository`: persistence trait for the state blob and notes
//! - `transfer`: export/import of the state blob

pub mod model;
pub mod repository;
pub mod transfer;
pub mod transition;

pub use model::{
    Agent, AgentStatus, ApplicationState, Channel, DEFAULT_CHANNEL_ID, IntelCard, Message, Report,
    ThreatLevel,
};
pub use repository::StateRepository;
pub use transfer::{ExportArtifact, ExportFormat, export_blob, parse_import};
pub use transition::{Command, Transition};
