//! Session domain module.
//!
//! - `model`: the session value, phases and countdown outcomes
//! - `guard`: `SessionGuard`, which owns the session markers in storage

mod guard;
mod model;

pub use guard::SessionGuard;
pub use model::{
    DEFAULT_SESSION_DURATION_SECS, MAX_SESSION_DURATION_SECS, Session, SessionPhase, TickOutcome,
    format_remaining,
};
