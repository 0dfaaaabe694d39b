//! View rendering.
//!
//! Panels are rebuilt from the state store by pure functions and handed to a
//! [`ViewSink`].

mod fragment;
pub mod render;

pub use fragment::{MemoryViewSink, Panel, ViewFragment, ViewSink};
pub use render::{SessionView, render_data_panel, render_notes, render_session};
