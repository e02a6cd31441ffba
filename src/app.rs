//! Application module: exposes the list controller used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the records, the emotion
//! filter, the mounted cards and which of them is active.

mod model;

pub use model::*;
