//! Configuration loader and schema types.
//!
//! Settings drive the simulated playback timings, the initial theme, where
//! the dua records and audio files live, sharing and logging.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;
