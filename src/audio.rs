//! Real audio playback for cards that carry an audio file.
//!
//! A single background thread owns the rodio output stream and one sink per
//! registered track. Cards talk to it through [`EngineTrack`] handles and
//! learn about starts, failures, pauses and end-of-file through per-track
//! event channels.

mod engine;
mod sink;
mod thread;
mod types;

pub use engine::{AudioEngine, EngineTrack};
pub use types::{AudioBackend, AudioEvent, AudioTrack};

#[cfg(test)]
mod tests;
