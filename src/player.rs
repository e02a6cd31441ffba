//! Per-card playback.
//!
//! Each visible dua owns a [`CardPlayer`]. Cards with an audio file drive a
//! real [`AudioTrack`](crate::audio::AudioTrack); the rest run a simulated
//! recitation on an owned timer. Cards never reach into the list: every
//! transition that matters to it is returned as a [`CardEvent`].

mod card;
mod timer;

pub use card::{CardEvent, CardPlayer, CardState, PlaybackMode};
pub use timer::{SimTimer, SimTimings};

#[cfg(test)]
mod tests;
