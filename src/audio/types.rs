//! Audio capability boundary shared by the engine and the card players.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Notifications delivered asynchronously for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// A play request succeeded and sound is being produced.
    Started,
    /// A play request was refused (no device, unreadable file, ...).
    StartFailed(String),
    /// Playback paused, whether requested by the card or by someone else.
    Paused,
    /// The resource played to its end.
    Ended,
}

/// A playable resource exclusively owned by one card.
///
/// Requests are fire-and-forget; their outcome arrives later through
/// [`AudioTrack::poll_event`].
pub trait AudioTrack {
    fn request_play(&mut self);
    fn request_pause(&mut self);
    fn poll_event(&mut self) -> Option<AudioEvent>;
    /// Current playback position.
    fn position(&self) -> Duration;
    /// Total length when known.
    fn duration(&self) -> Option<Duration>;
}

/// Opens tracks for cards as they mount.
pub trait AudioBackend {
    fn open(&self, path: &Path) -> Box<dyn AudioTrack>;
}

pub(crate) type TrackId = u64;
pub(crate) type PositionHandle = Arc<Mutex<Duration>>;

#[derive(Debug)]
pub(crate) enum AudioCmd {
    /// Register a new track; nothing is decoded until the first `Play`.
    Register {
        id: TrackId,
        path: PathBuf,
        events: Sender<AudioEvent>,
        position: PositionHandle,
    },
    /// Start or resume playback of a track.
    Play(TrackId),
    /// Pause a track, keeping its position.
    Pause(TrackId),
    /// Drop a track and its sink.
    Release(TrackId),
    /// Stop everything and exit the audio thread.
    Quit,
}

impl<T: AudioBackend + ?Sized> AudioBackend for Arc<T> {
    fn open(&self, path: &Path) -> Box<dyn AudioTrack> {
        (**self).open(path)
    }
}
