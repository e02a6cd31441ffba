use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use lofty::prelude::AudioFile;

use super::thread::spawn_audio_thread;
use super::types::{AudioBackend, AudioCmd, AudioEvent, AudioTrack, PositionHandle, TrackId};

/// Handle to the audio thread.
pub struct AudioEngine {
    tx: Sender<AudioCmd>,
    next_id: AtomicU64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioEngine {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let audio_handle = spawn_audio_thread(rx);

        Self {
            tx,
            next_id: AtomicU64::new(1),
            join: Mutex::new(Some(audio_handle)),
        }
    }

    /// Register `path` with the audio thread and return the card-side handle.
    pub fn open_track(&self, path: &Path) -> EngineTrack {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (events_tx, events_rx) = mpsc::channel::<AudioEvent>();
        let position: PositionHandle = Arc::new(Mutex::new(Duration::ZERO));

        let duration = lofty::read_from_path(path)
            .ok()
            .map(|tagged| tagged.properties().duration())
            .filter(|d| !d.is_zero());

        let _ = self.tx.send(AudioCmd::Register {
            id,
            path: path.to_path_buf(),
            events: events_tx,
            position: position.clone(),
        });
        tracing::debug!(track = id, path = %path.display(), ?duration, "registered audio track");

        EngineTrack {
            id,
            tx: self.tx.clone(),
            events: events_rx,
            position,
            duration,
        }
    }

    /// Stop all sinks and wait for the audio thread to exit.
    pub fn shutdown(&self) {
        let _ = self.tx.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for AudioEngine {
    fn open(&self, path: &Path) -> Box<dyn AudioTrack> {
        Box::new(self.open_track(path))
    }
}

/// One card's view of a registered track. Dropping it releases the sink.
pub struct EngineTrack {
    id: TrackId,
    tx: Sender<AudioCmd>,
    events: Receiver<AudioEvent>,
    position: PositionHandle,
    duration: Option<Duration>,
}

impl AudioTrack for EngineTrack {
    fn request_play(&mut self) {
        if self.tx.send(AudioCmd::Play(self.id)).is_err() {
            tracing::warn!(track = self.id, "audio thread gone; play request dropped");
        }
    }

    fn request_pause(&mut self) {
        let _ = self.tx.send(AudioCmd::Pause(self.id));
    }

    fn poll_event(&mut self) -> Option<AudioEvent> {
        self.events.try_recv().ok()
    }

    fn position(&self) -> Duration {
        self.position.lock().map(|p| *p).unwrap_or(Duration::ZERO)
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

impl Drop for EngineTrack {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Release(self.id));
    }
}
