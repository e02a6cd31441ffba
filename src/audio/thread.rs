use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::create_sink;
use super::types::{AudioCmd, AudioEvent, PositionHandle, TrackId};

/// How often sinks are checked for end-of-file and positions are published.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct Slot {
    path: PathBuf,
    events: Sender<AudioEvent>,
    position: PositionHandle,
    sink: Option<Sink>,
    playing: bool,
}

impl Slot {
    fn emit(&self, event: AudioEvent) {
        // The card may already be gone; its Release is queued behind us.
        let _ = self.events.send(event);
    }

    fn publish_position(&self) {
        let pos = self
            .sink
            .as_ref()
            .map(|s| s.get_pos())
            .unwrap_or(Duration::ZERO);
        if let Ok(mut p) = self.position.lock() {
            *p = pos;
        }
    }
}

pub(super) fn spawn_audio_thread(rx: Receiver<AudioCmd>) -> JoinHandle<()> {
    thread::spawn(move || {
        // A missing device is not fatal: every play request is answered with
        // `StartFailed` and cards stay idle.
        let stream: Option<OutputStream> = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                // rodio logs to stderr when the stream is dropped, which would
                // scribble over the TUI.
                s.log_on_drop(false);
                Some(s)
            }
            Err(e) => {
                tracing::warn!(error = %e, "no audio output device; real playback disabled");
                None
            }
        };

        let mut slots: HashMap<TrackId, Slot> = HashMap::new();

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(AudioCmd::Register {
                    id,
                    path,
                    events,
                    position,
                }) => {
                    slots.insert(
                        id,
                        Slot {
                            path,
                            events,
                            position,
                            sink: None,
                            playing: false,
                        },
                    );
                }
                Ok(AudioCmd::Play(id)) => {
                    let Some(slot) = slots.get_mut(&id) else {
                        continue;
                    };
                    play(stream.as_ref(), slot);
                }
                Ok(AudioCmd::Pause(id)) => {
                    let Some(slot) = slots.get_mut(&id) else {
                        continue;
                    };
                    if slot.playing {
                        if let Some(s) = slot.sink.as_ref() {
                            s.pause();
                        }
                        slot.playing = false;
                        slot.publish_position();
                        slot.emit(AudioEvent::Paused);
                    }
                }
                Ok(AudioCmd::Release(id)) => {
                    if let Some(slot) = slots.remove(&id) {
                        if let Some(s) = slot.sink {
                            s.stop();
                        }
                    }
                }
                Ok(AudioCmd::Quit) | Err(RecvTimeoutError::Disconnected) => {
                    for (_, slot) in slots.drain() {
                        if let Some(s) = slot.sink {
                            s.stop();
                        }
                    }
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
            }

            for slot in slots.values_mut() {
                if slot.playing && slot.sink.as_ref().is_some_and(|s| s.empty()) {
                    // Drop the drained sink so the next play decodes from the start.
                    slot.sink = None;
                    slot.playing = false;
                    slot.emit(AudioEvent::Ended);
                }
                slot.publish_position();
            }
        }
    })
}

fn play(stream: Option<&OutputStream>, slot: &mut Slot) {
    if slot.playing {
        return;
    }

    let Some(stream) = stream else {
        slot.emit(AudioEvent::StartFailed("no audio output device".to_string()));
        return;
    };

    if slot.sink.as_ref().is_none_or(|s| s.empty()) {
        match create_sink(stream, &slot.path) {
            Ok(s) => slot.sink = Some(s),
            Err(e) => {
                slot.emit(AudioEvent::StartFailed(e.to_string()));
                return;
            }
        }
    }

    if let Some(s) = slot.sink.as_ref() {
        s.play();
    }
    slot.playing = true;
    slot.emit(AudioEvent::Started);
}
