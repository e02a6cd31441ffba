use std::time::Instant;

use crate::audio::{AudioEvent, AudioTrack};

use super::timer::{SimTimer, SimTimings};

/// Completion threshold absorbing float drift from summed ticks.
const COMPLETE: f32 = 100.0 - 1e-3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackMode {
    /// Backed by an audio file.
    Real,
    /// Backed by a fixed-duration timer.
    Simulated,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CardState {
    #[default]
    Idle,
    Playing,
    /// Simulated only: reached 100% and holds the full bar until the reset delay passes.
    Finished,
}

/// Transitions a card reports to the list.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CardEvent {
    Started,
    Paused,
}

enum Backing {
    Simulated {
        timings: SimTimings,
        timer: Option<SimTimer>,
        reset_at: Option<Instant>,
    },
    Real {
        track: Box<dyn AudioTrack>,
        start_pending: bool,
    },
}

/// Playback state machine for one mounted card.
pub struct CardPlayer {
    id: String,
    state: CardState,
    progress: f32,
    backing: Backing,
}

impl std::fmt::Debug for CardPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardPlayer")
            .field("id", &self.id)
            .field("mode", &self.mode())
            .field("state", &self.state)
            .field("progress", &self.progress)
            .finish()
    }
}

impl CardPlayer {
    pub fn simulated(id: impl Into<String>, timings: SimTimings) -> Self {
        Self {
            id: id.into(),
            state: CardState::Idle,
            progress: 0.0,
            backing: Backing::Simulated {
                timings,
                timer: None,
                reset_at: None,
            },
        }
    }

    pub fn real(id: impl Into<String>, track: Box<dyn AudioTrack>) -> Self {
        Self {
            id: id.into(),
            state: CardState::Idle,
            progress: 0.0,
            backing: Backing::Real {
                track,
                start_pending: false,
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> PlaybackMode {
        match self.backing {
            Backing::Simulated { .. } => PlaybackMode::Simulated,
            Backing::Real { .. } => PlaybackMode::Real,
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == CardState::Playing
    }

    /// Whether a real start was requested and is awaiting the audio thread.
    pub fn is_starting(&self) -> bool {
        matches!(
            self.backing,
            Backing::Real {
                start_pending: true,
                ..
            }
        )
    }

    /// Progress in percent, `0.0..=100.0`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The play/pause button.
    pub fn toggle_play(&mut self, now: Instant) -> Option<CardEvent> {
        match &mut self.backing {
            Backing::Simulated {
                timings,
                timer,
                reset_at,
            } => {
                if self.state == CardState::Playing {
                    *timer = None;
                    self.state = CardState::Idle;
                    tracing::debug!(card = %self.id, progress = self.progress, "simulated playback paused");
                    return Some(CardEvent::Paused);
                }
                if self.state == CardState::Finished || self.progress >= COMPLETE {
                    self.progress = 0.0;
                }
                *reset_at = None;
                *timer = Some(SimTimer::start(now, timings.tick));
                self.state = CardState::Playing;
                tracing::debug!(card = %self.id, progress = self.progress, "simulated playback started");
                Some(CardEvent::Started)
            }
            Backing::Real {
                track,
                start_pending,
            } => {
                if self.state == CardState::Playing {
                    // The Paused event performs the transition.
                    track.request_pause();
                } else if *start_pending {
                    *start_pending = false;
                    track.request_pause();
                } else {
                    *start_pending = true;
                    track.request_play();
                }
                None
            }
        }
    }

    /// Pause requested by something other than the card's own button.
    pub fn external_pause(&mut self, now: Instant) -> Option<CardEvent> {
        if self.mode() == PlaybackMode::Simulated {
            return if self.is_playing() {
                self.toggle_play(now)
            } else {
                None
            };
        }
        if let Backing::Real {
            track,
            start_pending,
        } = &mut self.backing
        {
            if self.state == CardState::Playing || *start_pending {
                *start_pending = false;
                track.request_pause();
            }
        }
        None
    }

    /// Advance timers and drain audio events.
    pub fn tick(&mut self, now: Instant) -> Vec<CardEvent> {
        let mut out = Vec::new();
        match &mut self.backing {
            Backing::Simulated {
                timings,
                timer,
                reset_at,
            } => {
                if self.state == CardState::Playing {
                    let fired = timer.as_mut().map_or(0, |t| t.due_ticks(now));
                    if fired > 0 {
                        self.progress = (self.progress + fired as f32 * timings.step()).min(100.0);
                    }
                    if self.progress >= COMPLETE {
                        self.progress = 100.0;
                        *timer = None;
                        *reset_at = Some(now + timings.reset_delay);
                        self.state = CardState::Finished;
                        tracing::debug!(card = %self.id, "simulated playback finished");
                        out.push(CardEvent::Paused);
                    }
                }
                if self.state == CardState::Finished && reset_at.is_some_and(|at| now >= at) {
                    *reset_at = None;
                    self.progress = 0.0;
                    self.state = CardState::Idle;
                }
            }
            Backing::Real {
                track,
                start_pending,
            } => {
                while let Some(ev) = track.poll_event() {
                    match &ev {
                        AudioEvent::Started => {
                            if *start_pending {
                                *start_pending = false;
                                self.state = CardState::Playing;
                                tracing::debug!(card = %self.id, "audio started");
                                out.push(CardEvent::Started);
                            } else {
                                // Start was cancelled or the card was deactivated meanwhile.
                                track.request_pause();
                            }
                        }
                        AudioEvent::StartFailed(reason) => {
                            *start_pending = false;
                            self.state = CardState::Idle;
                            tracing::warn!(card = %self.id, %reason, "audio start refused");
                        }
                        AudioEvent::Paused | AudioEvent::Ended => {
                            if self.state == CardState::Playing {
                                self.state = CardState::Idle;
                                tracing::debug!(card = %self.id, event = ?ev, "audio stopped");
                                out.push(CardEvent::Paused);
                            }
                        }
                    }
                }
                self.progress = match track.duration() {
                    Some(total) if !total.is_zero() => {
                        (track.position().as_secs_f32() / total.as_secs_f32() * 100.0)
                            .clamp(0.0, 100.0)
                    }
                    _ => 0.0,
                };
            }
        }
        out
    }

    /// Apply the list's verdict on whether this card is the active one.
    ///
    /// An inactive card that is playing, or waiting for a start, falls back
    /// to idle without reporting anything.
    pub fn sync_active(&mut self, is_active: bool) {
        if is_active {
            return;
        }
        match &mut self.backing {
            Backing::Simulated { timer, .. } => {
                if self.state == CardState::Playing {
                    *timer = None;
                    self.state = CardState::Idle;
                    tracing::debug!(card = %self.id, "deactivated");
                }
            }
            Backing::Real {
                track,
                start_pending,
            } => {
                if self.state == CardState::Playing || *start_pending {
                    *start_pending = false;
                    track.request_pause();
                    self.state = CardState::Idle;
                    tracing::debug!(card = %self.id, "deactivated");
                }
            }
        }
    }
}
