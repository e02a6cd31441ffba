//! Application model types: `App` and `PlaybackState`.
//!
//! The `App` is the list controller. It owns the record set, the emotion
//! filter, the theme, the cursor and one mounted [`CardPlayer`] per visible
//! dua, and it is the single owner of which card is active.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Instant;

use crate::audio::AudioBackend;
use crate::catalog::Dua;
use crate::config::ThemeMode;
use crate::filter;
use crate::player::{CardEvent, CardPlayer, SimTimings};
use crate::share::SharePayload;

/// Coarse playback state reported to MPRIS.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The main application model.
pub struct App {
    pub duas: Vec<Dua>,
    /// Cursor, as an index into `duas`. Always points at a visible dua when any is visible.
    pub selected: usize,
    pub theme: ThemeMode,
    /// Transient feedback line (share result, favorite toggle, ...).
    pub status: Option<String>,

    selected_emotion: Option<String>,
    active_card: Option<String>,
    favorites: HashSet<String>,

    /// Visible dua indices in source order, parallel to `cards`.
    visible: Vec<usize>,
    cards: Vec<CardPlayer>,

    audio: Box<dyn AudioBackend>,
    audio_dir: Option<PathBuf>,
    timings: SimTimings,
}

impl App {
    /// Create a new `App` over `duas` and mount a card for each of them.
    pub fn new(
        duas: Vec<Dua>,
        audio: Box<dyn AudioBackend>,
        audio_dir: Option<PathBuf>,
        timings: SimTimings,
    ) -> Self {
        let mut app = Self {
            duas,
            selected: 0,
            theme: ThemeMode::default(),
            status: None,
            selected_emotion: None,
            active_card: None,
            favorites: HashSet::new(),
            visible: Vec::new(),
            cards: Vec::new(),
            audio,
            audio_dir,
            timings,
        };
        app.remount();
        app
    }

    pub fn selected_emotion(&self) -> Option<&str> {
        self.selected_emotion.as_deref()
    }

    pub fn active_card(&self) -> Option<&str> {
        self.active_card.as_deref()
    }

    /// Visible dua indices in display order.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn has_visible(&self) -> bool {
        !self.visible.is_empty()
    }

    /// The mounted card for dua index `idx`, if it is visible.
    pub fn card(&self, idx: usize) -> Option<&CardPlayer> {
        self.visible
            .iter()
            .position(|&i| i == idx)
            .map(|pos| &self.cards[pos])
    }

    pub fn card_by_id(&self, id: &str) -> Option<&CardPlayer> {
        self.cards.iter().find(|c| c.id() == id)
    }

    pub fn selected_dua(&self) -> Option<&Dua> {
        if self.visible.contains(&self.selected) {
            self.duas.get(self.selected)
        } else {
            None
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Toggle `id` on or off. Any change remounts the visible cards.
    pub fn select_emotion(&mut self, id: &str) {
        if self.selected_emotion.as_deref() == Some(id) {
            self.selected_emotion = None;
        } else {
            self.selected_emotion = Some(id.to_string());
        }
        tracing::debug!(emotion = ?self.selected_emotion, "emotion selection changed");
        self.remount();
    }

    pub fn clear_emotion(&mut self) {
        if self.selected_emotion.take().is_some() {
            self.remount();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Rebuild the visible list and mount or unmount cards to match.
    ///
    /// Cards that stay visible keep their state; cards that leave are
    /// dropped, which cancels their timers and releases their audio.
    fn remount(&mut self) {
        let visible = filter::visible_indices(&self.duas, self.selected_emotion.as_deref());

        let mut mounted: HashMap<String, CardPlayer> = self
            .cards
            .drain(..)
            .map(|c| (c.id().to_string(), c))
            .collect();

        let cards: Vec<CardPlayer> = visible
            .iter()
            .map(|&i| {
                let dua = &self.duas[i];
                mounted
                    .remove(&dua.id)
                    .unwrap_or_else(|| self.mount_card(dua))
            })
            .collect();

        if !mounted.is_empty() {
            tracing::debug!(count = mounted.len(), "unmounting cards");
        }
        drop(mounted);

        if let Some(active) = self.active_card.as_deref() {
            if !cards.iter().any(|c| c.id() == active) {
                self.active_card = None;
            }
        }

        self.visible = visible;
        self.cards = cards;
        self.ensure_selected_visible();
    }

    fn mount_card(&self, dua: &Dua) -> CardPlayer {
        match dua.audio_path(self.audio_dir.as_deref()) {
            Some(path) => CardPlayer::real(dua.id.clone(), self.audio.open(&path)),
            None => CardPlayer::simulated(dua.id.clone(), self.timings),
        }
    }

    /// A card began producing sound; every other card is told to stop.
    pub fn on_card_started_playing(&mut self, id: &str) {
        self.active_card = Some(id.to_string());
        for card in &mut self.cards {
            let is_active = card.id() == id;
            card.sync_active(is_active);
        }
        tracing::debug!(card = id, "active card changed");
    }

    /// A card stopped. Only the active card can clear the selection.
    pub fn on_card_paused(&mut self, id: &str) {
        if self.active_card.as_deref() == Some(id) {
            self.active_card = None;
            tracing::debug!(card = id, "active card cleared");
        } else {
            tracing::debug!(card = id, active = ?self.active_card, "ignoring pause from inactive card");
        }
    }

    fn apply(&mut self, id: &str, event: CardEvent) {
        match event {
            CardEvent::Started => {
                if self.card_by_id(id).is_some_and(CardPlayer::is_playing) {
                    self.on_card_started_playing(id);
                } else {
                    tracing::debug!(card = id, "ignoring start from a card that is no longer playing");
                }
            }
            CardEvent::Paused => self.on_card_paused(id),
        }
    }

    /// Play/pause button on the card under the cursor.
    pub fn toggle_play_selected(&mut self, now: Instant) {
        let Some(pos) = self.visible.iter().position(|&i| i == self.selected) else {
            return;
        };
        let card = &mut self.cards[pos];
        let id = card.id().to_string();
        if let Some(ev) = card.toggle_play(now) {
            self.apply(&id, ev);
        }
    }

    /// Drive every mounted card in list order.
    ///
    /// Each card's events are applied before the next card is ticked, so a
    /// card deactivated earlier in the pass drops its own queued start.
    pub fn tick(&mut self, now: Instant) {
        for pos in 0..self.cards.len() {
            let events = self.cards[pos].tick(now);
            if events.is_empty() {
                continue;
            }
            let id = self.cards[pos].id().to_string();
            for ev in events {
                self.apply(&id, ev);
            }
        }
    }

    /// Pause coming from outside the UI (media keys).
    pub fn external_pause(&mut self, now: Instant) {
        let Some(id) = self.active_card.clone() else {
            return;
        };
        let Some(card) = self.cards.iter_mut().find(|c| c.id() == id) else {
            return;
        };
        if let Some(ev) = card.external_pause(now) {
            self.apply(&id, ev);
        }
    }

    /// Play coming from outside the UI: starts the selected card unless something plays.
    pub fn external_play(&mut self, now: Instant) {
        if self.active_card.is_none() && !self.selected_is_busy() {
            self.toggle_play_selected(now);
        }
    }

    /// Stop coming from outside the UI. Cards have no stopped-at-zero state,
    /// so this converges with a pause.
    pub fn external_stop(&mut self, now: Instant) {
        self.external_pause(now);
    }

    pub fn external_play_pause(&mut self, now: Instant) {
        if self.active_card.is_some() {
            self.external_pause(now);
        } else {
            self.toggle_play_selected(now);
        }
    }

    fn selected_is_busy(&self) -> bool {
        self.card(self.selected)
            .is_some_and(|c| c.is_playing() || c.is_starting())
    }

    /// Fire-and-forget favorite toggle; kept in memory only.
    pub fn favorite_selected(&mut self) -> Option<bool> {
        let id = self.selected_dua()?.id.clone();
        let now_favorite = if self.favorites.remove(&id) {
            false
        } else {
            self.favorites.insert(id.clone());
            true
        };
        tracing::info!(dua = %id, favorite = now_favorite, "favorite toggled");
        Some(now_favorite)
    }

    /// Payload for sharing the dua under the cursor.
    pub fn share_selected(&self, url: Option<&str>) -> Option<SharePayload> {
        let dua = self.selected_dua()?;
        tracing::info!(dua = %dua.id, "share requested");
        Some(SharePayload::for_dua(dua, url))
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn playback_state(&self) -> PlaybackState {
        if let Some(card) = self.active_card.as_deref().and_then(|id| self.card_by_id(id)) {
            if card.is_playing() {
                return PlaybackState::Playing;
            }
        }
        match self.card(self.selected) {
            Some(c) if c.progress() > 0.0 && !c.is_playing() => PlaybackState::Paused,
            _ => PlaybackState::Stopped,
        }
    }

    /// Title of the dua currently playing, for MPRIS.
    pub fn now_playing_title(&self) -> Option<String> {
        let id = self.active_card.as_deref()?;
        self.duas.iter().find(|d| d.id == id).map(Dua::title)
    }

    /// Drop every card, stopping all playback.
    pub fn unmount_all(&mut self) {
        self.cards.clear();
        self.visible.clear();
        self.active_card = None;
    }

    /// Ensure that `selected` is part of the current filtered view,
    /// otherwise move selection to the first visible dua.
    fn ensure_selected_visible(&mut self) {
        match self.visible.first() {
            None => self.selected = 0,
            Some(&first) => {
                if !self.visible.contains(&self.selected) {
                    self.selected = first;
                }
            }
        }
    }

    /// Move selection to the next visible dua, wrapping around.
    pub fn next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let pos = self.visible.iter().position(|&i| i == self.selected);
        self.selected = match pos {
            Some(p) => self.visible[(p + 1) % self.visible.len()],
            None => self.visible[0],
        };
    }

    /// Move selection to the previous visible dua, wrapping around.
    pub fn prev(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let pos = self.visible.iter().position(|&i| i == self.selected);
        self.selected = match pos {
            Some(0) | None => self.visible[self.visible.len() - 1],
            Some(p) => self.visible[p - 1],
        };
    }
}
