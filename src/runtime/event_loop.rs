use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::emotion;
use crate::mpris::{ControlCmd, MprisHandle, NowPlaying};
use crate::runtime::mpris_sync::now_playing;
use crate::share::{self, CommandShare, ShareOutcome, SharePayload, SharePlatform, SystemClipboard};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Last snapshot published to MPRIS.
    pub last_mpris: NowPlaying,
    share_tx: mpsc::Sender<ShareOutcome>,
    share_rx: mpsc::Receiver<ShareOutcome>,
}

impl EventLoopState {
    pub fn new(app: &App) -> Self {
        let (share_tx, share_rx) = mpsc::channel();
        Self {
            last_mpris: now_playing(app),
            share_tx,
            share_rx,
        }
    }
}

/// Main terminal event loop: drives the cards, draws, and handles keys,
/// MPRIS commands and share results. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());

        while let Ok(outcome) = state.share_rx.try_recv() {
            let outcome = match outcome {
                ShareOutcome::TerminalCopy(text) => {
                    share::copy_via_terminal(terminal.backend_mut(), &text)
                }
                other => other,
            };
            app.set_status(outcome.message());
        }

        // Cards change state on their own (timers, audio thread), so compare every pass.
        let snapshot = now_playing(app);
        if snapshot != state.last_mpris {
            mpris.publish(snapshot.clone());
            state.last_mpris = snapshot;
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Media-key and `playerctl` requests. Returns `true` on quit.
fn handle_control_cmd(cmd: ControlCmd, app: &mut App) -> bool {
    let now = Instant::now();
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => app.external_play(now),
        ControlCmd::Pause => app.external_pause(now),
        ControlCmd::Stop => app.external_stop(now),
        ControlCmd::PlayPause => app.external_play_pause(now),
    }
    false
}

/// Returns `true` on quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    state: &EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('0') | KeyCode::Esc => app.clear_emotion(),
        KeyCode::Char(c @ '1'..='9') => {
            let n = c as usize - '0' as usize;
            if let Some(e) = emotion::by_hotkey(n) {
                app.select_emotion(e.id);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Enter => {
            app.toggle_play_selected(Instant::now());
        }
        KeyCode::Char('f') => {
            if let Some(now_favorite) = app.favorite_selected() {
                app.set_status(if now_favorite {
                    "Added to favorites"
                } else {
                    "Removed from favorites"
                });
            }
        }
        KeyCode::Char('s') => {
            if let Some(payload) = app.share_selected(settings.share.url.as_deref()) {
                spawn_share(payload, settings.share.command.clone(), state.share_tx.clone());
            }
        }
        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }

    false
}

/// Share off the UI thread; the outcome comes back through `tx`.
fn spawn_share(payload: SharePayload, command: Option<String>, tx: mpsc::Sender<ShareOutcome>) {
    thread::spawn(move || {
        let platform = command.map(|command| CommandShare { command });
        let outcome = share::share(
            &payload,
            platform.as_ref().map(|p| p as &dyn SharePlatform),
            &SystemClipboard,
        );
        let _ = tx.send(outcome);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PlaybackState;
    use crate::catalog::builtin_duas;
    use crate::player::SimTimings;
    use crate::test_support::fake_audio::FakeBackend;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        App::new(
            builtin_duas(),
            Box::new(FakeBackend::default()),
            None,
            SimTimings::default(),
        )
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn number_keys_toggle_emotions() {
        let mut app = app();
        let settings = config::Settings::default();
        let state = EventLoopState::new(&app);

        // 2 -> sadness
        assert!(!handle_key_event(press('2'), &settings, &mut app, &state));
        assert_eq!(app.selected_emotion(), Some("sadness"));
        assert_eq!(app.visible(), &[2]);

        handle_key_event(press('2'), &settings, &mut app, &state);
        assert_eq!(app.selected_emotion(), None);

        handle_key_event(press('1'), &settings, &mut app, &state);
        handle_key_event(press('0'), &settings, &mut app, &state);
        assert_eq!(app.selected_emotion(), None);

        // No eighth emotion.
        handle_key_event(press('8'), &settings, &mut app, &state);
        assert_eq!(app.selected_emotion(), None);
    }

    #[test]
    fn space_plays_selected_card_and_q_quits() {
        let mut app = app();
        let settings = config::Settings::default();
        let state = EventLoopState::new(&app);

        handle_key_event(press(' '), &settings, &mut app, &state);
        assert_eq!(app.active_card(), Some("1"));
        assert_eq!(app.playback_state(), PlaybackState::Playing);

        assert!(handle_key_event(press('q'), &settings, &mut app, &state));
    }

    #[test]
    fn favorite_key_reports_status() {
        let mut app = app();
        let settings = config::Settings::default();
        let state = EventLoopState::new(&app);

        handle_key_event(press('f'), &settings, &mut app, &state);
        assert_eq!(app.status.as_deref(), Some("Added to favorites"));
        handle_key_event(press('f'), &settings, &mut app, &state);
        assert_eq!(app.status.as_deref(), Some("Removed from favorites"));
    }

    #[test]
    fn control_commands_pause_and_resume_active_card() {
        let mut app = app();

        assert!(!handle_control_cmd(ControlCmd::PlayPause, &mut app));
        assert_eq!(app.active_card(), Some("1"));

        assert!(!handle_control_cmd(ControlCmd::Stop, &mut app));
        assert_eq!(app.active_card(), None);

        assert!(!handle_control_cmd(ControlCmd::Play, &mut app));
        assert_eq!(app.active_card(), Some("1"));

        assert!(!handle_control_cmd(ControlCmd::Pause, &mut app));
        assert_eq!(app.active_card(), None);

        assert!(handle_control_cmd(ControlCmd::Quit, &mut app));
    }
}
