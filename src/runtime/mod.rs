use std::env;
use std::sync::{Arc, mpsc};

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioEngine;
use crate::logging;
use crate::mpris::ControlCmd;
use crate::player::SimTimings;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, warning) = settings::load_settings();
    let log_path = logging::init(&settings.logging);
    if let Some(msg) = warning {
        eprintln!("duabook: {msg}");
        tracing::warn!("{msg}");
    }
    tracing::info!(log = ?log_path, "starting");

    // Data file problems are reported before the terminal is taken over.
    let data_path = startup::data_path(env::args().nth(1), &settings.library);
    let duas = startup::load_duas(data_path.as_deref())?;
    let audio_dir = startup::audio_dir(&settings.library, data_path.as_deref());

    let engine = Arc::new(AudioEngine::new());
    let mut app = App::new(
        duas,
        Box::new(engine.clone()),
        audio_dir,
        SimTimings::from(&settings.playback),
    );
    app.theme = settings.ui.theme;

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::update_mpris(&mpris, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&app);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mpris,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Cards release their tracks before the engine thread is told to quit.
    app.unmount_all();
    drop(app);
    engine.shutdown();
    tracing::info!("stopped");

    run_result
}
