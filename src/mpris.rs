//! MPRIS D-Bus service so media keys and `playerctl` can drive the viewer.
//!
//! Pause and stop requests arriving here are the external pauses the active
//! card must honour. The UI thread publishes a [`NowPlaying`] snapshot; the
//! D-Bus thread only ever reads it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::block_on;
use zbus::{Connection, connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::app::PlaybackState;

const BUS_NAME: &str = "org.mpris.MediaPlayer2.duabook";
const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
}

/// What the player reports about itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NowPlaying {
    pub playback: PlaybackState,
    /// Id and display title of the active dua.
    pub dua: Option<(String, String)>,
}

impl NowPlaying {
    fn status(&self) -> &'static str {
        match self.playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    /// `mpris:trackid` for the active dua. Object path elements only allow
    /// `[A-Za-z0-9_]`, so anything else in the id becomes `_`.
    fn track_path(&self) -> String {
        match &self.dua {
            Some((id, _)) => {
                let element: String = id
                    .chars()
                    .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                    .collect();
                format!("/org/duabook/dua/d{element}")
            }
            None => "/org/mpris/MediaPlayer2/TrackList/NoTrack".to_string(),
        }
    }
}

type Shared = Arc<Mutex<NowPlaying>>;

pub struct MprisHandle {
    state: Shared,
}

impl MprisHandle {
    pub fn publish(&self, now_playing: NowPlaying) {
        if let Ok(mut s) = self.state.lock() {
            *s = now_playing;
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {}

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "duabook"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        Vec::new()
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        Vec::new()
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Shared,
}

impl PlayerIface {
    fn send(&self, cmd: ControlCmd) {
        if self.tx.send(cmd).is_err() {
            tracing::debug!("MPRIS command after UI loop exit");
        }
    }

    fn snapshot(&self) -> NowPlaying {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn play(&self) {
        self.send(ControlCmd::Play);
    }

    fn pause(&self) {
        self.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        self.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        self.send(ControlCmd::Stop);
    }

    // Cards are not a queue.
    fn next(&self) {}

    fn previous(&self) {}

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        self.snapshot().status()
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let snapshot = self.snapshot();
        let mut map = HashMap::new();

        if let Ok(path) = ObjectPath::try_from(snapshot.track_path()) {
            if let Ok(v) = OwnedValue::try_from(Value::from(path)) {
                map.insert("mpris:trackid".to_string(), v);
            }
        }
        if let Some((_, title)) = snapshot.dua {
            if let Ok(v) = OwnedValue::try_from(Value::from(title)) {
                map.insert("xesam:title".to_string(), v);
            }
        }
        map
    }
}

async fn serve(tx: Sender<ControlCmd>, state: Shared) -> zbus::Result<Connection> {
    connection::Builder::session()?
        .name(BUS_NAME)?
        .serve_at(OBJECT_PATH, RootIface { tx: tx.clone() })?
        .serve_at(OBJECT_PATH, PlayerIface { tx, state })?
        .build()
        .await
}

/// Start the service on its own thread. Without a session bus the viewer
/// simply runs without media-key support.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state: Shared = Arc::new(Mutex::new(NowPlaying::default()));

    let for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            match serve(tx, for_thread).await {
                Ok(_connection) => {
                    tracing::debug!(name = BUS_NAME, "MPRIS service registered");
                    // The connection lives as long as this future.
                    std::future::pending::<()>().await;
                }
                Err(e) => tracing::warn!(error = %e, "MPRIS unavailable"),
            }
        });
    });

    MprisHandle { state }
}
