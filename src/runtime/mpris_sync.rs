use crate::app::App;
use crate::mpris::{MprisHandle, NowPlaying};

pub fn now_playing(app: &App) -> NowPlaying {
    NowPlaying {
        playback: app.playback_state(),
        dua: app
            .active_card()
            .and_then(|id| app.duas.iter().find(|d| d.id == id))
            .map(|d| (d.id.clone(), d.title())),
    }
}

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    mpris.publish(now_playing(app));
}
