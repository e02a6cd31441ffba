use std::time::{Duration, Instant};

use super::*;

fn wait_for_event(track: &mut dyn AudioTrack) -> Option<AudioEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if let Some(ev) = track.poll_event() {
            return Some(ev);
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    None
}

#[test]
fn unreadable_file_reports_start_failed_instead_of_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.mp3");

    let engine = AudioEngine::new();
    let mut track = engine.open(&missing);
    assert_eq!(track.duration(), None);

    track.request_play();
    let ev = wait_for_event(track.as_mut());
    assert!(matches!(ev, Some(AudioEvent::StartFailed(_))), "got {ev:?}");
    assert_eq!(track.position(), Duration::ZERO);

    drop(track);
    engine.shutdown();
}

#[test]
fn pause_without_play_emits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let engine = AudioEngine::new();
    let mut track = engine.open_track(&dir.path().join("x.ogg"));

    track.request_pause();
    std::thread::sleep(Duration::from_millis(250));
    assert_eq!(track.poll_event(), None);

    engine.shutdown();
}
