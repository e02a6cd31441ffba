use std::time::{Duration, Instant};

use super::*;
use crate::audio::AudioEvent;
use crate::test_support::fake_audio::{FakeTrack, Request, push_event};

fn timings() -> SimTimings {
    SimTimings {
        duration: Duration::from_millis(8000),
        tick: Duration::from_millis(100),
        reset_delay: Duration::from_millis(500),
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn timer_counts_each_tick_once() {
    let t0 = Instant::now();
    let mut timer = SimTimer::start(t0, ms(100));
    assert_eq!(timer.due_ticks(t0 + ms(50)), 0);
    assert_eq!(timer.due_ticks(t0 + ms(100)), 1);
    assert_eq!(timer.due_ticks(t0 + ms(150)), 0);
    assert_eq!(timer.due_ticks(t0 + ms(450)), 3);
    assert_eq!(timer.due_ticks(t0 + ms(499)), 0);
}

#[test]
fn step_is_tick_share_of_duration() {
    assert!((timings().step() - 1.25).abs() < 1e-4);
}

#[test]
fn simulated_card_advances_linearly() {
    let t0 = Instant::now();
    let mut card = CardPlayer::simulated("3", timings());
    assert_eq!(card.mode(), PlaybackMode::Simulated);

    assert_eq!(card.toggle_play(t0), Some(CardEvent::Started));
    assert!(card.is_playing());

    assert!(card.tick(t0 + ms(4000)).is_empty());
    assert!((card.progress() - 50.0).abs() < 0.01);
}

#[test]
fn simulated_completion_stops_and_resets_after_delay() {
    let t0 = Instant::now();
    let mut card = CardPlayer::simulated("3", timings());
    card.toggle_play(t0);

    let events = card.tick(t0 + ms(8000));
    assert_eq!(events, vec![CardEvent::Paused]);
    assert_eq!(card.state(), CardState::Finished);
    assert_eq!(card.progress(), 100.0);

    // still holding the full bar
    assert!(card.tick(t0 + ms(8200)).is_empty());
    assert_eq!(card.progress(), 100.0);

    assert!(card.tick(t0 + ms(8500)).is_empty());
    assert_eq!(card.state(), CardState::Idle);
    assert_eq!(card.progress(), 0.0);
}

#[test]
fn completion_fires_with_sparse_ticks() {
    let t0 = Instant::now();
    let mut card = CardPlayer::simulated("3", timings());
    card.toggle_play(t0);
    for step in 1..=80 {
        let ev = card.tick(t0 + ms(step * 100));
        if step < 80 {
            assert!(ev.is_empty(), "completed early at tick {step}");
        } else {
            assert_eq!(ev, vec![CardEvent::Paused]);
        }
    }
}

#[test]
fn manual_pause_keeps_progress_and_resume_continues() {
    let t0 = Instant::now();
    let mut card = CardPlayer::simulated("1", timings());
    card.toggle_play(t0);
    card.tick(t0 + ms(2000));

    assert_eq!(card.toggle_play(t0 + ms(2000)), Some(CardEvent::Paused));
    assert_eq!(card.state(), CardState::Idle);
    assert!((card.progress() - 25.0).abs() < 0.01);

    // time passing while paused changes nothing
    card.tick(t0 + ms(9000));
    assert!((card.progress() - 25.0).abs() < 0.01);

    assert_eq!(card.toggle_play(t0 + ms(9000)), Some(CardEvent::Started));
    card.tick(t0 + ms(11000));
    assert!((card.progress() - 50.0).abs() < 0.01);
}

#[test]
fn restarting_during_reset_delay_starts_from_zero_with_one_timer() {
    let t0 = Instant::now();
    let mut card = CardPlayer::simulated("1", timings());
    card.toggle_play(t0);
    card.tick(t0 + ms(8000));
    assert_eq!(card.state(), CardState::Finished);

    assert_eq!(card.toggle_play(t0 + ms(8100)), Some(CardEvent::Started));
    assert_eq!(card.progress(), 0.0);

    // the stale reset must not zero the new run
    card.tick(t0 + ms(8600));
    assert!(card.is_playing());
    assert!((card.progress() - 6.25).abs() < 0.01);
}

#[test]
fn deactivation_stops_simulated_card_silently() {
    let t0 = Instant::now();
    let mut card = CardPlayer::simulated("1", timings());
    card.toggle_play(t0);
    card.tick(t0 + ms(1000));

    card.sync_active(true);
    assert!(card.is_playing());

    card.sync_active(false);
    assert_eq!(card.state(), CardState::Idle);
    assert!(card.tick(t0 + ms(5000)).is_empty());
    assert!((card.progress() - 12.5).abs() < 0.01);
}

#[test]
fn external_pause_on_simulated_card_matches_toggle() {
    let t0 = Instant::now();
    let mut card = CardPlayer::simulated("1", timings());
    assert_eq!(card.external_pause(t0), None);
    card.toggle_play(t0);
    assert_eq!(card.external_pause(t0 + ms(300)), Some(CardEvent::Paused));
    assert_eq!(card.state(), CardState::Idle);
}

#[test]
fn real_card_enters_playing_only_after_started_event() {
    let t0 = Instant::now();
    let (track, shared) = FakeTrack::new();
    let mut card = CardPlayer::real("1", Box::new(track));
    assert_eq!(card.mode(), PlaybackMode::Real);

    assert_eq!(card.toggle_play(t0), None);
    assert!(card.is_starting());
    assert_eq!(card.state(), CardState::Idle);
    assert_eq!(shared.borrow().requests, vec![Request::Play]);

    push_event(&shared, AudioEvent::Started);
    assert_eq!(card.tick(t0), vec![CardEvent::Started]);
    assert!(card.is_playing());
    assert!(!card.is_starting());
}

#[test]
fn real_card_user_and_platform_stops_share_one_path() {
    let t0 = Instant::now();
    let (track, shared) = FakeTrack::new();
    let mut card = CardPlayer::real("1", Box::new(track));
    card.toggle_play(t0);
    push_event(&shared, AudioEvent::Started);
    card.tick(t0);

    // user stop: only a request, the event completes it
    assert_eq!(card.toggle_play(t0), None);
    assert!(card.is_playing());
    assert_eq!(shared.borrow().requests.last(), Some(&Request::Pause));
    push_event(&shared, AudioEvent::Paused);
    assert_eq!(card.tick(t0), vec![CardEvent::Paused]);
    assert_eq!(card.state(), CardState::Idle);

    // platform end-of-file
    card.toggle_play(t0);
    push_event(&shared, AudioEvent::Started);
    push_event(&shared, AudioEvent::Ended);
    assert_eq!(
        card.tick(t0),
        vec![CardEvent::Started, CardEvent::Paused]
    );
    assert_eq!(card.state(), CardState::Idle);
}

#[test]
fn real_start_failure_is_swallowed() {
    let t0 = Instant::now();
    let (track, shared) = FakeTrack::new();
    let mut card = CardPlayer::real("1", Box::new(track));
    card.toggle_play(t0);
    push_event(&shared, AudioEvent::StartFailed("denied".into()));

    assert!(card.tick(t0).is_empty());
    assert_eq!(card.state(), CardState::Idle);
    assert!(!card.is_starting());
}

#[test]
fn late_start_after_deactivation_is_paused_not_reported() {
    let t0 = Instant::now();
    let (track, shared) = FakeTrack::new();
    let mut card = CardPlayer::real("1", Box::new(track));
    card.toggle_play(t0);

    card.sync_active(false);
    assert!(!card.is_starting());

    push_event(&shared, AudioEvent::Started);
    assert!(card.tick(t0).is_empty());
    assert_eq!(card.state(), CardState::Idle);
    assert_eq!(
        shared.borrow().requests,
        vec![Request::Play, Request::Pause, Request::Pause]
    );
}

#[test]
fn real_progress_follows_position() {
    let t0 = Instant::now();
    let (track, shared) = FakeTrack::new();
    shared.borrow_mut().duration = Some(Duration::from_secs(20));
    shared.borrow_mut().position = Duration::from_secs(5);
    let mut card = CardPlayer::real("1", Box::new(track));

    card.tick(t0);
    assert!((card.progress() - 25.0).abs() < 0.01);

    shared.borrow_mut().duration = None;
    card.tick(t0);
    assert_eq!(card.progress(), 0.0);
}

#[test]
fn dropping_a_card_releases_its_track() {
    let (track, shared) = FakeTrack::new();
    let card = CardPlayer::real("1", Box::new(track));
    assert!(!shared.borrow().dropped);
    drop(card);
    assert!(shared.borrow().dropped);
}
