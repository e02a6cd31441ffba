//! Test helpers: process-wide environment guards and a scripted audio backend.

use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    pub fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    pub fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

/// Scripted stand-in for a real audio track.
pub mod fake_audio {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;
    use std::time::Duration;

    use crate::audio::{AudioBackend, AudioEvent, AudioTrack};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Request {
        Play,
        Pause,
    }

    #[derive(Debug, Default)]
    pub struct TrackState {
        pub path: PathBuf,
        pub requests: Vec<Request>,
        pub pending: VecDeque<AudioEvent>,
        pub position: Duration,
        pub duration: Option<Duration>,
        pub dropped: bool,
    }

    pub type Shared = Rc<RefCell<TrackState>>;

    pub struct FakeTrack(pub Shared);

    impl FakeTrack {
        pub fn new() -> (Self, Shared) {
            let shared: Shared = Rc::new(RefCell::new(TrackState::default()));
            (Self(shared.clone()), shared)
        }
    }

    impl AudioTrack for FakeTrack {
        fn request_play(&mut self) {
            self.0.borrow_mut().requests.push(Request::Play);
        }

        fn request_pause(&mut self) {
            self.0.borrow_mut().requests.push(Request::Pause);
        }

        fn poll_event(&mut self) -> Option<AudioEvent> {
            self.0.borrow_mut().pending.pop_front()
        }

        fn position(&self) -> Duration {
            self.0.borrow().position
        }

        fn duration(&self) -> Option<Duration> {
            self.0.borrow().duration
        }
    }

    impl Drop for FakeTrack {
        fn drop(&mut self) {
            self.0.borrow_mut().dropped = true;
        }
    }

    /// Hands out [`FakeTrack`]s and keeps their shared state for inspection.
    #[derive(Default, Clone)]
    pub struct FakeBackend {
        pub opened: Rc<RefCell<Vec<Shared>>>,
    }

    impl FakeBackend {
        /// Most recently opened track for `path`.
        pub fn track_for(&self, path: &Path) -> Option<Shared> {
            self.opened
                .borrow()
                .iter()
                .rev()
                .find(|t| t.borrow().path == path)
                .cloned()
        }
    }

    impl AudioBackend for FakeBackend {
        fn open(&self, path: &Path) -> Box<dyn AudioTrack> {
            let (track, shared) = FakeTrack::new();
            shared.borrow_mut().path = path.to_path_buf();
            self.opened.borrow_mut().push(shared);
            Box::new(track)
        }
    }

    pub fn push_event(track: &Shared, ev: AudioEvent) {
        track.borrow_mut().pending.push_back(ev);
    }
}
