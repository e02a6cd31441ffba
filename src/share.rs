//! Sharing a dua: a configured share command when available, the clipboard otherwise.
//!
//! Failures are logged and reported as an outcome; they never touch playback.
//! Sharing runs off the UI thread, so the last clipboard resort (OSC 52, which
//! writes to the terminal) is handed back as [`ShareOutcome::TerminalCopy`]
//! for the UI thread to finish with [`copy_via_terminal`].

use std::io::Write;
use std::process::{Command, Stdio};

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;

use crate::catalog::Dua;
use crate::error::{DuabookError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn for_dua(dua: &Dua, url: Option<&str>) -> Self {
        Self {
            title: dua.title(),
            text: format!("{}\n\n{}", dua.arabic, dua.translation),
            url: url.unwrap_or_default().to_string(),
        }
    }
}

/// The platform's share sheet.
pub trait SharePlatform {
    fn share(&self, payload: &SharePayload) -> Result<()>;
}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    Failed,
    /// No clipboard helper took the text; it still has to go out as OSC 52.
    TerminalCopy(String),
}

impl ShareOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Shared => "Du'a shared",
            Self::Copied | Self::TerminalCopy(_) => "Du'a copied to clipboard",
            Self::Failed => "Sharing failed",
        }
    }
}

/// Share through `platform` when there is one, otherwise copy the text.
///
/// A failing platform share does not fall back to the clipboard.
pub fn share(
    payload: &SharePayload,
    platform: Option<&dyn SharePlatform>,
    clipboard: &dyn Clipboard,
) -> ShareOutcome {
    match platform {
        Some(p) => match p.share(payload) {
            Ok(()) => {
                tracing::info!(title = %payload.title, "dua shared");
                ShareOutcome::Shared
            }
            Err(e) => {
                tracing::warn!(error = %e, "share failed");
                ShareOutcome::Failed
            }
        },
        None => match clipboard.write_text(&payload.text) {
            Ok(()) => {
                tracing::info!(title = %payload.title, "dua copied to clipboard");
                ShareOutcome::Copied
            }
            Err(e) => {
                tracing::debug!(error = %e, "no clipboard helper; falling back to OSC 52");
                ShareOutcome::TerminalCopy(payload.text.clone())
            }
        },
    }
}

/// Runs a user-configured command and feeds it the payload on stdin.
#[derive(Debug, Clone)]
pub struct CommandShare {
    pub command: String,
}

impl SharePlatform for CommandShare {
    fn share(&self, payload: &SharePayload) -> Result<()> {
        let input = format!("{}\n\n{}\n\n{}\n", payload.title, payload.text, payload.url);
        if pipe_to(&self.command, &[], &input, true)? {
            Ok(())
        } else {
            Err(DuabookError::Share(format!("{} exited unsuccessfully", self.command)))
        }
    }
}

/// Clipboard helper programs in order of preference.
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard;

const CLIPBOARD_HELPERS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        for (bin, args) in CLIPBOARD_HELPERS {
            match pipe_to(bin, args, text, false) {
                Ok(true) => return Ok(()),
                Ok(false) => continue,
                Err(e) => tracing::debug!(helper = bin, error = %e, "clipboard helper failed"),
            }
        }
        Err(DuabookError::Clipboard("wl-copy/xclip/xsel".to_string()))
    }
}

/// Finish a [`ShareOutcome::TerminalCopy`] by writing OSC 52 to `out`.
/// Must run on the thread that owns the terminal.
pub fn copy_via_terminal<W: Write>(out: &mut W, text: &str) -> ShareOutcome {
    match execute!(out, CopyToClipboard::to_clipboard_from(text.as_bytes())) {
        Ok(()) => {
            tracing::info!("dua copied through OSC 52");
            ShareOutcome::Copied
        }
        Err(e) => {
            tracing::warn!(error = %e, "clipboard failed");
            ShareOutcome::Failed
        }
    }
}

/// Spawn `bin` (through `sh -c` when `shell`), write `input` to its stdin and
/// wait. `Ok(false)` when it cannot be spawned or exits non-zero.
fn pipe_to(bin: &str, args: &[&str], input: &str, shell: bool) -> Result<bool> {
    let mut cmd = if shell {
        let mut c = Command::new("sh");
        c.arg("-c").arg(bin);
        c
    } else {
        let mut c = Command::new(bin);
        c.args(args);
        c
    };

    let mut child = match cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(c) => c,
        Err(_) => return Ok(false),
    };
    // Reap the child even when it stopped reading early.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(input.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait()?;
    written?;
    Ok(status.success())
}
