use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Vector icon shown next to a dua's category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Heart,
    Sun,
    Moon,
    Cloud,
    Mosque,
    Book,
}

impl IconKind {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Heart => "♥",
            Self::Sun => "☀",
            Self::Moon => "☾",
            Self::Cloud => "☁",
            Self::Mosque => "۩",
            Self::Book => "📖",
        }
    }
}

/// A single devotional text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dua {
    pub id: String,
    pub category: String,
    /// Body text in Arabic script.
    pub arabic: String,
    pub transliteration: Option<String>,
    pub translation: String,
    /// Citation, e.g. `Surah Taha (20:25-28)`.
    pub reference: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Audio file locator. Cards without one play a simulated recitation.
    pub audio: Option<String>,
    /// Illustration locator. Carried for data compatibility; the TUI does not render images.
    pub illustration: Option<String>,
    pub icon: Option<IconKind>,
}

impl Dua {
    /// Resolve the audio locator against `base` when it is relative.
    pub fn audio_path(&self, base: Option<&Path>) -> Option<PathBuf> {
        let locator = self.audio.as_deref().map(str::trim).filter(|a| !a.is_empty())?;
        let locator = locator.strip_prefix("file://").unwrap_or(locator);
        let path = PathBuf::from(locator);
        match base {
            Some(base) if path.is_relative() => Some(base.join(path)),
            _ => Some(path),
        }
    }

    /// Title used for sharing and the MPRIS metadata.
    pub fn title(&self) -> String {
        format!("Du'a – {}", self.category)
    }
}
