//! The fixed table of selectable emotions and the content tags each maps to.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emotion {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub tags: &'static [&'static str],
}

pub const EMOTIONS: &[Emotion] = &[
    Emotion {
        id: "anxiety",
        label: "Anxious",
        icon: "😰",
        tags: &["distress", "confidence", "exam", "meeting"],
    },
    Emotion {
        id: "sadness",
        label: "Sad",
        icon: "💔",
        tags: &["distress", "grief", "forgiveness"],
    },
    Emotion {
        id: "grateful",
        label: "Grateful",
        icon: "✨",
        tags: &["success", "comprehensive"],
    },
    Emotion {
        id: "lost",
        label: "Lost",
        icon: "🌫️",
        tags: &["distress"],
    },
    Emotion {
        id: "happy",
        label: "Happy",
        icon: "😊",
        tags: &["success"],
    },
    Emotion {
        id: "morning",
        label: "Morning",
        icon: "☀️",
        tags: &["comprehensive", "protection"],
    },
    Emotion {
        id: "evening",
        label: "Evening",
        icon: "🌙",
        tags: &["protection"],
    },
];

pub fn find(id: &str) -> Option<&'static Emotion> {
    EMOTIONS.iter().find(|e| e.id == id)
}

/// Tags associated with `id`; unknown ids stand for themselves.
pub fn tags_for(id: &str) -> Vec<&str> {
    match find(id) {
        Some(e) => e.tags.to_vec(),
        None => vec![id],
    }
}

/// Emotion bound to a 1-based number key.
pub fn by_hotkey(n: usize) -> Option<&'static Emotion> {
    n.checked_sub(1).and_then(|i| EMOTIONS.get(i))
}
