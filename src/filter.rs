//! Emotion filtering over the record set.

use crate::catalog::Dua;
use crate::emotion;

/// Whether `dua` matches `emotion_id` by shared tag or by category name
/// (case-insensitive).
pub fn matches(dua: &Dua, emotion_id: &str) -> bool {
    let tags = emotion::tags_for(emotion_id);
    let by_tag = dua.tags.iter().any(|t| tags.contains(&t.as_str()));
    let by_category = dua.category.to_lowercase() == emotion_id.to_lowercase();
    by_tag || by_category
}

/// Indices of the duas visible under `selected`, in source order.
///
/// `None` shows everything.
pub fn visible_indices(duas: &[Dua], selected: Option<&str>) -> Vec<usize> {
    match selected {
        None => (0..duas.len()).collect(),
        Some(emotion_id) => duas
            .iter()
            .enumerate()
            .filter(|(_, d)| matches(d, emotion_id))
            .map(|(i, _)| i)
            .collect(),
    }
}
