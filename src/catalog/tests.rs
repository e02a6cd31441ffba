use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;
use crate::error::DuabookError;

#[test]
fn builtin_set_has_unique_ids_and_expected_tags() {
    let duas = builtin_duas();
    assert_eq!(duas.len(), 4);
    assert!(validate(&duas).is_ok());

    let sad = duas.iter().find(|d| d.id == "3").unwrap();
    assert_eq!(sad.category, "Sadness");
    assert_eq!(sad.icon, Some(IconKind::Heart));
    assert!(sad.tags.iter().any(|t| t == "grief"));
    assert!(duas.iter().all(|d| d.audio_path(None).is_none()));
}

#[test]
fn load_catalog_parses_dua_tables() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("duas.toml");
    fs::write(
        &path,
        r#"
[[dua]]
id = "a"
category = "Morning"
icon = "sun"
arabic = "..."
translation = "Praise be to Allah"
tags = ["protection"]
audio = "morning.mp3"

[[dua]]
id = "b"
category = "Evening"
arabic = "..."
translation = "We have reached the evening"
"#,
    )
    .unwrap();

    let duas = load_catalog(&path).unwrap();
    assert_eq!(duas.len(), 2);
    assert_eq!(duas[0].icon, Some(IconKind::Sun));
    assert!(duas[0].audio_path(None).is_some());
    assert_eq!(duas[0].transliteration, None);
    assert!(duas[1].tags.is_empty());
    assert_eq!(duas[1].icon, None);
    assert!(duas[1].audio_path(None).is_none());
}

#[test]
fn load_catalog_rejects_duplicate_ids() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("duas.toml");
    fs::write(
        &path,
        r#"
[[dua]]
id = "1"
category = "A"
arabic = "x"
translation = "y"

[[dua]]
id = "1"
category = "B"
arabic = "x"
translation = "y"
"#,
    )
    .unwrap();

    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, DuabookError::Catalog(ref m) if m.contains("duplicate")));
}

#[test]
fn load_catalog_rejects_unknown_icon_and_empty_file() {
    let dir = tempdir().unwrap();

    let bad_icon = dir.path().join("icon.toml");
    fs::write(
        &bad_icon,
        r#"
[[dua]]
id = "1"
category = "A"
arabic = "x"
translation = "y"
icon = "star"
"#,
    )
    .unwrap();
    assert!(matches!(
        load_catalog(&bad_icon),
        Err(DuabookError::DataParse { .. })
    ));

    let empty = dir.path().join("empty.toml");
    fs::write(&empty, "").unwrap();
    assert!(matches!(load_catalog(&empty), Err(DuabookError::Catalog(_))));
}

#[test]
fn validate_rejects_blank_id() {
    let mut duas = builtin_duas();
    duas[2].id = "  ".to_string();
    assert!(matches!(validate(&duas), Err(DuabookError::Catalog(_))));
}

#[test]
fn audio_path_resolves_relative_locators_against_base() {
    let mut d = builtin_duas().remove(0);
    assert_eq!(d.audio_path(Some(Path::new("/srv"))), None);

    d.audio = Some("taha.mp3".to_string());
    assert_eq!(
        d.audio_path(Some(Path::new("/srv/audio"))),
        Some(Path::new("/srv/audio/taha.mp3").to_path_buf())
    );

    d.audio = Some("file:///abs/taha.mp3".to_string());
    assert_eq!(
        d.audio_path(Some(Path::new("/srv/audio"))),
        Some(Path::new("/abs/taha.mp3").to_path_buf())
    );

    d.audio = Some("   ".to_string());
    assert_eq!(d.audio_path(None), None);
}

#[test]
fn title_includes_category() {
    let d = builtin_duas().remove(1);
    assert_eq!(d.title(), "Du'a – General");
}
