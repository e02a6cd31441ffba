use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::model::Dua;
use crate::error::{DuabookError, Result};

#[derive(Deserialize)]
struct DataFile {
    #[serde(rename = "dua", default)]
    duas: Vec<Dua>,
}

/// Parse a TOML data file made of `[[dua]]` tables and validate it.
pub fn load_catalog(path: &Path) -> Result<Vec<Dua>> {
    let raw = fs::read_to_string(path)?;
    let data: DataFile = toml::from_str(&raw).map_err(|source| DuabookError::DataParse {
        path: path.to_path_buf(),
        source,
    })?;

    validate(&data.duas)?;
    tracing::debug!(path = %path.display(), count = data.duas.len(), "loaded dua catalog");
    Ok(data.duas)
}

/// Reject empty record sets, blank ids and duplicate ids.
pub fn validate(duas: &[Dua]) -> Result<()> {
    if duas.is_empty() {
        return Err(DuabookError::Catalog("no duas defined".to_string()));
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(duas.len());
    for d in duas {
        let id = d.id.trim();
        if id.is_empty() {
            return Err(DuabookError::Catalog(format!(
                "dua in category {:?} has an empty id",
                d.category
            )));
        }
        if !seen.insert(id) {
            return Err(DuabookError::Catalog(format!("duplicate dua id {id:?}")));
        }
    }
    Ok(())
}
