use std::path::{Path, PathBuf};

use crate::catalog::{self, Dua};
use crate::config::LibrarySettings;
use crate::error::Result;

/// The data file named on the command line wins over `library.data_path`.
pub fn data_path(cli_arg: Option<String>, library: &LibrarySettings) -> Option<PathBuf> {
    cli_arg
        .map(PathBuf::from)
        .or_else(|| library.data_path.clone())
}

/// Records from `data_path`, or the built-in set when there is none.
pub fn load_duas(data_path: Option<&Path>) -> Result<Vec<Dua>> {
    match data_path {
        Some(path) => {
            let duas = catalog::load_catalog(path)?;
            tracing::info!(path = %path.display(), count = duas.len(), "loaded data file");
            Ok(duas)
        }
        None => {
            tracing::info!("using built-in records");
            Ok(catalog::builtin_duas())
        }
    }
}

/// Base for relative audio paths: `library.audio_dir`, else the data file's directory.
pub fn audio_dir(library: &LibrarySettings, data_path: Option<&Path>) -> Option<PathBuf> {
    library.audio_dir.clone().or_else(|| {
        data_path
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
    })
}
