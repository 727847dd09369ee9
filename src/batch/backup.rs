use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::language::LoadingError;

pub fn backup_path(file: &Path) -> PathBuf {
    let mut name = file
        .as_os_str()
        .to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

/// Copy the file aside before changing it. An existing backup is left
/// alone so it keeps holding the untouched original.
pub fn backup(file: &Path) -> Result<Option<PathBuf>, LoadingError> {
    let target = backup_path(file);

    if target.exists() {
        debug!("Backup {} already exists", target.display());
        return Ok(None);
    }

    match std::fs::copy(file, &target) {
        Ok(_) => {
            info!("Backed up {} to {}", file.display(), target.display());
            Ok(Some(target))
        }
        Err(error) => Err(LoadingError {
            problem: "Failed making backup".to_string(),
            details: error
                .kind()
                .to_string(),
            filename: file.to_path_buf(),
        }),
    }
}
