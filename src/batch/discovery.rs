use std::path::{Path, PathBuf};
use tracing::debug;

use crate::language::LoadingError;

// Temptation events that are not scenes: the team reaction event, and
// group monsters whose scenes are duplicated across several events.
static EXCEPTIONS: [&str; 34] = [
    "CommonEvent2000.txt",
    "CommonEvent2079.txt",
    "CommonEvent2080.txt",
    "CommonEvent2081.txt",
    "CommonEvent2088.txt",
    "CommonEvent2089.txt",
    "CommonEvent2090.txt",
    "CommonEvent2091.txt",
    "CommonEvent2092.txt",
    "CommonEvent2159.txt",
    "CommonEvent2160.txt",
    "CommonEvent2242.txt",
    "CommonEvent2243.txt",
    "CommonEvent2269.txt",
    "CommonEvent2270.txt",
    "CommonEvent2271.txt",
    "CommonEvent2322.txt",
    "CommonEvent2323.txt",
    "CommonEvent2354.txt",
    "CommonEvent2355.txt",
    "CommonEvent2356.txt",
    "CommonEvent2357.txt",
    "CommonEvent2359.txt",
    "CommonEvent2360.txt",
    "CommonEvent2516.txt",
    "CommonEvent2517.txt",
    "CommonEvent2531.txt",
    "CommonEvent2532.txt",
    "CommonEvent2533.txt",
    "CommonEvent2535.txt",
    "CommonEvent2538.txt",
    "CommonEvent2539.txt",
    "CommonEvent2957.txt",
    "CommonEvent2958.txt",
];

// "CommonEvent2xxx.txt"
const MINIMUM_NAME_LENGTH: usize = 19;

/// Whether a file name is one of the temptation events to convert.
pub fn is_candidate(name: &str) -> bool {
    if name.len() < MINIMUM_NAME_LENGTH {
        return false;
    }

    let re = crate::regex!(r"^CommonEvent2.*\.txt$");
    if !re.is_match(name) {
        return false;
    }

    !EXCEPTIONS
        .iter()
        .any(|exception| exception.eq_ignore_ascii_case(name))
}

/// List the temptation events in a directory, sorted by name.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, LoadingError> {
    let entries = std::fs::read_dir(dir).map_err(|error| LoadingError {
        problem: "Failed listing events".to_string(),
        details: error
            .kind()
            .to_string(),
        filename: dir.to_path_buf(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(is_candidate)
                .unwrap_or(false)
        })
        .collect();

    files.sort();

    debug!("Found {} events in {}", files.len(), dir.display());
    Ok(files)
}
