use std::{fmt, path::PathBuf};

use crate::language::LoadingError;

/// Reasons a single event file could not be converted. Line numbers are
/// zero-origin indexes into the source event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodingError {
    Unreadable(LoadingError),
    Unwritable(PathBuf, String),
    MissingLinkage(usize, String),
    LinkageBelowFloor(usize, u32),
    UnterminatedPreamble,
    UnterminatedBranch(usize),
    UnterminatedChoices(usize),
    DegenerateChoices(usize, usize),
    ExitingChoices(usize),
}

impl TranscodingError {
    pub fn line(&self) -> Option<usize> {
        match self {
            TranscodingError::Unreadable(_) => None,
            TranscodingError::Unwritable(_, _) => None,
            TranscodingError::MissingLinkage(line, _) => Some(*line),
            TranscodingError::LinkageBelowFloor(line, _) => Some(*line),
            TranscodingError::UnterminatedPreamble => None,
            TranscodingError::UnterminatedBranch(line) => Some(*line),
            TranscodingError::UnterminatedChoices(line) => Some(*line),
            TranscodingError::DegenerateChoices(line, _) => Some(*line),
            TranscodingError::ExitingChoices(line) => Some(*line),
        }
    }

    pub fn message(&self) -> String {
        match self {
            TranscodingError::Unreadable(error) => error.to_string(),
            TranscodingError::Unwritable(path, details) => {
                format!("failed writing '{}': {}", path.display(), details)
            }
            TranscodingError::MissingLinkage(_, text) => {
                format!("failed to find the defeat id on this line: '{}'", text.trim())
            }
            TranscodingError::LinkageBelowFloor(_, id) => {
                format!("invalid defeat id {}", id)
            }
            TranscodingError::UnterminatedPreamble => {
                "finished the file while still in the preamble".to_string()
            }
            TranscodingError::UnterminatedBranch(_) => {
                "never found the end of the ConditionalBranch block".to_string()
            }
            TranscodingError::UnterminatedChoices(_) => {
                "never found the end of the ShowChoices block".to_string()
            }
            TranscodingError::DegenerateChoices(_, count) => {
                format!(
                    "only found {} When branch{} in a ShowChoices block",
                    count,
                    if *count == 1 { "" } else { "es" }
                )
            }
            TranscodingError::ExitingChoices(_) => {
                "every branch of the ShowChoices block ends the event".to_string()
            }
        }
    }
}

impl fmt::Display for TranscodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line() {
            Some(line) => write!(f, "line {}: {}", line + 1, self.message()),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for TranscodingError {}
