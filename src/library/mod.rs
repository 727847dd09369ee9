//! Reading, updating, and rewriting the scene library

use tracing::debug;

use crate::language::Library;

mod merge;
pub mod parser;
mod writer;

// Re-export all public symbols
pub use merge::*;
pub use parser::LibraryError;
pub use writer::*;

/// Parse the text of a scene library, logging what was found.
pub fn parse(content: &str) -> Result<Library, LibraryError> {
    let result = parser::parse(content);

    match &result {
        Ok(library) => {
            let scenes: usize = library
                .characters
                .iter()
                .map(|character| {
                    character
                        .scenes
                        .len()
                })
                .sum();
            debug!(
                "Found {} character{} with {} scene{}",
                library
                    .characters
                    .len(),
                if library
                    .characters
                    .len()
                    == 1
                {
                    ""
                } else {
                    "s"
                },
                scenes,
                if scenes == 1 { "" } else { "s" }
            );
        }
        Err(error) => {
            debug!(?error);
        }
    }

    result
}
