//! Pieces of a conversion run that sit around the transcoder and the
//! library: finding the events, keeping a backup, and reporting.

mod backup;
mod discovery;
mod summary;

// Re-export all public symbols
pub use backup::*;
pub use discovery::*;
pub use summary::*;
