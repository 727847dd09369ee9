// Types representing the scene library and converted events

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
