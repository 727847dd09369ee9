pub mod batch;
pub mod language;
pub mod library;
pub mod regex;
pub mod scanning;
pub mod transcoding;
