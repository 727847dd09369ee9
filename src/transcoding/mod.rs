//! Converting temptation events into standalone gallery events

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;

use crate::language::{Descriptor, Layout};
use crate::scanning::{load, split_lines};

mod converter;
mod error;
mod pictures;

// Re-export all public symbols
pub use converter::*;
pub use error::*;
pub use pictures::*;

/// Derived events are numbered from here up.
pub const FIRST_DERIVED_ID: u32 = 9200;

/// Events this short are stubs rather than scenes.
pub const MINIMUM_SCENE_LINES: usize = 23;

/// Source of ids for derived events. Each call must hand out the next id
/// exactly once, even if called from several threads.
pub trait Sequence {
    fn next(&self) -> u32;
}

#[derive(Debug)]
pub struct Counter {
    value: AtomicU32,
}

impl Counter {
    pub fn new(first: u32) -> Counter {
        Counter {
            value: AtomicU32::new(first),
        }
    }

    /// The id the next call to next() will return.
    pub fn peek(&self) -> u32 {
        self.value
            .load(Ordering::SeqCst)
    }
}

impl Default for Counter {
    fn default() -> Counter {
        Counter::new(FIRST_DERIVED_ID)
    }
}

impl Sequence for Counter {
    fn next(&self) -> u32 {
        self.value
            .fetch_add(1, Ordering::SeqCst)
    }
}

/// Everything the converter looks at besides the event being converted.
pub trait Resources {
    /// Lines of the event with the given id, if there is one.
    fn event(&self, id: u32) -> Option<Vec<String>>;

    /// Whether picture assets are available to check against at all.
    fn has_pictures(&self) -> bool;

    fn has_picture(&self, name: &str) -> bool;
}

/// Resources read from the game's data directories.
pub struct Filesystem<'a> {
    pub events: &'a Path,
    pub pictures: Option<&'a Path>,
}

impl Resources for Filesystem<'_> {
    fn event(&self, id: u32) -> Option<Vec<String>> {
        let path = self
            .events
            .join(event_filename(id));
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) => {
                debug!("Unable to read {}: {}", path.display(), error);
                return None;
            }
        };
        Some(
            content
                .lines()
                .map(str::to_string)
                .collect(),
        )
    }

    fn has_pictures(&self) -> bool {
        self.pictures
            .is_some()
    }

    fn has_picture(&self, name: &str) -> bool {
        match self.pictures {
            Some(dir) => dir
                .join(format!("{}.png", name))
                .exists(),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub pictures: Option<PathBuf>,
    pub overwrite: bool,
}

/// Result of transcoding one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(Descriptor),
    /// A file was already present at the output path and was left alone.
    Kept(Descriptor),
    NotApplicable,
}

impl Outcome {
    pub fn descriptor(&self) -> Option<&Descriptor> {
        match self {
            Outcome::Written(descriptor) => Some(descriptor),
            Outcome::Kept(descriptor) => Some(descriptor),
            Outcome::NotApplicable => None,
        }
    }
}

pub fn event_filename(id: u32) -> String {
    format!("CommonEvent{}.txt", id)
}

/// Convert the lines of one event. No id is consumed here; call render()
/// on the result with the id to give it.
pub fn convert<R: Resources>(lines: Vec<&str>, resources: &R) -> Result<Conversion, TranscodingError> {
    Transcoder::new(lines, resources).convert()
}

/// Convert the event in the given file and write the result alongside it.
pub fn transcode(
    path: &Path,
    ids: &impl Sequence,
    options: &Options,
) -> Result<Outcome, TranscodingError> {
    let content = load(path).map_err(TranscodingError::Unreadable)?;
    let (lines, layout) = split_lines(&content);

    if lines.len() < MINIMUM_SCENE_LINES {
        debug!(
            "{} has only {} lines, not a scene",
            path.display(),
            lines.len()
        );
        return Ok(Outcome::NotApplicable);
    }

    let dir = path
        .parent()
        .unwrap_or(Path::new("."));

    let resources = Filesystem {
        events: dir,
        pictures: options
            .pictures
            .as_deref(),
    };

    let conversion = convert(lines, &resources)?;

    let derived = ids.next();
    let target = dir.join(event_filename(derived));

    let descriptor = Descriptor {
        derived,
        linkage: conversion.linkage,
        path: target.clone(),
    };

    if target.exists() && !options.overwrite {
        debug!("{} already exists, not overwriting", target.display());
        return Ok(Outcome::Kept(descriptor));
    }

    let layout = Layout {
        ending: layout.ending,
        terminated: true,
    };
    let output = layout.join(&conversion.render(derived));

    std::fs::write(&target, output)
        .map_err(|error| TranscodingError::Unwritable(target.clone(), error.to_string()))?;

    debug!(
        "Wrote {} from {}, linked to {}",
        target.display(),
        path.display(),
        conversion.linkage
    );
    Ok(Outcome::Written(descriptor))
}
