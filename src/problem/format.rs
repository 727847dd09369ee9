use super::messages::{library_message, transcoding_message};
use owo_colors::OwoColorize;
use paradox::{
    language::{Descriptor, LoadingError},
    library::{LibraryError, Placement},
    transcoding::TranscodingError,
};
use std::path::Path;

/// Format a transcoding error with concise single-line output
pub fn concise_transcoding_error(error: &TranscodingError, filename: &Path) -> String {
    if let TranscodingError::Unreadable(error) = error {
        return concise_loading_error(error);
    }

    let (problem, _) = transcoding_message(error);

    match error.line() {
        Some(i) => format!(
            "{}: {}:{} {}",
            "error".bright_red(),
            filename.to_string_lossy(),
            i + 1,
            problem.bold(),
        ),
        None => format!(
            "{}: {}: {}",
            "error".bright_red(),
            filename.to_string_lossy(),
            problem.bold(),
        ),
    }
}

/// Format a transcoding error with the offending line and an explanation
pub fn full_transcoding_error(error: &TranscodingError, filename: &Path, source: &str) -> String {
    match error.line() {
        Some(i) => {
            let (problem, details) = transcoding_message(error);
            with_context(filename, source, i, &problem, &details)
        }
        None => concise_transcoding_error(error, filename),
    }
}

/// Format a library error, showing the offending line if there is one
pub fn full_library_error(error: &LibraryError, filename: &Path, source: &str) -> String {
    let (problem, details) = library_message(error);

    match error.line() {
        Some(i) => with_context(filename, source, i, &problem, &details),
        None => format!(
            "{}: {}: {}\n\n{}",
            "error".bright_red(),
            filename.to_string_lossy(),
            problem.bold(),
            details
        ),
    }
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error(error: &LoadingError) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    )
}

/// Describe what happened when adding one converted event to the library.
/// Successful insertions are not problems and return None.
pub fn placement_report(placement: &Placement, descriptor: &Descriptor) -> Option<String> {
    let message = match placement {
        Placement::Inserted { .. } => return None,
        Placement::AlreadyPresent { .. } => return None,
        Placement::Unmatched => format!(
            "no character has a scene using defeat event {}",
            descriptor.linkage
        ),
        Placement::Ambiguous(names) => format!(
            "defeat event {} is used by several characters: {}",
            descriptor.linkage,
            names.join(", ")
        ),
        Placement::MissingOriginal { character } => format!(
            "{} has no scene using defeat event {}",
            character, descriptor.linkage
        ),
    };

    Some(format!(
        "{}: {}: {}",
        "warning".bright_yellow(),
        descriptor
            .path
            .display(),
        message.bold()
    ))
}

fn with_context(filename: &Path, source: &str, i: usize, problem: &str, details: &str) -> String {
    let code = source
        .lines()
        .nth(i)
        .unwrap_or("?");
    let line = i + 1;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    format!(
        r#"
{}: {}:{} {}

{:width$} {}
{:width$} {} {}
{:width$} {}

{}
        "#,
        "error".bright_red(),
        filename.to_string_lossy(),
        line,
        problem.bold(),
        ' ',
        '|'.bright_blue(),
        line.bright_blue(),
        '|'.bright_blue(),
        code,
        ' ',
        '|'.bright_blue(),
        details
    )
    .trim_ascii()
    .to_string()
}
