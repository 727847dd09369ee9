//! Recognizing fields and markers on single lines of text

use std::path::Path;
use tracing::debug;

use crate::language::{Layout, LoadingError};

/// A recognized field on one line of the scene library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'i> {
    RecordStart(u32),
    Name(&'i str),
    Common(u32),
    Kind(i64),
    Op(i64),
    Value(i64),
    Id(&'i str),
    Fadeout(u32),
    Map(&'i str),
}

/// Try each of the known field patterns in turn and return the first that
/// matches.
pub fn scan(line: &str) -> Option<Field<'_>> {
    if let Some(id) = read_record_start(line) {
        return Some(Field::RecordStart(id));
    }
    if let Some(name) = read_name(line) {
        return Some(Field::Name(name));
    }

    let re = crate::regex!(r":common\s*=>\s*(\d+)");
    if let Some(common) = capture_number(re, line) {
        return Some(Field::Common(common));
    }

    let re = crate::regex!(r":type\s*=>\s*(-?\d+)");
    if let Some(kind) = capture_number(re, line) {
        return Some(Field::Kind(kind));
    }

    let re = crate::regex!(r":op\s*=>\s*(-?\d+)");
    if let Some(op) = capture_number(re, line) {
        return Some(Field::Op(op));
    }

    let re = crate::regex!(r":value\s*=>\s*(-?\d+)");
    if let Some(value) = capture_number(re, line) {
        return Some(Field::Value(value));
    }

    if let Some(id) = read_id(line) {
        return Some(Field::Id(id));
    }

    let re = crate::regex!(r":fadeout\s*=>\s*(\d+)");
    if let Some(fadeout) = capture_number(re, line) {
        return Some(Field::Fadeout(fadeout));
    }

    let re = crate::regex!(r"map:\s*([^\]]+\])");
    if let Some(cap) = re.captures(line) {
        return cap
            .get(1)
            .map(|one| Field::Map(one.as_str()));
    }

    None
}

/// Record openers are of the form
///
/// ```text
/// 12 => {
/// ```
pub fn read_record_start(line: &str) -> Option<u32> {
    let re = crate::regex!(r"(\d+)\s*=>\s*\{");
    capture_number(re, line)
}

pub fn read_name(line: &str) -> Option<&str> {
    let re = crate::regex!(r#":name\s*=>\s*"([^"]+)""#);
    re.captures(line)
        .and_then(|cap| cap.get(1))
        .map(|one| one.as_str())
}

/// Ids are usually numeric but can also be symbols such as `:flag_name`.
/// The strict numeric form is tried first and allows any whitespace after
/// the number; the fallback takes anything up to a space or comma, which
/// would keep a trailing tab as part of a numeric id.
pub fn read_id(line: &str) -> Option<&str> {
    let strict = crate::regex!(r":id\s*=>\s*(\d+)\s*(?:,|$)");
    let permissive = crate::regex!(r":id\s*=>\s*([^ ,]+)");

    strict
        .captures(line)
        .or_else(|| permissive.captures(line))
        .and_then(|cap| cap.get(1))
        .map(|one| one.as_str())
}

fn capture_number<N: std::str::FromStr>(re: &::regex::Regex, line: &str) -> Option<N> {
    re.captures(line)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

pub fn is_closer(line: &str) -> bool {
    line.trim_start()
        .starts_with('}')
}

pub fn is_section_marker(line: &str) -> bool {
    line.contains("H_SCENE_ITEMS")
}

pub fn is_items_marker(line: &str) -> bool {
    line.contains(":items")
}

pub fn is_condition_opener(line: &str) -> bool {
    line.trim_start()
        .starts_with(":condition")
}

pub fn is_background_opener(line: &str) -> bool {
    line.trim_start()
        .starts_with(":background")
}

/// Event commands are matched on the start of the trimmed line, ignoring
/// case.
pub fn is_command(line: &str, command: &str) -> bool {
    let line = line.trim();
    match line.get(..command.len()) {
        Some(head) => head.eq_ignore_ascii_case(command),
        None => false,
    }
}

/// Split text into lines, remembering the line ending in use and whether
/// the final line was terminated.
pub fn split_lines(content: &str) -> (Vec<&str>, Layout) {
    let ending = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let terminated = content.ends_with('\n');

    let lines = content
        .lines()
        .collect();

    (
        lines,
        Layout {
            ending,
            terminated,
        },
    )
}

/// Read a file and return an owned String.
pub fn load(filename: &Path) -> Result<String, LoadingError> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename: filename.to_path_buf(),
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename: filename.to_path_buf(),
                }),
            }
        }
    }
}
