//! Picture commands: the opening image borrowed from the defeat event, and
//! guessing at a follow-on image the event never shows.

use crate::scanning::is_command;

// Defeat events start with the picture hidden; these are the trailing
// opacity arguments before and after making it visible.
const HIDDEN: &str = "100, 100, 0, 0]";
const VISIBLE: &str = "100, 100, 255, 0]";

/// The first picture shown by an event, made visible. That is either the
/// ShowPicture command plus the MovePicture that immediately follows it, or
/// the ShowPicture alone with its opacity patched.
pub fn default_picture<S: AsRef<str>>(lines: &[S]) -> Option<Vec<String>> {
    let i = lines
        .iter()
        .position(|line| is_command(line.as_ref(), "ShowPicture"))?;
    let show = lines[i].as_ref();

    match lines
        .get(i + 1)
        .map(|next| next.as_ref())
    {
        Some(next) if is_command(next, "MovePicture") => {
            Some(vec![show.to_string(), next.to_string()])
        }
        _ => Some(vec![show.replace(HIDDEN, VISIBLE)]),
    }
}

/// The picture name from a command like
///
/// ```text
/// ShowPicture([5, "80_kamakiri_st02", 0, 0, 0, 0, 100, 100, 0, 0])
/// ```
pub fn picture_name(line: &str) -> Option<&str> {
    let re = crate::regex!(r#"\[\s*\d\s*,\s*"([^"]+)"\s*,"#);
    re.captures(line)
        .and_then(|cap| cap.get(1))
        .map(|one| one.as_str())
}

/// Increment the trailing digit of a picture name, if it has one.
pub fn next_picture_name(name: &str) -> Option<String> {
    let last = name
        .chars()
        .last()?;
    let digit = last.to_digit(10)?;
    let stem = &name[..name.len() - last.len_utf8()];

    Some(format!("{}{}", stem, digit + 1))
}
