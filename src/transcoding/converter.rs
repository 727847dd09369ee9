//! Line-by-line conversion of a temptation event into a gallery event

use tracing::debug;

use super::pictures::{default_picture, next_picture_name, picture_name};
use super::{Resources, TranscodingError};
use crate::scanning::is_command;

/// Defeat events below this id are not scenes.
pub const LINKAGE_FLOOR: u32 = 3000;

// Known authoring mistakes upstream, where the temptation event names the
// wrong defeat event.
static CORRECTIONS: [(u32, u32); 9] = [
    (3169, 3168),
    (3229, 3228),
    (3230, 3228),
    (3571, 3570),
    (3702, 3819),
    (3722, 3821),
    (3723, 3822),
    (3815, 3744),
    (3957, 3947),
];

// Commands that only make sense during battle.
static DROPPED: [&str; 6] = [
    "ControlVariables",
    "ControlSwitches",
    "ChangeHP",
    "Script",
    r#"ShowText(["Luka takes "#,
    "CallCommonEvent([2000])",
];

static EXITS: [&str; 2] = ["ExitEventProcessing([])", "CallCommonEvent([1999])"];

static KEPT_IN_CHOICES: [&str; 3] = ["ShowText", "ShowPicture", "PlaySE"];

pub fn correct_linkage(id: u32) -> u32 {
    CORRECTIONS
        .iter()
        .find(|(wrong, _)| *wrong == id)
        .map(|(_, right)| *right)
        .unwrap_or(id)
}

/// One line of output. The header and dispatch lines carry the derived id,
/// which is only assigned once conversion has succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    Header,
    Dispatch,
    Verbatim(String),
}

/// A successfully converted event, waiting for its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub lines: Vec<Emitted>,
    pub linkage: u32,
}

impl Conversion {
    pub fn render(&self, id: u32) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| match line {
                Emitted::Header => format!("CommonEvent {}", id),
                Emitted::Dispatch => format!("  999([{}])", id),
                Emitted::Verbatim(text) => text.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct Branch {
    exits: bool,
    lines: Vec<String>,
}

pub struct Transcoder<'i, R: Resources> {
    lines: Vec<&'i str>,
    resources: &'i R,
    output: Vec<Emitted>,
    preamble: bool,
    seen_choices: bool,
    linkage: Option<u32>,
    // (source, output) positions of the most recent ShowPicture
    last_picture: Option<(usize, usize)>,
}

impl<'i, R: Resources> Transcoder<'i, R> {
    pub fn new(lines: Vec<&'i str>, resources: &'i R) -> Transcoder<'i, R> {
        Transcoder {
            lines,
            resources,
            output: Vec::new(),
            preamble: true,
            seen_choices: false,
            linkage: None,
            last_picture: None,
        }
    }

    pub fn convert(mut self) -> Result<Conversion, TranscodingError> {
        let mut i = 0;
        while i < self
            .lines
            .len()
        {
            i = self.process_line(i)?;
        }

        let linkage = match (self.preamble, self.linkage) {
            (false, Some(linkage)) => linkage,
            _ => return Err(TranscodingError::UnterminatedPreamble),
        };

        if self
            .resources
            .has_pictures()
        {
            self.continue_pictures();
        }

        Ok(Conversion {
            lines: self.output,
            linkage,
        })
    }

    /// Handle the line at i, returning the index of the next line to look
    /// at.
    fn process_line(&mut self, i: usize) -> Result<usize, TranscodingError> {
        let line = self.lines[i];

        if i == 0 {
            self.output
                .push(Emitted::Header);
            return Ok(1);
        }

        if self.preamble {
            if line
                .trim()
                .starts_with("999")
            {
                self.output
                    .push(Emitted::Dispatch);
                return Ok(i + 1);
            } else if is_linkage_line(line) {
                self.read_linkage(i)?;
                return Ok(i + 1);
            }
        } else if DROPPED
            .iter()
            .any(|command| is_command(line, command))
        {
            return Ok(i + 1);
        } else if is_command(line, "ShowPicture(") {
            self.last_picture = Some((
                i,
                self.output
                    .len(),
            ));
        } else if is_command(line, "ShowChoices") {
            return self.handle_choices(i);
        } else if is_command(line, "ConditionalBranch") {
            return self.skip_branch(i);
        } else if is_command(line, "Label(") {
            return Ok(self.select_ending(i));
        }

        self.output
            .push(Emitted::Verbatim(line.to_string()));
        Ok(i + 1)
    }

    fn read_linkage(&mut self, i: usize) -> Result<(), TranscodingError> {
        let line = self.lines[i];
        let re = crate::regex!(r#"lose_event_id\s*=\s*(\d\d\d\d)\s*""#);

        let raw: u32 = re
            .captures(line)
            .and_then(|cap| cap.get(1))
            .and_then(|one| {
                one.as_str()
                    .parse()
                    .ok()
            })
            .ok_or_else(|| TranscodingError::MissingLinkage(i, line.to_string()))?;

        let linkage = correct_linkage(raw);
        if linkage < LINKAGE_FLOOR {
            return Err(TranscodingError::LinkageBelowFloor(i, linkage));
        }

        self.linkage = Some(linkage);
        self.preamble = false;

        let picture = self
            .resources
            .event(linkage)
            .and_then(|lines| default_picture(&lines));

        match picture {
            Some(picture) => {
                debug!(
                    "Found defeat id: {}, found default image: {}",
                    linkage,
                    picture[0].trim()
                );
                self.output
                    .extend(
                        picture
                            .into_iter()
                            .map(Emitted::Verbatim),
                    );
            }
            None => {
                debug!("Found defeat id: {}, default image not found", linkage);
            }
        }

        Ok(())
    }

    fn handle_choices(&mut self, i: usize) -> Result<usize, TranscodingError> {
        if !self.seen_choices {
            // The first choice only decides whether the scene happens at
            // all, so it is skipped entirely.
            let end = self
                .find_command(i, "ChoicesEnd")
                .ok_or(TranscodingError::UnterminatedChoices(i))?;
            self.seen_choices = true;
            return Ok(end + 1);
        }

        let mut branches: Vec<Branch> = Vec::new();
        let mut end = None;

        for j in i + 1..self
            .lines
            .len()
        {
            let line = self.lines[j];

            if line
                .trim()
                .is_empty()
            {
                continue;
            } else if is_command(line, "When") {
                branches.push(Branch::default());
            } else if EXITS
                .iter()
                .any(|command| is_command(line, command))
            {
                if let Some(branch) = branches.last_mut() {
                    branch.exits = true;
                }
            } else if KEPT_IN_CHOICES
                .iter()
                .any(|command| is_command(line, command))
            {
                if let Some(branch) = branches.last_mut() {
                    branch
                        .lines
                        .push(line.to_string());
                }
            } else if is_command(line, "ChoicesEnd") {
                end = Some(j);
                break;
            }
        }

        let end = end.ok_or(TranscodingError::UnterminatedChoices(i))?;

        if branches.len() < 2 {
            return Err(TranscodingError::DegenerateChoices(i, branches.len()));
        }

        if branches
            .iter()
            .all(|branch| !branch.exits)
        {
            // no early endings, so the choice is harmless
            for line in &self.lines[i..=end] {
                self.output
                    .push(Emitted::Verbatim(line.to_string()));
            }
            return Ok(end + 1);
        }

        match branches
            .into_iter()
            .find(|branch| !branch.exits)
        {
            Some(branch) => {
                self.output
                    .extend(
                        branch
                            .lines
                            .into_iter()
                            .map(Emitted::Verbatim),
                    );
                Ok(end + 1)
            }
            None => Err(TranscodingError::ExitingChoices(i)),
        }
    }

    /// Conditional branches are all health checks from battle; skip past
    /// the BranchEnd that closes this one.
    fn skip_branch(&mut self, i: usize) -> Result<usize, TranscodingError> {
        let mut depth = 0;

        for j in i..self
            .lines
            .len()
        {
            let line = self.lines[j];
            if is_command(line, "ConditionalBranch") {
                depth += 1;
            } else if is_command(line, "BranchEnd") {
                depth -= 1;
                if depth == 0 {
                    return Ok(j + 1);
                }
            }
        }

        Err(TranscodingError::UnterminatedBranch(i))
    }

    /// Several labels means several endings; the earlier ones are premature
    /// and only the last is kept.
    fn select_ending(&self, i: usize) -> usize {
        let last = (i + 1..self
            .lines
            .len())
            .rev()
            .find(|&j| is_command(self.lines[j], "Label("));

        match last {
            Some(j) => j + 1,
            None => i + 1,
        }
    }

    fn find_command(&self, from: usize, command: &str) -> Option<usize> {
        (from..self
            .lines
            .len())
            .find(|&j| is_command(self.lines[j], command))
    }

    /// Many events have a further progression picture on disk that they
    /// never show. If one exists, show it just before the second
    /// ShowTextAttributes after the last picture.
    fn continue_pictures(&mut self) {
        let (source, output) = match self.last_picture {
            Some(positions) => positions,
            None => {
                debug!("No ShowPicture command found");
                return;
            }
        };

        let line = self.lines[source];
        let name = match picture_name(line.trim()) {
            Some(name) => name,
            None => {
                debug!("No picture name found in '{}'", line.trim());
                return;
            }
        };

        let next = match next_picture_name(name) {
            Some(next) => next,
            None => {
                debug!("Last picture shown: {} does not end in a number", name);
                return;
            }
        };

        if !self
            .resources
            .has_picture(&next)
        {
            debug!("Last picture shown: {}, {} does not exist", name, next);
            return;
        }

        let position = self.output[output..]
            .iter()
            .enumerate()
            .filter(|(_, emitted)| match emitted {
                Emitted::Verbatim(text) => is_command(text, "ShowTextAttributes"),
                _ => false,
            })
            .nth(1)
            .map(|(k, _)| output + k);

        match position {
            Some(position) => {
                debug!("Last picture shown: {}, adding {}", name, next);
                self.output
                    .insert(position, Emitted::Verbatim(line.replace(name, &next)));
            }
            None => {
                debug!("Last picture shown: {}, nowhere to show {}", name, next);
            }
        }
    }
}

fn is_linkage_line(line: &str) -> bool {
    line.to_ascii_lowercase()
        .contains("game_troop.lose_event_id")
}
