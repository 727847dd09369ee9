//! Tolerant line parser for the gallery section of the scene library

use std::fmt;
use tracing::{debug, warn};

use crate::language::*;
use crate::scanning::*;

/// Parse the whole library. Content outside the records section is kept
/// verbatim; content inside it that isn't recognized is logged and dropped.
pub fn parse(content: &str) -> Result<Library, LibraryError> {
    let (lines, layout) = split_lines(content);

    let mut input = Parser::new();
    input.initialize(lines);
    input.read_library(layout)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    MissingSection,
    UnterminatedSection(usize),
}

impl LibraryError {
    /// Zero-origin line where the problem was detected, if there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            LibraryError::MissingSection => None,
            LibraryError::UnterminatedSection(line) => Some(*line),
        }
    }

    pub fn message(&self) -> String {
        match self {
            LibraryError::MissingSection => {
                "no H_SCENE_ITEMS section found in the scene library".to_string()
            }
            LibraryError::UnterminatedSection(_) => {
                "the H_SCENE_ITEMS section is never closed".to_string()
            }
        }
    }
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line() {
            Some(line) => write!(f, "{}:{}", line + 1, self.message()),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for LibraryError {}

/// A cursor over the immutable lines of the library. Each read_*() method
/// expects to be positioned on the first line of the thing it reads, and
/// leaves the cursor on the first line after that thing's closer.
#[derive(Debug)]
pub struct Parser<'i> {
    lines: Vec<&'i str>,
    offset: usize,
}

impl<'i> Parser<'i> {
    pub fn new() -> Parser<'i> {
        Parser {
            lines: Vec::new(),
            offset: 0,
        }
    }

    pub fn initialize(&mut self, lines: Vec<&'i str>) {
        self.lines = lines;
        self.offset = 0;
    }

    /// Zero-origin index of the next unconsumed line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn peek(&self) -> Option<&'i str> {
        self.lines
            .get(self.offset)
            .copied()
    }

    fn advance(&mut self) {
        self.offset += 1;
    }

    fn take_remaining(&mut self) -> Vec<String> {
        let rest = self.lines[self.offset.min(self.lines.len())..]
            .iter()
            .map(|line| line.to_string())
            .collect();
        self.offset = self
            .lines
            .len();
        rest
    }

    fn unexpected(&self, context: &str, line: &str) {
        warn!(
            "{} parser: unexpected line {} encountered: '{}'",
            context,
            self.offset + 1,
            line
        );
    }

    pub fn read_library(&mut self, layout: Layout) -> Result<Library, LibraryError> {
        // Everything up to and including the section marker, plus anything
        // between it and the first record, is leading text.
        let mut leading = Vec::new();
        loop {
            let line = self
                .peek()
                .ok_or(LibraryError::MissingSection)?;
            self.advance();
            leading.push(line.to_string());

            if is_section_marker(line) {
                break;
            }
        }

        let start = self.offset;

        while let Some(line) = self.peek() {
            if read_record_start(line).is_some() || is_closer(line) {
                break;
            }
            leading.push(line.to_string());
            self.advance();
        }

        let mut characters = Vec::new();
        let closer = loop {
            let line = self
                .peek()
                .ok_or(LibraryError::UnterminatedSection(start))?;

            if let Some(id) = read_record_start(line) {
                debug!("Loading character entry: {}", id);
                self.advance();
                let character = self.read_character(id);
                characters.push(character);
            } else if is_closer(line) {
                self.advance();
                break line.to_string();
            } else {
                self.unexpected("Library", line);
                self.advance();
            }
        };

        let trailing = self.take_remaining();

        Ok(Library {
            leading,
            characters,
            closer,
            trailing,
            layout,
        })
    }

    /// Read a character record. The cursor is expected to be just past the
    /// `id => {` opener.
    pub fn read_character(&mut self, id: u32) -> Character {
        let mut name: Option<String> = None;
        let mut heading = Vec::new();
        let mut preamble = Vec::new();
        let mut scenes = Vec::new();
        let mut items = false;
        let mut closers = 0;

        while let Some(line) = self.peek() {
            if name.is_none() {
                match read_name(line) {
                    Some(found) => {
                        debug!("Loading character: {}", found);
                        name = Some(found.to_string());
                    }
                    None => heading.push(line.to_string()),
                }
            } else if !items {
                if is_items_marker(line) {
                    items = true;
                } else {
                    preamble.push(line.to_string());
                }
            } else if is_closer(line) {
                // one for the items block, one for the record itself
                closers += 1;
                if closers >= 2 {
                    self.advance();
                    break;
                }
            } else if let Some(number) = read_record_start(line) {
                debug!("Loading scene item: {}", number);
                self.advance();
                let scene = self.read_scene();
                scenes.push(scene);
                continue;
            } else {
                self.unexpected("Character", line);
            }
            self.advance();
        }

        Character {
            id,
            heading,
            name: name.unwrap_or_default(),
            preamble,
            scenes,
        }
    }

    /// Read a scene item. The cursor is expected to be just past the
    /// `n => {` opener.
    pub fn read_scene(&mut self) -> Scene {
        let mut scene = Scene::default();

        while let Some(line) = self.peek() {
            if is_condition_opener(line) {
                self.advance();
                scene.condition = Some(self.read_condition());
                continue;
            } else if is_background_opener(line) {
                self.advance();
                scene.background = Some(self.read_background());
                continue;
            } else if is_closer(line) {
                self.advance();
                break;
            }

            match scan(line) {
                Some(Field::Name(name)) => scene.name = name.to_string(),
                Some(Field::Common(common)) => scene.common = common,
                Some(Field::Fadeout(fadeout)) => scene.fadeout = Some(fadeout),
                Some(Field::Map(map)) => scene.map = Some(map.to_string()),
                _ => self.unexpected("Scene", line),
            }
            self.advance();
        }

        scene
    }

    pub fn read_condition(&mut self) -> Condition {
        let mut condition = Condition::default();

        while let Some(line) = self.peek() {
            if is_closer(line) {
                self.advance();
                break;
            }

            match scan(line) {
                Some(Field::Kind(kind)) => condition.kind = Some(kind),
                Some(Field::Id(id)) => condition.id = Some(id.to_string()),
                Some(Field::Op(op)) => condition.op = Some(op),
                Some(Field::Value(value)) => condition.value = Some(value),
                _ => self.unexpected("Condition", line),
            }
            self.advance();
        }

        condition
    }

    pub fn read_background(&mut self) -> Background {
        let mut background = Background::default();

        while let Some(line) = self.peek() {
            if is_closer(line) {
                self.advance();
                break;
            }

            match read_id(line) {
                Some(id) => background.id = id.to_string(),
                None => self.unexpected("Background", line),
            }
            self.advance();
        }

        background
    }
}
