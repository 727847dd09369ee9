//! Types representing the scene library and the results of converting events

use std::path::PathBuf;

/// How the lines of a text file were separated, so that it can be written
/// back out exactly the way it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub ending: &'static str,
    pub terminated: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            ending: "\n",
            terminated: true,
        }
    }
}

impl Layout {
    pub fn join<S: AsRef<str>>(&self, lines: &[S]) -> String {
        let mut result = String::new();

        for (i, line) in lines
            .iter()
            .enumerate()
        {
            if i > 0 {
                result.push_str(self.ending);
            }
            result.push_str(line.as_ref());
        }

        if self.terminated && !lines.is_empty() {
            result.push_str(self.ending);
        }

        result
    }
}

/// The scene library: the gallery records section parsed into characters,
/// with everything around it kept as verbatim lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub leading: Vec<String>,
    pub characters: Vec<Character>,
    pub closer: String,
    pub trailing: Vec<String>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: u32,
    /// Lines between the record opener and the name, replayed as-is.
    pub heading: Vec<String>,
    pub name: String,
    /// Lines between the name and the items marker, replayed as-is.
    pub preamble: Vec<String>,
    pub scenes: Vec<Scene>,
}

impl Character {
    pub fn find_scene(&self, common: u32) -> Option<usize> {
        self.scenes
            .iter()
            .position(|scene| scene.common == common)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    pub name: String,
    pub common: u32,
    pub fadeout: Option<u32>,
    pub condition: Option<Condition>,
    pub background: Option<Background>,
    pub map: Option<String>,
}

/// Unlock condition on a scene. The id may be a number or a symbol, and is
/// kept as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    pub kind: Option<i64>,
    pub id: Option<String>,
    pub op: Option<i64>,
    pub value: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Background {
    pub id: String,
}

/// What converting one event produced: the id assigned to the new event,
/// the defeat event it was linked to, and where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub derived: u32,
    pub linkage: u32,
    pub path: PathBuf,
}
