//! Serializer for the scene library

use crate::language::*;

pub fn serialize(library: &Library) -> String {
    let mut output = Writer::new();

    output.append_lines(&library.leading);

    for (i, character) in library
        .characters
        .iter()
        .enumerate()
    {
        if i > 0 {
            output.separate();
        }
        output.format_character(character);
    }

    output.append(&library.closer);
    output.append_lines(&library.trailing);

    library
        .layout
        .join(&output.lines)
}

/// Render a single scene item as it would appear at position `ordinal`
/// within its character's items block.
pub fn serialize_scene(scene: &Scene, ordinal: usize) -> Vec<String> {
    let mut output = Writer::new();
    output.format_scene(scene, ordinal);
    output.lines
}

struct Writer {
    lines: Vec<String>,
}

impl Writer {
    fn new() -> Writer {
        Writer { lines: Vec::new() }
    }

    fn append(&mut self, line: &str) {
        self.lines
            .push(line.to_string());
    }

    fn append_lines(&mut self, lines: &[String]) {
        self.lines
            .extend_from_slice(lines);
    }

    /// Put a comma on the end of the previous line, because another field
    /// or record follows it.
    fn separate(&mut self) {
        if let Some(last) = self
            .lines
            .last_mut()
        {
            last.push(',');
        }
    }

    fn format_character(&mut self, character: &Character) {
        self.append(&format!("    {} => {{", character.id));
        self.append_lines(&character.heading);
        self.append(&format!("      :name => \"{}\",", character.name));
        self.append_lines(&character.preamble);
        self.append("      :items => {");

        for (i, scene) in character
            .scenes
            .iter()
            .enumerate()
        {
            if i > 0 {
                self.separate();
            }
            self.format_scene(scene, i + 1);
        }

        self.append("      }");
        self.append("    }");
    }

    fn format_scene(&mut self, scene: &Scene, ordinal: usize) {
        self.append(&format!("        {} => {{", ordinal));
        self.append(&format!("          :name => \"{}\"", scene.name));

        self.separate();
        self.append(&format!("          :common => {}", scene.common));

        if let Some(fadeout) = scene.fadeout {
            self.separate();
            self.append(&format!("          :fadeout => {}", fadeout));
        }

        if let Some(condition) = &scene.condition {
            self.separate();
            self.format_condition(condition);
        }

        if let Some(background) = &scene.background {
            self.separate();
            self.format_background(background);
        }

        if let Some(map) = &scene.map {
            self.separate();
            self.append(&format!("          map: {}", map));
        }

        self.append("        }");
    }

    fn format_condition(&mut self, condition: &Condition) {
        self.append("          :condition => {");

        let fields = [
            condition
                .kind
                .map(|kind| format!(":type => {}", kind)),
            condition
                .id
                .as_ref()
                .map(|id| format!(":id => {}", id)),
            condition
                .op
                .map(|op| format!(":op => {}", op)),
            condition
                .value
                .map(|value| format!(":value => {}", value)),
        ];

        for (i, field) in fields
            .iter()
            .flatten()
            .enumerate()
        {
            if i > 0 {
                self.separate();
            }
            self.append(&format!("            {}", field));
        }

        self.append("          }");
    }

    fn format_background(&mut self, background: &Background) {
        self.append("          :background => {");
        self.append(&format!("            :id => {}", background.id));
        self.append("          }");
    }
}
