//! The report printed at the end of a run

use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::library::Placement;
use crate::transcoding::Outcome;

static TEMPLATE: &str = r#"Converted {converted} of {total} events{{ if numbered }}, numbered {first} to {last}{{ endif }}.
{kept} already converted, {not_applicable} not applicable, {failed} failed.
{{ if library }}Scene library: {inserted} added, {present} already present, {skipped} skipped.
{{ endif }}"#;

#[derive(Serialize)]
struct Context {
    total: usize,
    converted: usize,
    kept: usize,
    not_applicable: usize,
    failed: usize,
    numbered: bool,
    first: u32,
    last: u32,
    library: bool,
    inserted: usize,
    present: usize,
    skipped: usize,
}

/// Counts of what happened to each event and each library placement.
#[derive(Debug, Default)]
pub struct Summary {
    pub converted: usize,
    pub kept: usize,
    pub not_applicable: usize,
    pub failed: usize,
    pub first: Option<u32>,
    pub last: Option<u32>,
    pub library: Option<Placements>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Placements {
    pub inserted: usize,
    pub present: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn new() -> Summary {
        Summary::default()
    }

    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Written(_) => self.converted += 1,
            Outcome::Kept(_) => self.kept += 1,
            Outcome::NotApplicable => self.not_applicable += 1,
        }

        if let Some(descriptor) = outcome.descriptor() {
            self.first = Some(
                self.first
                    .map_or(descriptor.derived, |first| first.min(descriptor.derived)),
            );
            self.last = Some(
                self.last
                    .map_or(descriptor.derived, |last| last.max(descriptor.derived)),
            );
        }
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn record_placements(&mut self, placements: &[Placement]) {
        let mut counts = Placements::default();

        for placement in placements {
            match placement {
                Placement::Inserted { .. } => counts.inserted += 1,
                Placement::AlreadyPresent { .. } => counts.present += 1,
                _ => counts.skipped += 1,
            }
        }

        self.library = Some(counts);
    }

    pub fn total(&self) -> usize {
        self.converted + self.kept + self.not_applicable + self.failed
    }

    pub fn render(&self) -> Result<String, tinytemplate::error::Error> {
        let mut tt = TinyTemplate::new();
        tt.set_default_formatter(&tinytemplate::format_unescaped);
        tt.add_template("summary", TEMPLATE)?;

        let placements = self
            .library
            .clone()
            .unwrap_or_default();

        let context = Context {
            total: self.total(),
            converted: self.converted,
            kept: self.kept,
            not_applicable: self.not_applicable,
            failed: self.failed,
            numbered: self
                .first
                .is_some(),
            first: self
                .first
                .unwrap_or_default(),
            last: self
                .last
                .unwrap_or_default(),
            library: self
                .library
                .is_some(),
            inserted: placements.inserted,
            present: placements.present,
            skipped: placements.skipped,
        };

        tt.render("summary", &context)
    }
}
