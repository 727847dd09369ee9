//! Adding converted scenes next to the defeat scenes they came from

use std::collections::HashMap;
use tracing::debug;

use crate::language::*;

// Defeat scenes are named "Defeat ..."; the converted copy keeps whatever
// follows that prefix.
const DEFEAT_PREFIX_LENGTH: usize = 6;
const SEDUCTION_PREFIX: &str = "Seduce";

/// What happened when placing one converted scene into the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Inserted { character: String, scene: String },
    AlreadyPresent { character: String },
    Unmatched,
    Ambiguous(Vec<String>),
    MissingOriginal { character: String },
}

/// Map each linkage id to the characters (by position) owning a scene that
/// uses it, once per scene. A character with two scenes on the same id
/// appears twice, since there is then no telling which scene to copy.
pub fn index(library: &Library) -> HashMap<u32, Vec<usize>> {
    let mut table: HashMap<u32, Vec<usize>> = HashMap::new();

    for (i, character) in library
        .characters
        .iter()
        .enumerate()
    {
        for scene in &character.scenes {
            table
                .entry(scene.common)
                .or_default()
                .push(i);
        }
    }

    table
}

pub fn seduction_name(name: &str) -> String {
    let rest: String = name
        .chars()
        .skip(DEFEAT_PREFIX_LENGTH)
        .collect();
    format!("{}{}", SEDUCTION_PREFIX, rest)
}

/// Copy a scene for use by a converted event.
pub fn derive_scene(original: &Scene, derived: u32) -> Scene {
    let mut scene = original.clone();
    scene.common = derived;
    scene.name = seduction_name(&original.name);
    scene
}

/// Insert a scene for every descriptor whose linkage id is used by exactly
/// one scene in the library. Returns one Placement per descriptor, in
/// order. Running this again with the same descriptors changes nothing.
pub fn merge(library: &mut Library, descriptors: &[Descriptor]) -> Vec<Placement> {
    let table = index(library);

    descriptors
        .iter()
        .map(|descriptor| place(library, &table, descriptor))
        .collect()
}

fn place(
    library: &mut Library,
    table: &HashMap<u32, Vec<usize>>,
    descriptor: &Descriptor,
) -> Placement {
    let i = match table
        .get(&descriptor.linkage)
        .map(Vec::as_slice)
    {
        None | Some([]) => return Placement::Unmatched,
        Some([i]) => *i,
        Some(several) => {
            let names = several
                .iter()
                .map(|&i| {
                    library.characters[i]
                        .name
                        .clone()
                })
                .collect();
            return Placement::Ambiguous(names);
        }
    };

    let character = &mut library.characters[i];

    if character
        .find_scene(descriptor.derived)
        .is_some()
    {
        debug!(
            "Scene {} has already been added to {}, skipping",
            descriptor.derived, character.name
        );
        return Placement::AlreadyPresent {
            character: character
                .name
                .clone(),
        };
    }

    match character.find_scene(descriptor.linkage) {
        Some(position) => {
            let scene = derive_scene(&character.scenes[position], descriptor.derived);
            let name = scene
                .name
                .clone();
            character
                .scenes
                .insert(position + 1, scene);

            debug!("Added new scene {} to {}", name, character.name);
            Placement::Inserted {
                character: character
                    .name
                    .clone(),
                scene: name,
            }
        }
        None => Placement::MissingOriginal {
            character: character
                .name
                .clone(),
        },
    }
}
