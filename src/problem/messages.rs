use paradox::{library::LibraryError, transcoding::TranscodingError};

/// Generate problem and detail messages for transcoding errors
pub fn transcoding_message(error: &TranscodingError) -> (String, String) {
    match error {
        TranscodingError::Unreadable(error) => (
            error
                .problem
                .clone(),
            error
                .details
                .clone(),
        ),
        TranscodingError::Unwritable(_, details) => (
            "Unable to write converted event".to_string(),
            details.clone(),
        ),
        TranscodingError::MissingLinkage(_, _) => (
            "Defeat event not understood".to_string(),
            r#"
The temptation event names its defeat event on this line, but not as a
four digit literal id, so there is no way to tell which scene it leads to.
            "#
            .trim_ascii()
            .to_string(),
        ),
        TranscodingError::LinkageBelowFloor(_, id) => (
            format!("Invalid defeat event {}", id),
            "Defeat scenes are numbered from 3000 up; this event links to something else."
                .to_string(),
        ),
        TranscodingError::UnterminatedPreamble => (
            "No defeat event named".to_string(),
            r#"
Reached the end of the file without finding which defeat event this
temptation leads to. It is probably not a scene.
            "#
            .trim_ascii()
            .to_string(),
        ),
        TranscodingError::UnterminatedBranch(_) => (
            "Unclosed ConditionalBranch".to_string(),
            "There was no matching BranchEnd before the end of the file.".to_string(),
        ),
        TranscodingError::UnterminatedChoices(_) => (
            "Unclosed ShowChoices".to_string(),
            "There was no ChoicesEnd before the end of the file.".to_string(),
        ),
        TranscodingError::DegenerateChoices(_, count) => (
            format!(
                "ShowChoices with {} branch{}",
                count,
                if *count == 1 { "" } else { "es" }
            ),
            "A choice needs at least two When branches to be worth pruning.".to_string(),
        ),
        TranscodingError::ExitingChoices(_) => (
            "Every choice ends the event".to_string(),
            "None of the When branches continues the scene, so there is nothing to keep."
                .to_string(),
        ),
    }
}

pub fn library_message(error: &LibraryError) -> (String, String) {
    match error {
        LibraryError::MissingSection => (
            "No scene library section".to_string(),
            "The file has no H_SCENE_ITEMS hash to add scenes to.".to_string(),
        ),
        LibraryError::UnterminatedSection(_) => (
            "Unclosed scene library section".to_string(),
            r#"
The H_SCENE_ITEMS hash starts here but the closing brace that ends it was
never found.
            "#
            .trim_ascii()
            .to_string(),
        ),
    }
}
