#[cfg(test)]
mod events {
    use std::fs;
    use std::path::{Path, PathBuf};

    use paradox::transcoding::{self, Counter, Options, Outcome, Sequence, TranscodingError};

    /// Copy the sample events into a scratch directory, since transcoding
    /// writes its output next to the source.
    fn scratch() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");

        for entry in fs::read_dir("tests/samples/events").expect("Failed to read samples") {
            let path = entry
                .expect("Failed to read directory entry")
                .path();
            let name = path
                .file_name()
                .unwrap();
            fs::copy(
                &path,
                dir.path()
                    .join(name),
            )
            .expect("Failed to copy sample");
        }

        dir
    }

    fn event(dir: &Path, id: u32) -> PathBuf {
        dir.join(format!("CommonEvent{}.txt", id))
    }

    fn expected(name: &str) -> String {
        fs::read_to_string(Path::new("tests/samples/expected").join(name))
            .expect("Failed to read expected output")
    }

    #[test]
    fn scene_converted() {
        let dir = scratch();
        let ids = Counter::default();

        let outcome = transcoding::transcode(&event(dir.path(), 2101), &ids, &Options::default())
            .unwrap();

        let descriptor = outcome
            .descriptor()
            .unwrap()
            .clone();
        assert!(matches!(outcome, Outcome::Written(_)));
        assert_eq!(descriptor.derived, 9200);
        assert_eq!(descriptor.linkage, 3101);
        assert_eq!(descriptor.path, event(dir.path(), 9200));

        let result = fs::read_to_string(&descriptor.path).unwrap();
        assert_eq!(result, expected("CommonEvent9200.txt"));
    }

    #[test]
    fn next_picture_shown() {
        let dir = scratch();
        let pictures = tempfile::tempdir().unwrap();
        fs::write(
            pictures
                .path()
                .join("alma_h2.png"),
            "",
        )
        .unwrap();

        let options = Options {
            pictures: Some(
                pictures
                    .path()
                    .to_path_buf(),
            ),
            overwrite: false,
        };

        transcoding::transcode(&event(dir.path(), 2101), &Counter::default(), &options).unwrap();

        let result = fs::read_to_string(event(dir.path(), 9200)).unwrap();
        assert_eq!(result, expected("CommonEvent9200.pictures.txt"));
    }

    #[test]
    fn short_events_not_applicable() {
        let dir = scratch();
        let ids = Counter::default();

        let outcome = transcoding::transcode(&event(dir.path(), 2102), &ids, &Options::default())
            .unwrap();
        assert_eq!(outcome, Outcome::NotApplicable);

        // no id was used up
        assert_eq!(ids.peek(), 9200);
        assert!(!event(dir.path(), 9200).exists());
    }

    #[test]
    fn failures_do_not_use_ids() {
        let dir = scratch();
        let ids = Counter::default();

        let result = transcoding::transcode(&event(dir.path(), 2103), &ids, &Options::default());
        assert_eq!(result, Err(TranscodingError::LinkageBelowFloor(2, 2999)));
        assert_eq!(ids.peek(), 9200);

        let outcome = transcoding::transcode(&event(dir.path(), 2105), &ids, &Options::default())
            .unwrap();
        assert_eq!(
            outcome
                .descriptor()
                .map(|descriptor| descriptor.derived),
            Some(9200)
        );
    }

    #[test]
    fn linkage_corrected() {
        let dir = scratch();

        let outcome = transcoding::transcode(
            &event(dir.path(), 2105),
            &Counter::default(),
            &Options::default(),
        )
        .unwrap();
        assert_eq!(
            outcome
                .descriptor()
                .map(|descriptor| descriptor.linkage),
            Some(3168)
        );

        // no sibling event for 3168, so no opening picture
        let result = fs::read_to_string(event(dir.path(), 9200)).unwrap();
        let lines: Vec<&str> = result
            .lines()
            .collect();
        assert_eq!(lines.len(), 24);
        assert_eq!(lines[0], "CommonEvent 9200");
        assert_eq!(lines[1], "  999([9200])");
        assert_eq!(lines[2], "  ShowText([\"Line 1\"])");
    }

    #[test]
    fn missing_event() {
        let dir = scratch();

        let result = transcoding::transcode(
            &event(dir.path(), 2999),
            &Counter::default(),
            &Options::default(),
        );
        assert!(matches!(result, Err(TranscodingError::Unreadable(_))));
    }

    #[test]
    fn existing_output_kept_unless_overwriting() {
        let dir = scratch();
        let target = event(dir.path(), 9200);
        fs::write(&target, "placeholder").unwrap();

        let outcome = transcoding::transcode(
            &event(dir.path(), 2101),
            &Counter::default(),
            &Options::default(),
        )
        .unwrap();
        assert!(matches!(outcome, Outcome::Kept(_)));
        assert_eq!(fs::read_to_string(&target).unwrap(), "placeholder");

        let options = Options {
            pictures: None,
            overwrite: true,
        };
        let outcome =
            transcoding::transcode(&event(dir.path(), 2101), &Counter::default(), &options)
                .unwrap();
        assert!(matches!(outcome, Outcome::Written(_)));
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            expected("CommonEvent9200.txt")
        );
    }

    #[test]
    fn crlf_events_written_with_crlf() {
        let dir = scratch();
        let source = event(dir.path(), 2101);
        let content = fs::read_to_string(&source)
            .unwrap()
            .replace('\n', "\r\n");
        fs::write(&source, content).unwrap();

        transcoding::transcode(&source, &Counter::default(), &Options::default()).unwrap();

        let result = fs::read_to_string(event(dir.path(), 9200)).unwrap();
        assert_eq!(result, expected("CommonEvent9200.txt").replace('\n', "\r\n"));
    }

    #[test]
    fn conversion_is_deterministic() {
        let first = scratch();
        let second = scratch();

        for dir in [&first, &second] {
            transcoding::transcode(
                &event(dir.path(), 2101),
                &Counter::default(),
                &Options::default(),
            )
            .unwrap();
        }

        assert_eq!(
            fs::read(event(first.path(), 9200)).unwrap(),
            fs::read(event(second.path(), 9200)).unwrap()
        );
    }

    #[test]
    fn custom_sequence() {
        struct Fixed;

        impl Sequence for Fixed {
            fn next(&self) -> u32 {
                9500
            }
        }

        let dir = scratch();
        let outcome =
            transcoding::transcode(&event(dir.path(), 2101), &Fixed, &Options::default()).unwrap();
        assert_eq!(
            outcome
                .descriptor()
                .map(|descriptor| descriptor.derived),
            Some(9500)
        );
        assert!(event(dir.path(), 9500).exists());
    }
}
