#[cfg(test)]
mod batch {
    use std::fs;

    use paradox::batch::{self, Summary};
    use paradox::language::Descriptor;
    use paradox::library;
    use paradox::transcoding::{self, Counter, Options};

    /// The whole conversion run, short of the command line: discover the
    /// events, convert each, then place the results in the library.
    #[test]
    fn full_run() {
        let dir = tempfile::tempdir().unwrap();
        for entry in fs::read_dir("tests/samples/events").unwrap() {
            let path = entry
                .unwrap()
                .path();
            fs::copy(
                &path,
                dir.path()
                    .join(
                        path.file_name()
                            .unwrap(),
                    ),
            )
            .unwrap();
        }

        let files = batch::discover(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|path| {
                path.file_name()
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "CommonEvent2101.txt",
                "CommonEvent2102.txt",
                "CommonEvent2103.txt",
                "CommonEvent2105.txt"
            ]
        );

        let ids = Counter::default();
        let mut summary = Summary::new();
        let mut descriptors: Vec<Descriptor> = Vec::new();

        for file in &files {
            match transcoding::transcode(file, &ids, &Options::default()) {
                Ok(outcome) => {
                    summary.record(&outcome);
                    if let Some(descriptor) = outcome.descriptor() {
                        descriptors.push(descriptor.clone());
                    }
                }
                Err(_) => summary.record_failure(),
            }
        }

        // gap-free ids in discovery order
        let derived: Vec<u32> = descriptors
            .iter()
            .map(|descriptor| descriptor.derived)
            .collect();
        assert_eq!(derived, vec![9200, 9201]);

        let content = fs::read_to_string("tests/samples/library.rb").unwrap();
        let mut document = library::parse(&content).unwrap();
        let placements = library::merge(&mut document, &descriptors);
        summary.record_placements(&placements);

        // 3101 belongs to Alma Elma; nobody uses 3168
        assert!(matches!(
            placements[0],
            library::Placement::Inserted { .. }
        ));
        assert_eq!(placements[1], library::Placement::Unmatched);

        assert_eq!(
            summary
                .render()
                .unwrap(),
            "Converted 2 of 4 events, numbered 9200 to 9201.\n0 already converted, 1 not applicable, 1 failed.\nScene library: 1 added, 0 already present, 1 skipped.\n"
        );
    }
}
