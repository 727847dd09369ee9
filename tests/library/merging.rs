#[cfg(test)]
mod merging {
    use std::path::{Path, PathBuf};

    use paradox::language::{Descriptor, Library};
    use paradox::library::{self, Placement};
    use paradox::scanning;

    fn sample() -> (String, Library) {
        let file = Path::new("tests/samples/library.rb");
        let content = scanning::load(file).expect("Failed to load sample library");
        let document = library::parse(&content).expect("Failed to parse sample library");
        (content, document)
    }

    fn descriptor(derived: u32, linkage: u32) -> Descriptor {
        Descriptor {
            derived,
            linkage,
            path: PathBuf::from(format!("CommonEvent{}.txt", derived)),
        }
    }

    #[test]
    fn merged_library_matches_expected() {
        let (_, mut document) = sample();

        let placements = library::merge(
            &mut document,
            &[descriptor(9200, 3101), descriptor(9201, 3202)],
        );
        assert_eq!(
            placements,
            vec![
                Placement::Inserted {
                    character: "Alma Elma".to_string(),
                    scene: "Seduce 1".to_string(),
                },
                Placement::Inserted {
                    character: "Tamamo".to_string(),
                    scene: "Seduce 2".to_string(),
                },
            ]
        );

        let expected = scanning::load(Path::new("tests/samples/library.merged.rb"))
            .expect("Failed to load expected library");
        assert_eq!(library::serialize(&document), expected);
    }

    #[test]
    fn merging_again_is_a_no_op() {
        let (_, mut document) = sample();
        let descriptors = [descriptor(9200, 3101), descriptor(9201, 3202)];

        library::merge(&mut document, &descriptors);
        let once = library::serialize(&document);

        // and from the written text, as a second run would see it
        let mut reread = library::parse(&once).unwrap();
        let placements = library::merge(&mut reread, &descriptors);

        assert!(placements
            .iter()
            .all(|placement| matches!(placement, Placement::AlreadyPresent { .. })));
        assert_eq!(library::serialize(&reread), once);
    }

    #[test]
    fn unknown_linkage_leaves_library_alone() {
        let (content, mut document) = sample();

        let placements = library::merge(&mut document, &[descriptor(9200, 3999)]);
        assert_eq!(placements, vec![Placement::Unmatched]);
        assert_eq!(library::serialize(&document), content);
    }

    #[test]
    fn shared_linkage_is_ambiguous() {
        let (_, mut document) = sample();

        // give Tamamo a scene that also uses Alma Elma's defeat event
        let mut shared = document.characters[0].scenes[0].clone();
        shared.name = "Defeat 3".to_string();
        document.characters[1]
            .scenes
            .push(shared);
        let before = library::serialize(&document);

        let placements = library::merge(&mut document, &[descriptor(9200, 3101)]);
        assert_eq!(
            placements,
            vec![Placement::Ambiguous(vec![
                "Alma Elma".to_string(),
                "Tamamo".to_string()
            ])]
        );
        assert_eq!(library::serialize(&document), before);
    }
}
