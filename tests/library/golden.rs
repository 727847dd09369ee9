#[cfg(test)]
mod golden {
    use std::path::Path;

    use paradox::library;
    use paradox::scanning;

    /// Show where two documents first diverge, line by line.
    fn show_diff(original: &str, result: &str) {
        for (i, (a, b)) in original
            .lines()
            .zip(result.lines())
            .enumerate()
        {
            if a != b {
                eprintln!("line {}:\n  - {}\n  + {}", i + 1, a, b);
                return;
            }
        }
        eprintln!(
            "lengths differ: {} vs {} lines",
            original
                .lines()
                .count(),
            result
                .lines()
                .count()
        );
    }

    #[test]
    fn library_round_trips() {
        let file = Path::new("tests/samples/library.rb");
        let content = scanning::load(file).expect("Failed to load sample library");

        let document = library::parse(&content).expect("Failed to parse sample library");
        assert_eq!(
            document
                .characters
                .len(),
            2
        );

        let result = library::serialize(&document);
        if result != content {
            show_diff(&content, &result);
        }
        assert_eq!(result, content);
    }

    #[test]
    fn crlf_library_round_trips() {
        let file = Path::new("tests/samples/library.rb");
        let content = scanning::load(file)
            .expect("Failed to load sample library")
            .replace('\n', "\r\n");

        let document = library::parse(&content).expect("Failed to parse sample library");
        assert_eq!(library::serialize(&document), content);
    }

    #[test]
    fn unterminated_last_line_preserved() {
        let file = Path::new("tests/samples/library.rb");
        let content = scanning::load(file).expect("Failed to load sample library");
        let content = content.trim_end_matches('\n');

        let document = library::parse(content).expect("Failed to parse sample library");
        assert_eq!(library::serialize(&document), content);
    }

    #[test]
    fn comments_before_name_round_trip() {
        let content = r#"  H_SCENE_ITEMS = {
    1 => {
      # Alma Elma, chapter 3
      :name => "Alma Elma",
      # portrait
      :image => "alma_st01",
      :items => {
        1 => {
          :name => "Defeat 1",
          :common => 3101
        }
      }
    }
  }
"#;

        let document = library::parse(content).unwrap();
        assert_eq!(library::serialize(&document), content);
    }

    #[test]
    fn scenes_renumbered() {
        let content = r#"
  H_SCENE_ITEMS = {
    7 => {
      :name => "Alma Elma",
      :items => {
        4 => {
          :name => "Defeat 1",
          :common => 3101
        },
        9 => {
          :name => "Defeat 2",
          :common => 3102
        }
      }
    }
  }
"#;

        let document = library::parse(content).unwrap();
        let result = library::serialize(&document);

        assert!(result.contains("    7 => {"));
        assert!(result.contains("        1 => {"));
        assert!(result.contains("        2 => {"));
        assert!(!result.contains("        4 => {"));
        assert!(!result.contains("        9 => {"));
    }
}
