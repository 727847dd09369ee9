use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};

use paradox::batch::{self, Summary};
use paradox::language::Descriptor;
use paradox::library::{self, Placement};
use paradox::scanning;
use paradox::transcoding::{self, Counter, Options};

mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("paradox")
        .version(VERSION)
        .propagate_version(true)
        .about("Turn temptation events into gallery scenes.")
        .disable_help_subcommand(true)
        .subcommand(
            Command::new("convert")
                .about("Convert every temptation event and add the results to the scene library")
                .arg(
                    Arg::new("events")
                        .short('c')
                        .long("events")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory holding the CommonEvent text files."),
                )
                .arg(
                    Arg::new("library")
                        .short('l')
                        .long("library")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("The Ruby script containing the H_SCENE_ITEMS scene library."),
                )
                .arg(
                    Arg::new("pictures")
                        .short('p')
                        .long("pictures")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory of picture assets. If given, converted events will also show the next picture in a sequence when one exists on disk."),
                )
                .arg(
                    Arg::new("overwrite")
                        .short('o')
                        .long("overwrite")
                        .action(ArgAction::SetTrue)
                        .help("Replace converted events that already exist."),
                )
                .arg(
                    Arg::new("skip-library")
                        .long("skip-library")
                        .action(ArgAction::SetTrue)
                        .help("Only convert the events; leave the scene library untouched."),
                )
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .action(ArgAction::SetTrue)
                        .help("Report progress in detail."),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Check that the scene library survives being read and written back")
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .action(ArgAction::SetTrue)
                        .help("Report progress in detail."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("The Ruby script containing the H_SCENE_ITEMS scene library. The result is written alongside it with a .test extension."),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("convert", submatches)) => {
            initialize_logging(submatches);
            convert(submatches);
        }
        Some(("check", submatches)) => {
            initialize_logging(submatches);
            check(submatches);
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: paradox [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn initialize_logging(submatches: &ArgMatches) {
    let level = if submatches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn required_path<'a>(submatches: &'a ArgMatches, name: &str) -> &'a Path {
    match submatches.get_one::<PathBuf>(name) {
        Some(path) => path,
        // clap enforces required arguments before we get here
        None => {
            eprintln!("{}: missing --{}", "error".bright_red(), name);
            std::process::exit(2);
        }
    }
}

fn convert(submatches: &ArgMatches) {
    let events = required_path(submatches, "events");
    let filename = required_path(submatches, "library");

    let options = Options {
        pictures: submatches
            .get_one::<PathBuf>("pictures")
            .cloned(),
        overwrite: submatches.get_flag("overwrite"),
    };
    debug!(?options);

    let files = match batch::discover(events) {
        Ok(files) => files,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    };
    info!("Converting {} events from {}", files.len(), events.display());

    let ids = Counter::default();
    let mut summary = Summary::new();
    let mut descriptors: Vec<Descriptor> = Vec::new();

    for file in &files {
        match transcoding::transcode(file, &ids, &options) {
            Ok(outcome) => {
                summary.record(&outcome);
                if let Some(descriptor) = outcome.descriptor() {
                    descriptors.push(descriptor.clone());
                }
            }
            Err(error) => {
                let source = scanning::load(file).unwrap_or_default();
                eprintln!(
                    "{}",
                    problem::full_transcoding_error(&error, file, &source)
                );
                summary.record_failure();
            }
        }
    }

    if !submatches.get_flag("skip-library") {
        let placements = update_library(filename, &descriptors);
        summary.record_placements(&placements);
    }

    match summary.render() {
        Ok(report) => print!("{}", report),
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            std::process::exit(1);
        }
    }
}

fn update_library(filename: &Path, descriptors: &[Descriptor]) -> Vec<Placement> {
    let content = match scanning::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    };

    let mut document = match library::parse(&content) {
        Ok(document) => document,
        Err(error) => {
            eprintln!(
                "{}",
                problem::full_library_error(&error, filename, &content)
            );
            std::process::exit(1);
        }
    };

    let placements = library::merge(&mut document, descriptors);

    for (placement, descriptor) in placements
        .iter()
        .zip(descriptors)
    {
        if let Some(report) = problem::placement_report(placement, descriptor) {
            eprintln!("{}", report);
        }
    }

    let changed = placements
        .iter()
        .any(|placement| matches!(placement, Placement::Inserted { .. }));

    if !changed {
        info!("No new scenes; {} left unchanged", filename.display());
        return placements;
    }

    if let Err(error) = batch::backup(filename) {
        eprintln!("{}", problem::concise_loading_error(&error));
        std::process::exit(1);
    }

    if let Err(error) = std::fs::write(filename, library::serialize(&document)) {
        eprintln!(
            "{}: {}: {}",
            "error".bright_red(),
            filename.display(),
            error
                .to_string()
                .bold()
        );
        std::process::exit(1);
    }

    info!("Updated {}", filename.display());
    placements
}

fn check(submatches: &ArgMatches) {
    let filename = required_path(submatches, "filename");

    let content = match scanning::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    };

    let document = match library::parse(&content) {
        Ok(document) => document,
        Err(error) => {
            eprintln!(
                "{}",
                problem::full_library_error(&error, filename, &content)
            );
            std::process::exit(1);
        }
    };

    let result = library::serialize(&document);

    let mut target = filename
        .as_os_str()
        .to_owned();
    target.push(".test");
    let target = PathBuf::from(target);

    if let Err(error) = std::fs::write(&target, &result) {
        eprintln!(
            "{}: {}: {}",
            "error".bright_red(),
            target.display(),
            error
                .to_string()
                .bold()
        );
        std::process::exit(1);
    }

    if result == content {
        println!("{} is identical to {}", target.display(), filename.display());
    } else {
        println!(
            "{}: {} differs from {}",
            "warning".bright_yellow(),
            target.display(),
            filename.display()
        );
        std::process::exit(1);
    }
}
