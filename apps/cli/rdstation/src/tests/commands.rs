// Unit tests for argument parsing

use crate::commands::{Cli, Command};

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

/// **VALUE**: Verifies the clap definition is internally consistent.
///
/// **WHY THIS MATTERS**: clap only reports conflicting arg definitions at runtime.
///
/// **BUG THIS CATCHES**: Duplicate short flags or a global arg clashing with a subcommand arg.
#[test]
fn given_cli_definition_when_asserted_then_is_valid() {
    Cli::command().debug_assert();
}

/// **VALUE**: Verifies tag subcommands collect every trailing tag.
///
/// **WHY THIS MATTERS**: Tags are passed as plain positional args.
///
/// **BUG THIS CATCHES**: Only the first tag being kept.
#[test]
fn given_add_tags_args_when_parsed_then_all_tags_collected() {
    // GIVEN/WHEN: Parsing an add-tags invocation with global flags after the subcommand
    let cli = Cli::try_parse_from([
        "rdstation-cli",
        "add-tags",
        "test@test.com",
        "acativo",
        "newsletter",
        "--verbose",
        "--env-file",
        "creds.env",
    ])
    .unwrap();

    // THEN: Tags and globals are both picked up
    assert_eq!(
        cli.command,
        Command::AddTags {
            email: String::from("test@test.com"),
            tags: vec![String::from("acativo"), String::from("newsletter")],
        }
    );
    assert!(cli.verbose);
    assert_eq!(cli.env_file, Some(PathBuf::from("creds.env")));
    assert_eq!(cli.log_dir, None);
}

/// **VALUE**: Verifies tag subcommands refuse to run without tags.
///
/// **WHY THIS MATTERS**: An add with no tags would still PATCH the lead.
///
/// **BUG THIS CATCHES**: Dropping `required = true` on the tags arg.
#[test]
fn given_remove_tags_without_tags_when_parsed_then_error() {
    let result = Cli::try_parse_from(["rdstation-cli", "remove-tags", "test@test.com"]);

    assert!(result.is_err());
}

/// **VALUE**: Verifies the single-email subcommands parse.
///
/// **WHY THIS MATTERS**: These are the most used commands.
///
/// **BUG THIS CATCHES**: Renamed subcommands breaking scripts.
#[test]
fn given_get_and_delete_when_parsed_then_email_captured() {
    let get = Cli::try_parse_from(["rdstation-cli", "get", "a@b.com"]).unwrap();
    let delete = Cli::try_parse_from(["rdstation-cli", "-v", "delete", "a@b.com"]).unwrap();

    assert_eq!(get.command, Command::Get { email: String::from("a@b.com") });
    assert!(!get.verbose);
    assert_eq!(delete.command, Command::Delete { email: String::from("a@b.com") });
    assert!(delete.verbose);
}
