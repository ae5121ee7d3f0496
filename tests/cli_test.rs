use clap::Parser;
use scaffold::answers::PromptFailurePolicy;
use scaffold::cli::{Args, Command};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("scaffold")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_run_defaults() {
    let parsed = Args::try_parse_from(make_args(&["run"])).unwrap();

    assert!(!parsed.verbose);
    assert!(!parsed.no_color);
    assert!(!parsed.dry_run);
    match parsed.command {
        Command::Run(run) => {
            assert_eq!(run.path, PathBuf::from("."));
            assert_eq!(run.config, PathBuf::from("./scaffold.yaml"));
            let options = run.answer_options();
            assert!(!options.free_form_booleans);
            assert_eq!(options.on_failure, PromptFailurePolicy::Abort);
        }
        other => panic!("Expected run command, got {other:?}"),
    }
}

#[test]
fn test_run_with_path_and_config() {
    let parsed =
        Args::try_parse_from(make_args(&["run", "./template", "-c", "./template/vars.json"]))
            .unwrap();

    match parsed.command {
        Command::Run(run) => {
            assert_eq!(run.path, PathBuf::from("./template"));
            assert_eq!(run.config, PathBuf::from("./template/vars.json"));
        }
        other => panic!("Expected run command, got {other:?}"),
    }
}

#[test]
fn test_global_flags() {
    let parsed = Args::try_parse_from(make_args(&["-v", "-n", "-d", "run"])).unwrap();
    assert!(parsed.verbose);
    assert!(parsed.no_color);
    assert!(parsed.dry_run);

    // Global flags are accepted after the subcommand too.
    let parsed = Args::try_parse_from(make_args(&["run", "--dry-run", "--verbose"])).unwrap();
    assert!(parsed.dry_run);
    assert!(parsed.verbose);
}

#[test]
fn test_prompt_flags() {
    let parsed = Args::try_parse_from(make_args(&[
        "run",
        "--free-form-booleans",
        "--lenient-prompts",
    ]))
    .unwrap();

    match parsed.command {
        Command::Run(run) => {
            let options = run.answer_options();
            assert!(options.free_form_booleans);
            assert_eq!(options.on_failure, PromptFailurePolicy::Fallback);
        }
        other => panic!("Expected run command, got {other:?}"),
    }
}

#[test]
fn test_version_command() {
    let parsed = Args::try_parse_from(make_args(&["version"])).unwrap();
    assert!(matches!(parsed.command, Command::Version));
}

#[test]
fn test_missing_command() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_too_many_args() {
    assert!(Args::try_parse_from(make_args(&["run", "./template", "extra"])).is_err());
}
