use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tempfile::NamedTempFile;

use symwatch::cli::{CliArgs, LogLevel};
use symwatch::config::{ConfigFile, Settings, load_and_validate, parse_sleep_millis};
use symwatch::errors::SymwatchError;
use symwatch::types::ResolveMode;
use symwatch::watch::{DEFAULT_MAX_FAILURES, DEFAULT_POLL_INTERVAL};

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["symwatch"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).unwrap()
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn defaults_apply_when_only_positionals_are_given() {
    let settings = Settings::from_args(&args(&["/var/www/current", "service apache2 graceful"]))
        .unwrap();

    assert_eq!(settings.symlink, PathBuf::from("/var/www/current"));
    assert_eq!(settings.command, "service apache2 graceful");
    assert_eq!(settings.watch.interval, DEFAULT_POLL_INTERVAL);
    assert_eq!(settings.watch.max_failures, DEFAULT_MAX_FAILURES);
    assert_eq!(settings.mode, ResolveMode::Absolute);
    assert_eq!(settings.timeout, None);
}

#[test]
fn flags_are_parsed() {
    let a = args(&[
        "/l",
        "true",
        "--sleep",
        "1000",
        "--max-failures",
        "2",
        "--timeout",
        "30",
        "--raw",
        "--log-level",
        "debug",
    ]);
    assert_eq!(a.log_level, Some(LogLevel::Debug));

    let settings = Settings::from_args(&a).unwrap();
    assert_eq!(settings.watch.interval, Duration::from_millis(1000));
    assert_eq!(settings.watch.max_failures, 2);
    assert_eq!(settings.timeout, Some(Duration::from_secs(30)));
    assert_eq!(settings.mode, ResolveMode::Raw);
}

#[test]
fn unusable_sleep_values_fall_back_to_default() {
    for raw in ["-5", "0", "abc", "1.5"] {
        let settings = Settings::from_args(&args(&["/l", "true", "--sleep", raw])).unwrap();
        assert_eq!(settings.watch.interval, DEFAULT_POLL_INTERVAL, "--sleep {raw:?}");
    }
    assert_eq!(parse_sleep_millis(" 250 "), Some(Duration::from_millis(250)));
    assert_eq!(parse_sleep_millis("-1"), None);
}

#[test]
fn missing_symlink_and_command_have_distinct_exit_codes() {
    let err = Settings::from_args(&args(&[])).unwrap_err();
    assert!(matches!(err, SymwatchError::MissingSymlink));
    assert_eq!(err.exit_code(), 1);
    assert!(err.is_usage_error());

    let err = Settings::from_args(&args(&["/l"])).unwrap_err();
    assert!(matches!(err, SymwatchError::MissingCommand));
    assert_eq!(err.exit_code(), 2);

    let err = Settings::from_args(&args(&["/l", ""])).unwrap_err();
    assert!(matches!(err, SymwatchError::MissingCommand));
}

#[test]
fn zero_thresholds_are_rejected() {
    let err = Settings::from_args(&args(&["/l", "true", "--max-failures", "0"])).unwrap_err();
    assert!(matches!(err, SymwatchError::ConfigError(ref msg) if msg.contains("max-failures")));
    assert_eq!(err.exit_code(), 5);

    let err = Settings::from_args(&args(&["/l", "true", "--timeout", "0"])).unwrap_err();
    assert!(matches!(err, SymwatchError::ConfigError(_)));
}

#[test]
fn settings_file_supplies_values_and_flags_win() {
    let file = config_file(
        r#"
[watch]
symlink = "/srv/current"
command = "systemctl reload app"
sleep_ms = 50
max_failures = 9
resolve = "raw"

[command]
timeout_secs = 12
"#,
    );
    let path = file.path().to_str().unwrap();

    let from_file = Settings::from_args(&args(&["--config", path])).unwrap();
    assert_eq!(from_file.symlink, PathBuf::from("/srv/current"));
    assert_eq!(from_file.command, "systemctl reload app");
    assert_eq!(from_file.watch.interval, Duration::from_millis(50));
    assert_eq!(from_file.watch.max_failures, 9);
    assert_eq!(from_file.mode, ResolveMode::Raw);
    assert_eq!(from_file.timeout, Some(Duration::from_secs(12)));

    let overridden = Settings::from_args(&args(&[
        "/other",
        "echo hi",
        "--config",
        path,
        "--max-failures",
        "3",
    ]))
    .unwrap();
    assert_eq!(overridden.symlink, PathBuf::from("/other"));
    assert_eq!(overridden.command, "echo hi");
    assert_eq!(overridden.watch.max_failures, 3);
    assert_eq!(overridden.watch.interval, Duration::from_millis(50));
}

#[test]
fn empty_settings_file_is_valid() {
    let file = config_file("");
    let cfg = load_and_validate(file.path()).unwrap();
    assert!(cfg.watch.symlink.is_none());
    assert!(cfg.command.timeout_secs.is_none());

    let settings = Settings::merge(&args(&["/l", "true"]), &ConfigFile::default()).unwrap();
    assert_eq!(settings.symlink, PathBuf::from("/l"));
}

#[test]
fn unknown_keys_are_rejected() {
    let file = config_file(
        r#"
[watch]
symlink = "/srv/current"
interval = 5
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, SymwatchError::TomlError(_)), "{err:?}");
}

#[test]
fn invalid_values_in_file_return_config_error() {
    let file = config_file(
        r#"
[watch]
max_failures = 0
"#,
    );

    match load_and_validate(file.path()) {
        Err(SymwatchError::ConfigError(msg)) => assert!(msg.contains("max_failures")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }

    let file = config_file(
        r#"
[watch]
resolve = "sideways"
"#,
    );
    assert!(matches!(
        load_and_validate(file.path()),
        Err(SymwatchError::TomlError(_))
    ));
}

#[test]
fn missing_settings_file_is_an_io_error() {
    let err = Settings::from_args(&args(&["/l", "true", "--config", "/no/such/symwatch.toml"]))
        .unwrap_err();
    assert!(matches!(err, SymwatchError::IoError(_)));
}

#[test]
fn resolve_mode_parses_from_str() {
    assert_eq!("Absolute".parse::<ResolveMode>(), Ok(ResolveMode::Absolute));
    assert_eq!(" raw ".parse::<ResolveMode>(), Ok(ResolveMode::Raw));
    assert!("nope".parse::<ResolveMode>().is_err());
}
