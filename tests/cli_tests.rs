use clap::Parser;
use download_sorter::cli::Args;
use download_sorter::config::{Config, LogLevel};
use std::path::PathBuf;

#[test]
fn defaults_are_all_unset() {
    let args = Args::parse_from(["download_sorter"]);
    assert!(args.config.is_none());
    assert!(!args.once && !args.dry_run && !args.json && !args.debug);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn debug_flag_wins_over_log_level() {
    let args = Args::parse_from(["download_sorter", "--log-level", "quiet", "-d"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));
}

#[test]
fn overrides_replace_only_given_values() {
    let args = Args::parse_from([
        "download_sorter",
        "--source-dir",
        "/in",
        "--music-dir",
        "/music",
        "--log-level",
        "info",
        "--log-file",
        "/tmp/x.log",
        "--dry-run",
    ]);
    let mut cfg = Config::default();
    let before = cfg.clone();
    args.apply_overrides(&mut cfg);

    assert_eq!(cfg.source_dir, PathBuf::from("/in"));
    assert_eq!(cfg.destinations.music, PathBuf::from("/music"));
    assert_eq!(cfg.destinations.image, before.destinations.image);
    assert_eq!(cfg.destinations.sfx, before.destinations.sfx);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/x.log")));
    assert!(cfg.dry_run);
}

#[test]
fn unknown_log_level_is_rejected_by_the_parser() {
    let err = Args::try_parse_from(["download_sorter", "--log-level", "shouty"]).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("shouty"), "got: {msg}");
}

#[test]
fn log_level_absent_keeps_config_value() {
    let args = Args::parse_from(["download_sorter"]);
    let mut cfg = Config {
        log_level: LogLevel::Quiet,
        ..Config::default()
    };
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.log_level, LogLevel::Quiet);
}
