//! Tests for the run, resolve, and rename subcommands.

use super::parse;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_run_defaults() {
    match parse(&["bmd", "run", "songs.txt"]) {
        CliCommand::Run {
            list,
            download_dir,
            jobs,
        } => {
            assert_eq!(list, Path::new("songs.txt"));
            assert_eq!(download_dir, Path::new("downloads"));
            assert!(jobs.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_with_options() {
    match parse(&[
        "bmd",
        "run",
        "songs.txt",
        "--download-dir",
        "/tmp/media",
        "--jobs",
        "4",
    ]) {
        CliCommand::Run {
            list,
            download_dir,
            jobs,
        } => {
            assert_eq!(list, Path::new("songs.txt"));
            assert_eq!(download_dir, Path::new("/tmp/media"));
            assert_eq!(jobs, Some(4));
        }
        _ => panic!("expected Run with options"),
    }
}

#[test]
fn cli_parse_resolve() {
    match parse(&["bmd", "resolve", "songs.txt"]) {
        CliCommand::Resolve { list, jobs } => {
            assert_eq!(list, Path::new("songs.txt"));
            assert!(jobs.is_none());
        }
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_with_jobs() {
    match parse(&["bmd", "resolve", "songs.txt", "--jobs", "2"]) {
        CliCommand::Resolve { jobs, .. } => assert_eq!(jobs, Some(2)),
        _ => panic!("expected Resolve with --jobs"),
    }
}

#[test]
fn cli_parse_rename() {
    match parse(&["bmd", "rename", "downloads"]) {
        CliCommand::Rename { dir } => assert_eq!(dir, Path::new("downloads")),
        _ => panic!("expected Rename"),
    }
}

#[test]
fn cli_rejects_missing_subcommand() {
    use clap::Parser;
    assert!(crate::cli::Cli::try_parse_from(["bmd"]).is_err());
}
