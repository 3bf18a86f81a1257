// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashwalk
// File: app.rs
// Author: hashwalk maintainers

use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{crate_name, crate_version, Arg, ArgAction, ArgMatches};
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::hw::digest::commands as digest_commands;
use crate::hw::digest::WalkOptions;
use crate::hw::error::{HashwalkError, Result};
use crate::hw::file::{KeyMode, DEFAULT_PATTERN};
use crate::hw::hash::{DigestAlgorithm, DEFAULT_ALGORITHM};

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "HASHWALK_LOG";

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

pub fn build_cli() -> clap::Command {
	clap::Command::new(crate_name!())
		.color(clap::ColorChoice::Never)
		.help_template(HELP_TEMPLATE)
		.bin_name(crate_name!())
		.version(crate_version!())
		.disable_version_flag(true)
		.about("Generate digests for all files along a path")
		.arg(
			Arg::new("path")
				.value_parser(clap::value_parser!(PathBuf))
				.default_value(".")
				.help("Generate digests for a single file or the files in this directory"),
		)
		.arg(
			Arg::new("pattern")
				.short('p')
				.long("pattern")
				.default_value(DEFAULT_PATTERN)
				.help("Only digest file names matching this glob"),
		)
		.arg(
			Arg::new("algorithm")
				.short('a')
				.long("algorithm")
				.default_value(DEFAULT_ALGORITHM)
				.help("Digest algorithm identifier (e.g., sha256)"),
		)
		.arg(
			Arg::new("recursive")
				.short('r')
				.long("recursive")
				.help("Search for files recursively")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("individual")
				.short('i')
				.long("individual")
				.help("Write a <file>.<algorithm> digest file for each file hashed")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("output")
				.short('o')
				.long("output")
				.value_parser(clap::value_parser!(PathBuf))
				.help("Write digests to a CSV table at this path"),
		)
		.arg(
			Arg::new("full-path")
				.short('f')
				.long("full-path")
				.help("Key results by the fully resolved path instead of the file name")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("list-algorithms")
				.long("list-algorithms")
				.help("List supported digest algorithms and exit")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("version")
				.short('v')
				.long("version")
				.help("Print version and exit")
				.action(ArgAction::SetTrue),
		)
}

fn init_logging() {
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = tracing_subscriber::registry()
		.with(fmt::layer().with_writer(io::stderr).with_target(false))
		.with(filter)
		.try_init();
}

fn stdout_supports_color() -> bool {
	io::stdout().is_terminal() && env::var_os("NO_COLOR").is_none()
}

/// Turns parsed arguments into run options. Relative sidecar keys are
/// written into `sidecar_root`.
pub fn options_from_matches(
	matches: &ArgMatches,
	sidecar_root: PathBuf,
	color: bool,
) -> WalkOptions {
	let defaults = WalkOptions::default();
	WalkOptions {
		path: matches
			.get_one::<PathBuf>("path")
			.cloned()
			.unwrap_or(defaults.path),
		pattern: matches
			.get_one::<String>("pattern")
			.cloned()
			.unwrap_or(defaults.pattern),
		recursive: matches.get_flag("recursive"),
		algorithm: matches
			.get_one::<String>("algorithm")
			.cloned()
			.unwrap_or(defaults.algorithm),
		key_mode: KeyMode::from_full_path_flag(
			matches.get_flag("full-path"),
		),
		individual: matches.get_flag("individual"),
		table: matches.get_one::<PathBuf>("output").cloned(),
		sidecar_root,
		color,
	}
}

fn print_version() {
	println!(
		"{} version: {}",
		crate_name!().yellow(),
		crate_version!().bold().blue()
	);
}

fn print_algorithms() -> Result<()> {
	let stdout = io::stdout();
	let mut out = stdout.lock();
	for name in DigestAlgorithm::supported() {
		writeln!(out, "{name}")
			.map_err(|source| HashwalkError::io("<stdout>", source))?;
	}
	Ok(())
}

fn execute(matches: &ArgMatches) -> Result<()> {
	if matches.get_flag("version") {
		print_version();
		return Ok(());
	}
	if matches.get_flag("list-algorithms") {
		return print_algorithms();
	}

	let cwd = env::current_dir()
		.map_err(|source| HashwalkError::io(".", source))?;
	let options =
		options_from_matches(matches, cwd, stdout_supports_color());
	tracing::debug!(?options, "starting run");

	let stdout = io::stdout();
	let mut console = stdout.lock();
	digest_commands::digest_path(&options, &mut console)?;
	Ok(())
}

pub fn run() -> ExitCode {
	init_logging();
	let matches = build_cli().get_matches();
	match execute(&matches) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("{} {}", "error:".red().bold(), err);
			ExitCode::FAILURE
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(args: &[&str]) -> ArgMatches {
		build_cli()
			.try_get_matches_from(
				std::iter::once("hashwalk").chain(args.iter().copied()),
			)
			.unwrap()
	}

	#[test]
	fn defaults_match_documented_behaviour() {
		let options =
			options_from_matches(&parse(&[]), PathBuf::from("/out"), false);
		assert_eq!(options.path, PathBuf::from("."));
		assert_eq!(options.pattern, "*");
		assert_eq!(options.algorithm, "md5");
		assert_eq!(options.key_mode, KeyMode::FileName);
		assert!(!options.recursive);
		assert!(!options.individual);
		assert!(options.table.is_none());
		assert_eq!(options.sidecar_root, PathBuf::from("/out"));
	}

	#[test]
	fn short_flags_are_wired() {
		let matches = parse(&[
			"data", "-p", "*.txt", "-a", "sha256", "-r", "-i", "-o",
			"out.csv", "-f",
		]);
		let options =
			options_from_matches(&matches, PathBuf::from("."), false);
		assert_eq!(options.path, PathBuf::from("data"));
		assert_eq!(options.pattern, "*.txt");
		assert_eq!(options.algorithm, "sha256");
		assert!(options.recursive);
		assert!(options.individual);
		assert_eq!(options.table, Some(PathBuf::from("out.csv")));
		assert_eq!(options.key_mode, KeyMode::FullPath);
	}

	#[test]
	fn lowercase_v_is_the_version_flag() {
		assert!(parse(&["-v"]).get_flag("version"));
		assert!(build_cli()
			.try_get_matches_from(["hashwalk", "-V"])
			.is_err());
	}

	#[test]
	fn version_short_circuits_validation() {
		let matches = parse(&["/definitely/not/here", "-v", "-a", "nope"]);
		assert!(execute(&matches).is_ok());
	}
}
