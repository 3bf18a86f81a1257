// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashwalk
// File: cli.rs
// Author: hashwalk maintainers

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use hashwalk::hw::hash::digest_bytes;
use hashwalk::DigestAlgorithm;
use tempfile::tempdir;

fn hashwalk(cwd: &Path, args: &[&str]) -> Output {
	Command::new(assert_cmd::cargo::cargo_bin!("hashwalk"))
		.current_dir(cwd)
		.env("NO_COLOR", "1")
		.env_remove("HASHWALK_LOG")
		.args(args)
		.output()
		.expect("failed to spawn hashwalk")
}

fn digest(algorithm: &str, data: &[u8]) -> String {
	digest_bytes(DigestAlgorithm::from_name(algorithm).unwrap(), data)
}

#[test]
fn version_flag_prints_and_exits() {
	let tmp = tempdir().unwrap();
	let output = hashwalk(tmp.path(), &["-v"]);
	assert!(output.status.success());
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("hashwalk"));
	assert!(stdout.contains(&format!(
		"version: {}",
		env!("CARGO_PKG_VERSION")
	)));
}

#[test]
fn directory_digests_go_to_console_by_default() {
	let tmp = tempdir().unwrap();
	fs::write(tmp.path().join("a.txt"), "hello").unwrap();
	fs::write(tmp.path().join("b.log"), "ignored").unwrap();

	let output = hashwalk(tmp.path(), &[".", "-p", "*.txt"]);
	assert!(output.status.success());
	assert_eq!(
		String::from_utf8_lossy(&output.stdout),
		format!("a.txt: {}\n", digest("md5", b"hello"))
	);
	assert_eq!(
		digest("md5", b"hello"),
		"5d41402abc4b2a76b9719d911017c592"
	);
}

#[test]
fn recursive_flag_reaches_nested_files() {
	let tmp = tempdir().unwrap();
	fs::create_dir(tmp.path().join("nested")).unwrap();
	fs::write(tmp.path().join("nested/c.txt"), "c").unwrap();

	let flat = hashwalk(tmp.path(), &["-p", "*.txt"]);
	assert!(flat.status.success());
	assert!(flat.stdout.is_empty());

	let deep = hashwalk(tmp.path(), &["-p", "*.txt", "-r"]);
	assert!(deep.status.success());
	assert_eq!(
		String::from_utf8_lossy(&deep.stdout),
		format!("c.txt: {}\n", digest("md5", b"c"))
	);
}

#[test]
fn individual_flag_writes_sidecar_in_working_directory() {
	let input = tempdir().unwrap();
	let cwd = tempdir().unwrap();
	let file = input.path().join("a.bin");
	fs::write(&file, [1u8, 2, 3, 4]).unwrap();

	let output = hashwalk(
		cwd.path(),
		&[file.to_str().unwrap(), "-a", "sha256", "-i"],
	);
	assert!(output.status.success());
	assert!(output.stdout.is_empty());
	assert_eq!(
		fs::read_to_string(cwd.path().join("a.bin.sha256")).unwrap(),
		digest("sha256", &[1, 2, 3, 4])
	);
}

#[test]
fn full_path_sidecar_lands_next_to_the_file() {
	let input = tempdir().unwrap();
	let cwd = tempdir().unwrap();
	fs::write(input.path().join("a.bin"), "x").unwrap();

	let output = hashwalk(
		cwd.path(),
		&[input.path().to_str().unwrap(), "-i", "-f"],
	);
	assert!(output.status.success());
	let sidecar = fs::canonicalize(input.path()).unwrap().join("a.bin.md5");
	assert_eq!(fs::read_to_string(sidecar).unwrap(), digest("md5", b"x"));
}

#[test]
fn output_flag_writes_csv_table() {
	let tmp = tempdir().unwrap();
	let data = tmp.path().join("data");
	fs::create_dir(&data).unwrap();
	fs::write(data.join("x.txt"), "one").unwrap();
	fs::write(data.join("y.txt"), "two").unwrap();

	let output = hashwalk(tmp.path(), &["data", "-o", "out.csv"]);
	assert!(output.status.success());
	assert!(output.stdout.is_empty());

	let table = fs::read_to_string(tmp.path().join("out.csv")).unwrap();
	let mut lines: Vec<&str> = table.lines().collect();
	assert_eq!(lines.remove(0), ",0");
	lines.sort();
	assert_eq!(
		lines,
		vec![
			format!("x.txt,{}", digest("md5", b"one")),
			format!("y.txt,{}", digest("md5", b"two")),
		]
	);
}

#[test]
fn unsupported_algorithm_fails_without_artifacts() {
	let tmp = tempdir().unwrap();
	fs::write(tmp.path().join("a.txt"), "hello").unwrap();

	let output =
		hashwalk(tmp.path(), &["-a", "crc32", "-i", "-o", "t.csv"]);
	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("unsupported digest algorithm"));
	assert!(!tmp.path().join("t.csv").exists());
	assert!(!tmp.path().join("a.txt.crc32").exists());
}

#[test]
fn missing_path_fails() {
	let tmp = tempdir().unwrap();
	let output = hashwalk(tmp.path(), &["does-not-exist"]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("does-not-exist"));
}

#[test]
fn list_algorithms_includes_default() {
	let tmp = tempdir().unwrap();
	let output = hashwalk(tmp.path(), &["--list-algorithms"]);
	assert!(output.status.success());
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.lines().any(|line| line == "md5"));
	assert!(stdout.lines().any(|line| line == "sha256"));
}
