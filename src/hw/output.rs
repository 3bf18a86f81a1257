// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashwalk
// Module: output
// Purpose: Result mapping and the sidecar, table and console sinks.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;
use csv::{Terminator, WriterBuilder};
use tracing::info;

use crate::hw::error::{HashwalkError, Result};
use crate::hw::hash::DigestAlgorithm;

/// Header label of the digest column in table exports. The key column
/// is left unlabelled.
pub const DIGEST_COLUMN: &str = "0";

const STDOUT_LABEL: &str = "<stdout>";

/// Insertion-ordered mapping from display key to hex digest.
///
/// Re-inserting a key replaces its digest but keeps the position the key
/// was first seen at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashResult {
	entries: Vec<(String, String)>,
	index: HashMap<String, usize>,
}

impl HashResult {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the digest previously stored under `key`, if any.
	pub fn insert(
		&mut self,
		key: impl Into<String>,
		digest: impl Into<String>,
	) -> Option<String> {
		let key = key.into();
		let digest = digest.into();
		if let Some(&slot) = self.index.get(&key) {
			let previous =
				std::mem::replace(&mut self.entries[slot].1, digest);
			return Some(previous);
		}
		self.index.insert(key.clone(), self.entries.len());
		self.entries.push((key, digest));
		None
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.index
			.get(key)
			.map(|&slot| self.entries[slot].1.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(key, digest)| (key.as_str(), digest.as_str()))
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(key, _)| key.as_str())
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)>
	for HashResult
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut result = Self::new();
		for (key, digest) in iter {
			result.insert(key, digest);
		}
		result
	}
}

/// Which sinks a run writes to. The console is used only when neither
/// sidecars nor a table were requested.
#[derive(Clone, Debug)]
pub struct SinkPlan {
	pub individual: bool,
	pub table: Option<PathBuf>,
	/// Directory relative keys are resolved against for sidecar files.
	pub sidecar_root: PathBuf,
	pub color: bool,
}

impl SinkPlan {
	pub fn console_enabled(&self) -> bool {
		!self.individual && self.table.is_none()
	}
}

#[derive(Debug, Default)]
pub struct DispatchReport {
	pub sidecars: Vec<PathBuf>,
	pub table: Option<PathBuf>,
	pub console_lines: usize,
}

pub fn dispatch<W: Write>(
	result: &HashResult,
	algorithm: DigestAlgorithm,
	plan: &SinkPlan,
	console: &mut W,
) -> Result<DispatchReport> {
	let mut report = DispatchReport::default();
	if plan.individual {
		report.sidecars =
			write_sidecars(result, algorithm, &plan.sidecar_root)?;
	}
	if let Some(table) = &plan.table {
		write_table(result, table)?;
		report.table = Some(table.clone());
	}
	if plan.console_enabled() {
		report.console_lines =
			write_console(result, console, plan.color)?;
	}
	Ok(report)
}

pub fn sidecar_path(
	root: &Path,
	key: &str,
	algorithm: DigestAlgorithm,
) -> PathBuf {
	root.join(format!("{key}.{}", algorithm.name()))
}

/// Writes `<key>.<algorithm>` holding exactly the digest for every entry.
/// Sidecars written before a failure are left in place.
pub fn write_sidecars(
	result: &HashResult,
	algorithm: DigestAlgorithm,
	root: &Path,
) -> Result<Vec<PathBuf>> {
	let mut written = Vec::with_capacity(result.len());
	for (key, digest) in result.iter() {
		let path = sidecar_path(root, key, algorithm);
		fs::write(&path, digest)
			.map_err(|source| HashwalkError::io(&path, source))?;
		written.push(path);
	}
	info!(count = written.len(), "wrote sidecar files");
	Ok(written)
}

pub fn write_table(result: &HashResult, path: &Path) -> Result<()> {
	let mut writer = WriterBuilder::new()
		.flexible(false)
		.has_headers(false)
		.terminator(Terminator::Any(b'\n'))
		.from_path(path)
		.map_err(|err| HashwalkError::csv(path, err))?;

	writer
		.write_record(["", DIGEST_COLUMN])
		.map_err(|err| HashwalkError::csv(path, err))?;
	for (key, digest) in result.iter() {
		writer
			.write_record([key, digest])
			.map_err(|err| HashwalkError::csv(path, err))?;
	}
	writer
		.flush()
		.map_err(|source| HashwalkError::io(path, source))?;
	info!(path = %path.display(), rows = result.len(), "wrote table");
	Ok(())
}

/// Prints `key: digest` lines in result order and returns how many were
/// written.
pub fn write_console<W: Write>(
	result: &HashResult,
	out: &mut W,
	color: bool,
) -> Result<usize> {
	let mut lines = 0;
	for (key, digest) in result.iter() {
		let written = if color {
			writeln!(out, "{}: {}", key.yellow(), digest.bold().blue())
		} else {
			writeln!(out, "{key}: {digest}")
		};
		written.map_err(|source| HashwalkError::io(STDOUT_LABEL, source))?;
		lines += 1;
	}
	out.flush()
		.map_err(|source| HashwalkError::io(STDOUT_LABEL, source))?;
	Ok(lines)
}
