// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashwalk
// File: src/hw/digest/mod.rs
// Author: hashwalk maintainers
//
// Digest command: selection, hashing and sink dispatch for one run.

pub mod commands;

use std::path::PathBuf;

use crate::hw::file::{KeyMode, DEFAULT_PATTERN};
use crate::hw::hash::DEFAULT_ALGORITHM;

/// Everything a single run needs, already detached from the CLI parser.
#[derive(Clone, Debug)]
pub struct WalkOptions {
	pub path: PathBuf,
	pub pattern: String,
	pub recursive: bool,
	pub algorithm: String,
	pub key_mode: KeyMode,
	pub individual: bool,
	pub table: Option<PathBuf>,
	pub sidecar_root: PathBuf,
	pub color: bool,
}

impl Default for WalkOptions {
	fn default() -> Self {
		Self {
			path: PathBuf::from("."),
			pattern: DEFAULT_PATTERN.to_string(),
			recursive: false,
			algorithm: DEFAULT_ALGORITHM.to_string(),
			key_mode: KeyMode::FileName,
			individual: false,
			table: None,
			sidecar_root: PathBuf::from("."),
			color: false,
		}
	}
}
