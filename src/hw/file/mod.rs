// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashwalk
// File: mod.rs
// Author: hashwalk maintainers

pub mod walker;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::hw::error::{HashwalkError, Result};

pub use walker::{Selection, Walker};

pub const DEFAULT_PATTERN: &str = "*";

/// How a selected file is named in the result mapping.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum KeyMode {
	#[default]
	FileName,
	FullPath,
}

impl KeyMode {
	pub fn from_full_path_flag(full_path: bool) -> Self {
		if full_path {
			Self::FullPath
		} else {
			Self::FileName
		}
	}

	pub fn key_for(self, path: &Path) -> Result<String> {
		match self {
			Self::FileName => path
				.file_name()
				.map(|name| name.to_string_lossy().into_owned())
				.ok_or_else(|| HashwalkError::Path {
					path: path.to_path_buf(),
				}),
			Self::FullPath => fs::canonicalize(path)
				.map(|resolved| resolved.to_string_lossy().into_owned())
				.map_err(|source| HashwalkError::io(path, source)),
		}
	}
}

/// An existing file or directory, canonicalised up front.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Target {
	File(PathBuf),
	Directory(PathBuf),
}

impl Target {
	pub fn resolve(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let missing = || HashwalkError::Path {
			path: path.to_path_buf(),
		};
		let resolved = fs::canonicalize(path).map_err(|err| {
			match err.kind() {
				io::ErrorKind::NotFound => missing(),
				_ => HashwalkError::io(path, err),
			}
		})?;
		let metadata = fs::metadata(&resolved)
			.map_err(|source| HashwalkError::io(&resolved, source))?;
		if metadata.is_file() {
			Ok(Self::File(resolved))
		} else if metadata.is_dir() {
			Ok(Self::Directory(resolved))
		} else {
			Err(missing())
		}
	}

	pub fn path(&self) -> &Path {
		match self {
			Self::File(path) | Self::Directory(path) => path,
		}
	}
}

#[derive(Clone, Debug)]
pub struct SelectionPlan {
	pub target: Target,
	pub pattern: String,
	pub recursive: bool,
}

impl SelectionPlan {
	pub fn new(
		target: Target,
		pattern: impl Into<String>,
		recursive: bool,
	) -> Self {
		Self {
			target,
			pattern: pattern.into(),
			recursive,
		}
	}

	/// The glob evaluated relative to a directory target.
	pub fn effective_pattern(&self) -> String {
		if self.recursive {
			format!("**/{}", self.pattern)
		} else {
			self.pattern.clone()
		}
	}
}
