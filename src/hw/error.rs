// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashwalk
// File: error.rs
// Author: hashwalk maintainers

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fatal errors raised while selecting, digesting or writing results.
#[derive(Debug, Error)]
pub enum HashwalkError {
	#[error("path `{}` does not exist or is not a file or directory", path.display())]
	Path { path: PathBuf },

	#[error("unsupported digest algorithm `{algorithm}` (see --list-algorithms)")]
	UnsupportedAlgorithm { algorithm: String },

	#[error("invalid glob pattern `{pattern}`: {source}")]
	Pattern {
		pattern: String,
		#[source]
		source: glob::PatternError,
	},

	#[error("{}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to write table {}: {source}", path.display())]
	Csv {
		path: PathBuf,
		#[source]
		source: csv::Error,
	},
}

impl HashwalkError {
	pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
		Self::Io {
			path: path.as_ref().to_path_buf(),
			source,
		}
	}

	pub fn csv(path: impl AsRef<Path>, source: csv::Error) -> Self {
		Self::Csv {
			path: path.as_ref().to_path_buf(),
			source,
		}
	}
}

pub type Result<T> = std::result::Result<T, HashwalkError>;
