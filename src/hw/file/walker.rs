// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashwalk
// File: walker.rs
// Author: hashwalk maintainers

use std::iter;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern, PatternError};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use super::{SelectionPlan, Target};
use crate::hw::error::{HashwalkError, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
	case_sensitive: true,
	require_literal_separator: true,
	require_literal_leading_dot: false,
};

pub struct Walker {
	plan: SelectionPlan,
}

impl Walker {
	pub fn new(plan: SelectionPlan) -> Self {
		Self { plan }
	}

	/// Starts the traversal. Pattern problems are reported here, before
	/// the first entry is produced.
	pub fn walk(&self) -> Result<Selection> {
		let root = match &self.plan.target {
			Target::File(path) => {
				return Ok(Selection::Single(iter::once(path.clone())))
			}
			Target::Directory(root) => root,
		};

		let effective = self.plan.effective_pattern();
		let pattern = compile(&self.plan.pattern, &effective)?;
		let max_depth = max_depth(&effective);
		debug!(root = %root.display(), pattern = %effective, max_depth, "walking");

		let entries = WalkDir::new(root)
			.min_depth(1)
			.max_depth(max_depth)
			.follow_links(false)
			.sort_by_file_name()
			.into_iter();
		Ok(Selection::Tree {
			root: root.clone(),
			pattern,
			entries,
		})
	}
}

fn compile(raw: &str, effective: &str) -> Result<Pattern> {
	let invalid = |source| HashwalkError::Pattern {
		pattern: raw.to_string(),
		source,
	};
	if Path::new(raw).has_root() {
		return Err(invalid(PatternError {
			pos: 0,
			msg: "non-relative patterns are unsupported",
		}));
	}
	Pattern::new(effective).map_err(invalid)
}

/// Deepest level a pattern can reach below the root; unbounded once it
/// contains `**`.
fn max_depth(pattern: &str) -> usize {
	let components: Vec<_> = Path::new(pattern)
		.components()
		.filter(|c| !matches!(c, Component::CurDir))
		.collect();
	if components
		.iter()
		.any(|c| c.as_os_str() == "**")
	{
		usize::MAX
	} else {
		components.len().max(1)
	}
}

/// Lazily yields the regular files a walk selects, in traversal order.
/// Symlinked directories are never descended into.
pub enum Selection {
	Single(iter::Once<PathBuf>),
	Tree {
		root: PathBuf,
		pattern: Pattern,
		entries: walkdir::IntoIter,
	},
}

impl Iterator for Selection {
	type Item = Result<PathBuf>;

	fn next(&mut self) -> Option<Self::Item> {
		match self {
			Self::Single(once) => once.next().map(Ok),
			Self::Tree {
				root,
				pattern,
				entries,
			} => loop {
				let entry = match entries.next()? {
					Ok(entry) => entry,
					Err(err) => {
						warn!(
							path = ?err.path(),
							error = %err,
							"skipping unreadable entry"
						);
						continue;
					}
				};
				let path = entry.path();
				let relative = match path.strip_prefix(root.as_path()) {
					Ok(relative) => relative,
					Err(_) => continue,
				};
				if !pattern.matches_path_with(relative, MATCH_OPTIONS) {
					continue;
				}
				if path.is_file() {
					debug!(path = %path.display(), "selected");
					return Some(Ok(entry.into_path()));
				}
				trace!(path = %path.display(), "skipping non-file entry");
			},
		}
	}
}
