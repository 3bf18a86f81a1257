// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashwalk
// Digest command handlers

use std::io::Write;

use tracing::debug;

use super::WalkOptions;
use crate::hw::error::Result;
use crate::hw::file::{KeyMode, SelectionPlan, Target, Walker};
use crate::hw::hash::{digest_file, DigestAlgorithm};
use crate::hw::output::{dispatch, DispatchReport, HashResult, SinkPlan};

/// Hashes every file the plan selects. The first unreadable file aborts
/// the whole collection.
pub fn collect_hashes(
	plan: SelectionPlan,
	algorithm: DigestAlgorithm,
	key_mode: KeyMode,
) -> Result<HashResult> {
	let mut result = HashResult::new();
	for entry in Walker::new(plan).walk()? {
		let path = entry?;
		let digest = digest_file(algorithm, &path)?;
		let key = key_mode.key_for(&path)?;
		debug!(path = %path.display(), %digest, "hashed");
		if result.insert(key, digest).is_some() {
			debug!(path = %path.display(), "key collision, replaced earlier digest");
		}
	}
	Ok(result)
}

/// Runs one full invocation: validate, select, digest, dispatch.
///
/// The algorithm and the target are checked before any file is opened,
/// so an invalid request leaves no artifacts behind.
pub fn digest_path<W: Write>(
	options: &WalkOptions,
	console: &mut W,
) -> Result<DispatchReport> {
	let algorithm = DigestAlgorithm::from_name(&options.algorithm)?;
	let target = Target::resolve(&options.path)?;
	let plan =
		SelectionPlan::new(target, &options.pattern, options.recursive);
	let result = collect_hashes(plan, algorithm, options.key_mode)?;

	let sinks = SinkPlan {
		individual: options.individual,
		table: options.table.clone(),
		sidecar_root: options.sidecar_root.clone(),
		color: options.color,
	};
	dispatch(&result, algorithm, &sinks, console)
}
