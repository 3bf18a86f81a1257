// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashwalk
// File: lib.rs
// Author: hashwalk maintainers

pub mod hw {
	pub mod app;
	pub mod digest;
	pub mod error;
	pub mod file;
	pub mod hash;
	pub mod output;
}

pub use hw::digest::commands::{collect_hashes, digest_path};
pub use hw::digest::WalkOptions;
pub use hw::error::{HashwalkError, Result};
pub use hw::file::{KeyMode, SelectionPlan, Target};
pub use hw::hash::DigestAlgorithm;
pub use hw::output::HashResult;
