// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashwalk
// File: hash.rs
// Author: hashwalk maintainers

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use digest::DynDigest;

use crate::hw::error::{HashwalkError, Result};

pub const DEFAULT_ALGORITHM: &str = "md5";

type HasherFactory = fn() -> Box<dyn DynDigest>;

#[derive(Debug)]
struct AlgorithmEntry {
	name: &'static str,
	aliases: &'static [&'static str],
	factory: HasherFactory,
}

macro_rules! algorithm_registry {
	($($name:literal $(| $alias:literal)* => $hasher:ty),+ $(,)?) => {
		const ALGORITHMS: &[AlgorithmEntry] = &[
			$(
				AlgorithmEntry {
					name: $name,
					aliases: &[$($alias),*],
					factory: || -> Box<dyn DynDigest> {
						Box::new(<$hasher>::default())
					},
				},
			)+
		];
	};
}

algorithm_registry! {
	"blake2b" | "blake2b512" => blake2::Blake2b512,
	"blake2s" | "blake2s256" => blake2::Blake2s256,
	"blake3" => blake3::Hasher,
	"md4" => md4::Md4,
	"md5" => md5::Md5,
	"ripemd160" => ripemd::Ripemd160,
	"sha1" => sha1::Sha1,
	"sha224" => sha2::Sha224,
	"sha256" => sha2::Sha256,
	"sha384" => sha2::Sha384,
	"sha512" => sha2::Sha512,
	"sha512_224" => sha2::Sha512_224,
	"sha512_256" => sha2::Sha512_256,
	"sha3_224" => sha3::Sha3_224,
	"sha3_256" => sha3::Sha3_256,
	"sha3_384" => sha3::Sha3_384,
	"sha3_512" => sha3::Sha3_512,
	"sm3" => sm3::Sm3,
	"whirlpool" => whirlpool::Whirlpool,
}

/// A validated digest algorithm from the built-in registry.
///
/// Lookup is case-insensitive and accepts a few OpenSSL-style aliases;
/// [`DigestAlgorithm::name`] always reports the canonical lowercase name,
/// which is also the suffix used for sidecar files.
#[derive(Clone, Copy, Debug)]
pub struct DigestAlgorithm {
	entry: &'static AlgorithmEntry,
}

impl DigestAlgorithm {
	pub fn from_name(name: &str) -> Result<Self> {
		let needle = name.trim().to_ascii_lowercase();
		ALGORITHMS
			.iter()
			.find(|entry| {
				entry.name == needle
					|| entry.aliases.contains(&needle.as_str())
			})
			.map(|entry| Self { entry })
			.ok_or_else(|| HashwalkError::UnsupportedAlgorithm {
				algorithm: name.to_string(),
			})
	}

	pub fn name(&self) -> &'static str {
		self.entry.name
	}

	/// Length of the hex digest this algorithm produces.
	pub fn hex_len(&self) -> usize {
		(self.entry.factory)().output_size() * 2
	}

	pub fn supported() -> impl Iterator<Item = &'static str> {
		ALGORITHMS.iter().map(|entry| entry.name)
	}
}

impl Default for DigestAlgorithm {
	fn default() -> Self {
		Self::from_name(DEFAULT_ALGORITHM)
			.unwrap_or(Self { entry: &ALGORITHMS[0] })
	}
}

impl PartialEq for DigestAlgorithm {
	fn eq(&self, other: &Self) -> bool {
		self.entry.name == other.entry.name
	}
}

impl Eq for DigestAlgorithm {}

impl fmt::Display for DigestAlgorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.entry.name)
	}
}

pub struct RHash {
	digest: Box<dyn DynDigest>,
}

impl RHash {
	pub fn new(algorithm: DigestAlgorithm) -> Self {
		Self {
			digest: (algorithm.entry.factory)(),
		}
	}

	pub fn process_bytes(&mut self, data: &[u8]) -> Vec<u8> {
		self.digest.update(data);
		self.digest.finalize_reset().to_vec()
	}

	/// Streams `path` through the hasher. The file handle is dropped
	/// before returning, on success and on error alike.
	pub fn read_buffered(&mut self, path: &Path) -> Result<Vec<u8>> {
		let file = File::open(path)
			.map_err(|source| HashwalkError::io(path, source))?;
		let mut reader = BufReader::new(file);
		let mut buffer = vec![0; reader.capacity()];
		loop {
			let count = match reader.read(&mut buffer) {
				Ok(0) => break,
				Ok(count) => count,
				Err(err) if err.kind() == io::ErrorKind::Interrupted => {
					continue
				}
				Err(source) => {
					self.digest.reset();
					return Err(HashwalkError::io(path, source));
				}
			};
			self.digest.update(&buffer[..count]);
		}
		Ok(self.digest.finalize_reset().to_vec())
	}
}

/// Lowercase hex digest of an in-memory buffer.
pub fn digest_bytes(algorithm: DigestAlgorithm, data: &[u8]) -> String {
	hex::encode(RHash::new(algorithm).process_bytes(data))
}

/// Lowercase hex digest of the full content of `path`.
pub fn digest_file(
	algorithm: DigestAlgorithm,
	path: &Path,
) -> Result<String> {
	let digest = RHash::new(algorithm).read_buffered(path)?;
	Ok(hex::encode(digest))
}
