//! Streaming file fingerprinting.
//!
//! # Overview
//! This module provides the [`Hasher`] struct for computing a fixed-length
//! content digest of a byte stream. The stream is read exactly once, front to
//! back, in fixed-size chunks, so memory use does not grow with file size.
//!
//! Two cryptographic algorithms are available, both producing 32 bytes:
//! - [`HashAlgorithm::Sha256`] (default)
//! - [`HashAlgorithm::Blake3`]
//!
//! # Example
//!
//! ```
//! use deduplicate::scanner::{hash_to_hex, HashAlgorithm, Hasher};
//!
//! let hasher = Hasher::new(HashAlgorithm::Sha256);
//! let digest = hasher.fingerprint(&b""[..]).unwrap();
//! assert_eq!(
//!     hash_to_hex(&digest),
//!     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
//! );
//! ```

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::Digest as _;

use super::HashError;

/// A 32-byte content digest.
pub type Digest = [u8; 32];

/// Size of the read buffer used while streaming file content.
pub const BUFFER_SIZE: usize = 64 * 1024;

/// Cryptographic hash used to fingerprint file content.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256
    #[default]
    Sha256,
    /// BLAKE3
    Blake3,
}

impl HashAlgorithm {
    /// Display label used in reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA256",
            Self::Blake3 => "BLAKE3",
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Incremental state for one digest computation.
enum State {
    Sha256(sha2::Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl State {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => Self::Sha256(sha2::Sha256::new()),
            HashAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha256(h) => h.update(data),
            Self::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize(self) -> Digest {
        match self {
            Self::Sha256(h) => h.finalize().into(),
            Self::Blake3(h) => *h.finalize().as_bytes(),
        }
    }
}

/// Content fingerprinter.
///
/// Stateless between calls; one instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher {
    algorithm: HashAlgorithm,
}

impl Hasher {
    /// Create a hasher for the given algorithm.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// The algorithm this hasher uses.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Compute the digest of a byte stream.
    ///
    /// Reads `reader` to the end exactly once. The reader is borrowed, not
    /// closed; releasing it is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the stream cannot be fully read.
    /// Interrupted reads are retried.
    pub fn fingerprint<R: Read>(&self, mut reader: R) -> io::Result<Digest> {
        let mut state = State::new(self.algorithm);
        let mut buffer = vec![0u8; BUFFER_SIZE];

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            state.update(&buffer[..n]);
        }

        Ok(state.finalize())
    }

    /// Compute the digest of a file's full content.
    ///
    /// The file handle is dropped on every exit path, including read failures.
    ///
    /// # Errors
    ///
    /// Returns a [`HashError`] naming `path` if the file cannot be opened or read.
    pub fn hash_file(&self, path: &Path) -> Result<Digest, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let digest = self
            .fingerprint(file)
            .map_err(|e| HashError::from_io(path, e))?;

        log::trace!("{} {}", hash_to_hex(&digest), path.display());
        Ok(digest)
    }
}

/// Render a digest as lowercase hexadecimal.
#[must_use]
pub fn hash_to_hex(digest: &Digest) -> String {
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Parse a 64-character hexadecimal string back into a digest.
///
/// Returns `None` for strings of the wrong length or with non-hex characters.
#[must_use]
pub fn hex_to_hash(hex: &str) -> Option<Digest> {
    // from_str_radix alone would accept a leading '+'
    if hex.len() != 64 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let mut digest = [0u8; 32];
    for (i, byte) in digest.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(digest)
}
