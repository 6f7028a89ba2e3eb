// crates/report-page-core/src/core/hashing.rs
// ============================================================================
// Module: Report Page Digests
// Description: Content digests for documents and contract artifacts.
// Purpose: Identify audited documents and manifest entries without copying them.
// Dependencies: serde, serde_jcs, serde_json, sha2, thiserror
// ============================================================================

//! ## Overview
//! A digest is written `sha256:<64 lowercase hex digits>`. Documents are
//! digested over their RFC 8785 canonical form, so reordering members or
//! reformatting a page keeps its digest. Artifacts are digested over their
//! exact bytes.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

/// Lowercase hex alphabet.
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Digest algorithms a [`HashDigest`] may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha256,
}

impl HashAlgorithm {
    /// Returns the prefix written before the hex digits.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }

    /// Number of hex digits in a digest of this algorithm.
    const fn hex_len(self) -> usize {
        match self {
            Self::Sha256 => 64,
        }
    }

    /// Parses a digest prefix.
    fn parse(prefix: &str) -> Option<Self> {
        (prefix == Self::Sha256.as_str()).then_some(Self::Sha256)
    }
}

/// Errors raised while computing or parsing digests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// The document could not be written in canonical form.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
    /// The text is not `<algorithm>:<hex>`.
    #[error("malformed digest: {0}")]
    Malformed(String),
}

/// Digest of a document or artifact, serialized as `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HashDigest {
    /// Algorithm that produced `hex`.
    algorithm: HashAlgorithm,
    /// Lowercase hex digits.
    hex: String,
}

impl HashDigest {
    /// Digests `bytes` as they are.
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let hex = Sha256::digest(bytes)
            .iter()
            .flat_map(|byte| [byte >> 4, byte & 0x0f])
            .map(|nibble| char::from(HEX_DIGITS[usize::from(nibble)]))
            .collect();
        Self {
            algorithm: HashAlgorithm::Sha256,
            hex,
        }
    }

    /// Digests the canonical form of `document`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Canonicalization`] when the document cannot be
    /// canonicalized.
    pub fn of_document(document: &Value) -> Result<Self, HashError> {
        let canonical = serde_jcs::to_vec(document)
            .map_err(|err| HashError::Canonicalization(err.to_string()))?;
        Ok(Self::of_bytes(&canonical))
    }

    /// Returns the digest algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Returns the lowercase hex digits.
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm.as_str(), self.hex)
    }
}

impl FromStr for HashDigest {
    type Err = HashError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || HashError::Malformed(value.to_string());
        let (prefix, hex) = value.split_once(':').ok_or_else(malformed)?;
        let algorithm = HashAlgorithm::parse(prefix).ok_or_else(malformed)?;
        let well_formed = hex.len() == algorithm.hex_len()
            && hex.bytes().all(|byte| byte.is_ascii_digit() || (b'a' ..= b'f').contains(&byte));
        if !well_formed {
            return Err(malformed());
        }
        Ok(Self {
            algorithm,
            hex: hex.to_string(),
        })
    }
}

impl TryFrom<String> for HashDigest {
    type Error = HashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HashDigest> for String {
    fn from(value: HashDigest) -> Self {
        value.to_string()
    }
}
