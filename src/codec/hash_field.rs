//! Getters and setters for content hashes on CycloneDX hash lists.
//!
//! Hash values are validated against a fixed hex pattern per algorithm at
//! the point of assignment and stored lowercase. Algorithms without a known
//! pattern skip validation.

use crate::codec::keyed_list;
use crate::error::{Result, StandardBomError};
use regex::Regex;
use serde_cyclonedx::cyclonedx::v_1_6::{Hash, HashAlg};
use std::sync::OnceLock;

/// Hash algorithms known to the CycloneDX specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
}

impl HashAlgorithm {
    /// The algorithm tag as it appears in CycloneDX JSON.
    #[must_use]
    pub fn spec_name(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake2b256 => "BLAKE2b-256",
            Self::Blake2b384 => "BLAKE2b-384",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Blake3 => "BLAKE3",
        }
    }

    /// The corresponding CycloneDX model variant.
    #[must_use]
    pub fn to_cyclonedx(self) -> HashAlg {
        match self {
            Self::Md5 => HashAlg::Md5,
            Self::Sha1 => HashAlg::Sha1,
            Self::Sha256 => HashAlg::Sha256,
            Self::Sha384 => HashAlg::Sha384,
            Self::Sha512 => HashAlg::Sha512,
            Self::Sha3_256 => HashAlg::Sha3256,
            Self::Sha3_384 => HashAlg::Sha3384,
            Self::Sha3_512 => HashAlg::Sha3512,
            Self::Blake2b256 => HashAlg::Blake2B256,
            Self::Blake2b384 => HashAlg::Blake2B384,
            Self::Blake2b512 => HashAlg::Blake2B512,
            Self::Blake3 => HashAlg::Blake3,
        }
    }

    /// Map a CycloneDX model variant back. Both enums cover the same
    /// algorithm list, so this is total.
    #[must_use]
    pub fn from_cyclonedx(alg: &HashAlg) -> Self {
        match alg {
            HashAlg::Md5 => Self::Md5,
            HashAlg::Sha1 => Self::Sha1,
            HashAlg::Sha256 => Self::Sha256,
            HashAlg::Sha384 => Self::Sha384,
            HashAlg::Sha512 => Self::Sha512,
            HashAlg::Sha3256 => Self::Sha3_256,
            HashAlg::Sha3384 => Self::Sha3_384,
            HashAlg::Sha3512 => Self::Sha3_512,
            HashAlg::Blake2B256 => Self::Blake2b256,
            HashAlg::Blake2B384 => Self::Blake2b384,
            HashAlg::Blake2B512 => Self::Blake2b512,
            HashAlg::Blake3 => Self::Blake3,
        }
    }

    /// Expected number of hex digits, where the format is pinned down.
    fn hex_len(self) -> Option<usize> {
        match self {
            Self::Md5 => Some(32),
            Self::Sha1 => Some(40),
            Self::Sha256 => Some(64),
            Self::Sha512 => Some(128),
            _ => None,
        }
    }

    /// Validation pattern for this algorithm, if one is defined.
    fn pattern(self) -> Option<&'static Regex> {
        static MD5: OnceLock<Regex> = OnceLock::new();
        static SHA1: OnceLock<Regex> = OnceLock::new();
        static SHA256: OnceLock<Regex> = OnceLock::new();
        static SHA512: OnceLock<Regex> = OnceLock::new();
        let cell = match self {
            Self::Md5 => &MD5,
            Self::Sha1 => &SHA1,
            Self::Sha256 => &SHA256,
            Self::Sha512 => &SHA512,
            _ => return None,
        };
        let len = self.hex_len()?;
        Some(cell.get_or_init(|| {
            Regex::new(&format!("^[A-Fa-f0-9]{{{len}}}$")).expect("static hash pattern")
        }))
    }
}

/// Current hash value for `algorithm`, if present.
pub fn get(hashes: Option<&[Hash]>, algorithm: HashAlgorithm) -> Option<&str> {
    keyed_list::HASHES.first(hashes, algorithm.spec_name())
}

/// Replace the hash value for `algorithm`.
///
/// All existing entries for the algorithm are removed first. A `Some` value
/// must match the algorithm's pattern and is stored lowercase; `None` just
/// removes. An empty list is normalized back to absent.
pub fn set(
    hashes: &mut Option<Vec<Hash>>,
    algorithm: HashAlgorithm,
    value: Option<&str>,
) -> Result<()> {
    keyed_list::HASHES.remove_all(hashes.as_mut(), algorithm.spec_name());
    if let Some(value) = value {
        if let Some(pattern) = algorithm.pattern() {
            if !pattern.is_match(value) {
                return Err(StandardBomError::validation(format!(
                    "value is not a valid {} hash: {}",
                    algorithm.spec_name(),
                    value
                )));
            }
        }
        hashes.get_or_insert_with(Vec::new).push(Hash {
            alg: algorithm.to_cyclonedx(),
            content: value.to_lowercase(),
        });
    }
    if hashes.as_ref().is_some_and(Vec::is_empty) {
        *hashes = None;
    }
    Ok(())
}
