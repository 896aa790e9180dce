//! Digest algorithm selection

use crate::error::{ReslocError, ReslocResult};
use sha2::digest::DynDigest;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use std::fmt;
use std::str::FromStr;

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
}

impl DigestAlgorithm {
    /// Default for this platform: SHA-512 on 64-bit targets, SHA-256 otherwise
    pub fn platform_default() -> Self {
        if cfg!(target_pointer_width = "64") {
            Self::Sha512
        } else {
            Self::Sha256
        }
    }

    /// Standard algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha512_224 => "SHA-512/224",
            Self::Sha512_256 => "SHA-512/256",
        }
    }

    /// Digest length in bytes
    pub fn output_len(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha224 | Self::Sha512_224 => 28,
            Self::Sha256 | Self::Sha512_256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// All algorithms in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::Md5,
            Self::Sha1,
            Self::Sha224,
            Self::Sha256,
            Self::Sha384,
            Self::Sha512,
            Self::Sha512_224,
            Self::Sha512_256,
        ]
    }

    pub(crate) fn hasher(&self) -> Hasher {
        match self {
            Self::Md5 => Hasher::Md5(md5::Context::new()),
            Self::Sha1 => Hasher::Dyn(Box::new(sha1::Sha1::default())),
            Self::Sha224 => Hasher::Dyn(Box::new(Sha224::default())),
            Self::Sha256 => Hasher::Dyn(Box::new(Sha256::default())),
            Self::Sha384 => Hasher::Dyn(Box::new(Sha384::default())),
            Self::Sha512 => Hasher::Dyn(Box::new(Sha512::default())),
            Self::Sha512_224 => Hasher::Dyn(Box::new(Sha512_224::default())),
            Self::Sha512_256 => Hasher::Dyn(Box::new(Sha512_256::default())),
        }
    }
}

impl Default for DigestAlgorithm {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Case and hyphens are not significant: "sha256", "SHA-256", "Sha_256"
fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

impl FromStr for DigestAlgorithm {
    type Err = ReslocError;

    fn from_str(s: &str) -> ReslocResult<Self> {
        if s.trim().is_empty() {
            return Err(ReslocError::invalid_argument(
                "digest algorithm name must not be blank",
            ));
        }

        let wanted = normalize(s);
        Self::all()
            .iter()
            .copied()
            .find(|algorithm| normalize(algorithm.name()) == wanted)
            .ok_or_else(|| ReslocError::DigestUnavailable(s.trim().to_string()))
    }
}

/// Running digest state
pub(crate) enum Hasher {
    Md5(md5::Context),
    Dyn(Box<dyn DynDigest>),
}

impl Hasher {
    pub(crate) fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(context) => context.consume(data),
            Self::Dyn(digest) => digest.update(data),
        }
    }

    pub(crate) fn finalize(self) -> Vec<u8> {
        match self {
            Self::Md5(context) => context.compute().0.to_vec(),
            Self::Dyn(digest) => digest.finalize().into_vec(),
        }
    }
}
