#![forbid(unsafe_code)]

use sha2::{Digest, Sha256};

pub const CRATE_NAME: &str = "toposcan-core";

/// Length of the truncated content fingerprint, in hex characters.
pub const FINGERPRINT_HEX_LEN: usize = 12;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Short deterministic fingerprint over raw input text: the first
/// [`FINGERPRINT_HEX_LEN`] hex characters of its SHA-256 digest.
#[must_use]
pub fn content_fingerprint(raw: &str) -> String {
    let mut hex = sha256_hex(raw.as_bytes());
    hex.truncate(FINGERPRINT_HEX_LEN);
    hex
}
