use thiserror::Error;

use crate::format::TRAILER_SIZE;

/// Why a container could not be produced or consumed.
///
/// Every variant is terminal: no partial output accompanies it.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// No source buffer was supplied, or it cannot be described by the
    /// trailer's 32-bit size fields.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("block compression failed: {0}")]
    Compression(String),

    #[error("container too short: {len} bytes, the trailer alone needs {}", TRAILER_SIZE)]
    TooShort { len: usize },

    #[error("length mismatch: trailer declares {declared} bytes but payload holds {actual}")]
    LengthMismatch { declared: u32, actual: usize },

    #[error("checksum mismatch: trailer says {expected:08x}, payload hashes to {actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("bad magic {found:02x?}, expected \"DVPL\"")]
    BadMagic { found: [u8; 4] },

    #[error("unknown coding mode {0}")]
    UnknownCodingMode(u32),

    #[error("block decompression failed: {0}")]
    Decompression(String),
}

pub type Result<T> = std::result::Result<T, ContainerError>;
