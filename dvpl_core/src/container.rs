use serde::Serialize;

use crate::codec::BlockCodec;
use crate::error::{ContainerError, Result};
use crate::format::{CodingMode, Trailer, TRAILER_SIZE};

/// CRC32-IEEE of a payload segment.
pub fn checksum(payload: &[u8]) -> u32 {
    crc32fast::hash(payload)
}

/// Frame `source` as a DVPL container.
///
/// # Layout written
/// ```text
/// [PAYLOAD: stored_size bytes]      ← source verbatim, or one compressed block
/// [TRAILER: 20 bytes]               ← original, stored, crc32, mode, "DVPL"
/// ```
///
/// The block is kept only when it is strictly smaller than the source;
/// otherwise (including the empty source) the payload is stored raw. That
/// `<=` tie-break is part of the format and must not change.
///
/// `None` is rejected with `InvalidInput`; `Some(&[])` is a valid, empty
/// source. The returned buffer is always freshly allocated.
pub fn encode_with(codec: &dyn BlockCodec, source: Option<&[u8]>) -> Result<Vec<u8>> {
    let source = source.ok_or(ContainerError::InvalidInput("no source buffer supplied"))?;
    let original_size = u32::try_from(source.len())
        .map_err(|_| ContainerError::InvalidInput("source exceeds the 4 GiB container limit"))?;

    let mut compressed = vec![0u8; codec.compress_bound(source.len())];
    let compressed_len = codec
        .compress_into(source, &mut compressed)
        .map_err(|e| ContainerError::Compression(format!("{} ({:#})", codec.name(), e)))?;

    let (payload, mode) = if source.len() <= compressed_len {
        (source, CodingMode::Raw)
    } else {
        (&compressed[..compressed_len], CodingMode::BlockCompressed)
    };

    // payload.len() <= source.len(), so this cannot truncate
    let stored_size = payload.len() as u32;
    let trailer = Trailer::new(original_size, stored_size, checksum(payload), mode);

    let mut out = Vec::with_capacity(payload.len() + TRAILER_SIZE);
    out.extend_from_slice(payload);
    out.extend_from_slice(&trailer.to_bytes());
    Ok(out)
}

/// Summary of a container whose framing has been fully validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerInfo {
    pub original_size: u32,
    pub stored_size: u32,
    pub checksum: u32,
    pub coding_mode: CodingMode,
}

impl ContainerInfo {
    /// Stored size over original size. 1.0 for an empty payload.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 1.0;
        }
        self.stored_size as f64 / self.original_size as f64
    }

    /// Size of the whole container on disk, trailer included.
    pub fn container_size(&self) -> u64 {
        self.stored_size as u64 + TRAILER_SIZE as u64
    }
}

/// Split `buf` and run every framing check, in order, without decompressing.
///
/// 1. buffer holds at least a trailer
/// 2. stored_size matches the payload segment
/// 3. checksum matches the payload segment
/// 4. magic
/// 5. coding mode is known
///
/// The checksum is always verified before anything looks inside the payload.
fn validate(buf: &[u8]) -> Result<(&[u8], ContainerInfo)> {
    if buf.len() < TRAILER_SIZE {
        return Err(ContainerError::TooShort { len: buf.len() });
    }

    let (payload, trailer_buf) = buf.split_at(buf.len() - TRAILER_SIZE);
    let trailer_buf: &[u8; TRAILER_SIZE] = trailer_buf
        .try_into()
        .map_err(|_| ContainerError::TooShort { len: buf.len() })?;
    let trailer = Trailer::from_bytes(trailer_buf);

    if trailer.stored_size as usize != payload.len() {
        return Err(ContainerError::LengthMismatch {
            declared: trailer.stored_size,
            actual: payload.len(),
        });
    }

    let actual = checksum(payload);
    if actual != trailer.checksum {
        return Err(ContainerError::ChecksumMismatch {
            expected: trailer.checksum,
            actual,
        });
    }

    if !trailer.has_magic() {
        return Err(ContainerError::BadMagic {
            found: trailer.magic,
        });
    }

    let coding_mode =
        CodingMode::try_from(trailer.coding_mode).map_err(ContainerError::UnknownCodingMode)?;

    Ok((
        payload,
        ContainerInfo {
            original_size: trailer.original_size,
            stored_size: trailer.stored_size,
            checksum: trailer.checksum,
            coding_mode,
        },
    ))
}

/// Validate a container's framing and report its trailer, without
/// decompressing the payload.
pub fn inspect(buf: &[u8]) -> Result<ContainerInfo> {
    validate(buf).map(|(_, info)| info)
}

/// Verify and unframe a DVPL container, returning the original bytes.
///
/// The first failing check wins: size, stored length, checksum, magic,
/// coding mode, then the decompressed length. Nothing is returned alongside
/// an error.
pub fn decode_with(codec: &dyn BlockCodec, buf: &[u8]) -> Result<Vec<u8>> {
    let (payload, info) = validate(buf)?;

    match info.coding_mode {
        CodingMode::Raw => {
            if info.original_size as usize != payload.len() {
                return Err(ContainerError::LengthMismatch {
                    declared: info.original_size,
                    actual: payload.len(),
                });
            }
            Ok(payload.to_vec())
        }
        CodingMode::BlockCompressed => {
            let mut out = vec![0u8; info.original_size as usize];
            let written = codec
                .decompress_into(payload, &mut out)
                .map_err(|e| ContainerError::Decompression(format!("{} ({:#})", codec.name(), e)))?;
            if written != out.len() {
                return Err(ContainerError::Decompression(format!(
                    "{} block decoded to {} bytes but trailer says {}",
                    codec.name(),
                    written,
                    info.original_size
                )));
            }
            Ok(out)
        }
    }
}
