mod asset;
mod lz4_codec;

pub use asset::{open_asset, packed_path, save_asset, unpacked_path, Asset};
pub use lz4_codec::Lz4BlockCodec;

pub use dvpl_core::{
    looks_like_container, CodingMode, ContainerError, ContainerInfo, MAGIC, TRAILER_SIZE,
};

/// Frame `source` as a DVPL container, LZ4-compressing it when that helps.
pub fn encode(source: Option<&[u8]>) -> Result<Vec<u8>, ContainerError> {
    dvpl_core::encode_with(&Lz4BlockCodec, source)
}

/// Verify and unframe a DVPL container.
pub fn decode(buf: &[u8]) -> Result<Vec<u8>, ContainerError> {
    dvpl_core::decode_with(&Lz4BlockCodec, buf)
}

/// Validate a container's framing and report its trailer.
pub fn inspect(buf: &[u8]) -> Result<ContainerInfo, ContainerError> {
    dvpl_core::inspect(buf)
}
