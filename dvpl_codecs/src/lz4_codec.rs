use dvpl_core::codec::BlockCodec;
use lz4_flex::block::{compress_into, decompress_into, get_maximum_output_size};

/// LZ4 raw block codec.
///
/// Writes bare LZ4 blocks with no size prefix or frame header, since the
/// DVPL trailer already carries both lengths. This is the block format other
/// DVPL tooling reads and writes for coding mode 1.
pub struct Lz4BlockCodec;

impl BlockCodec for Lz4BlockCodec {
    fn name(&self) -> &'static str {
        "lz4"
    }

    fn compress_bound(&self, len: usize) -> usize {
        get_maximum_output_size(len)
    }

    fn compress_into(&self, src: &[u8], dst: &mut [u8]) -> anyhow::Result<usize> {
        compress_into(src, dst).map_err(|e| anyhow::anyhow!("lz4 compress error: {}", e))
    }

    fn decompress_into(&self, src: &[u8], dst: &mut [u8]) -> anyhow::Result<usize> {
        decompress_into(src, dst).map_err(|e| anyhow::anyhow!("lz4 decompress error: {}", e))
    }
}
