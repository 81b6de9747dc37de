/// Raw block-compression primitive used for `CodingMode::BlockCompressed`.
///
/// Each `BlockCodec` implementation:
/// - Compresses one whole buffer at a time; there is no streaming state.
/// - Reports an upper bound on its output size, so the encoder can size a
///   single scratch buffer up front.
/// - Decompresses into a caller-sized buffer and returns how many bytes it
///   produced; the container layer checks that count against the trailer.
///
/// Failures are reported as `anyhow` errors and wrapped by the container
/// layer into `ContainerError::Compression` / `ContainerError::Decompression`.
pub trait BlockCodec: Send + Sync {
    /// Human-readable codec name for CLI display.
    fn name(&self) -> &'static str;

    /// Worst-case compressed size for an input of `len` bytes.
    fn compress_bound(&self, len: usize) -> usize;

    /// Compress `src` into `dst`, which is at least `compress_bound(src.len())`
    /// bytes long. Returns the number of bytes written.
    fn compress_into(&self, src: &[u8], dst: &mut [u8]) -> anyhow::Result<usize>;

    /// Decompress `src` into `dst`. Returns the number of bytes written.
    fn decompress_into(&self, src: &[u8], dst: &mut [u8]) -> anyhow::Result<usize>;
}
