use serde::Serialize;

/// Magic bytes closing every DVPL container.
pub const MAGIC: &[u8; 4] = b"DVPL";

/// Fixed size of the trailer appended after the payload, in bytes.
///   original_size:u32 + stored_size:u32 + checksum:u32
///   + coding_mode:u32 + magic[4]
///   = 4 + 4 + 4 + 4 + 4 = 20
pub const TRAILER_SIZE: usize = 20;

/// File extension used for packed assets.
pub const EXTENSION: &str = "dvpl";

// ── Coding modes ───────────────────────────────────────────────────────────

pub const MODE_RAW: u32 = 0;
pub const MODE_LZ4: u32 = 1;

/// How the payload segment of a container is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum CodingMode {
    /// Payload is the source bytes verbatim.
    Raw = MODE_RAW,
    /// Payload is a single LZ4 block.
    BlockCompressed = MODE_LZ4,
}

impl CodingMode {
    pub fn name(self) -> &'static str {
        match self {
            CodingMode::Raw => "raw",
            CodingMode::BlockCompressed => "lz4",
        }
    }
}

impl TryFrom<u32> for CodingMode {
    /// The unrecognized raw value.
    type Error = u32;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            MODE_RAW => Ok(CodingMode::Raw),
            MODE_LZ4 => Ok(CodingMode::BlockCompressed),
            other => Err(other),
        }
    }
}

// ── Trailer ────────────────────────────────────────────────────────────────

/// Decoded representation of the 20-byte DVPL trailer.
///
/// Parsing never validates: the decoder checks the fields itself, in a
/// fixed order, so that a multiply-corrupted buffer always reports the same
/// error. `coding_mode` is kept as the raw on-disk value for that reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
    /// Length of the logical (decompressed) payload.
    pub original_size: u32,
    /// Length of the payload segment actually stored before the trailer.
    pub stored_size: u32,
    /// CRC32-IEEE of the stored payload segment.
    pub checksum: u32,
    pub coding_mode: u32,
    pub magic: [u8; 4],
}

impl Trailer {
    /// Build a trailer with the magic filled in.
    pub fn new(original_size: u32, stored_size: u32, checksum: u32, mode: CodingMode) -> Self {
        Self {
            original_size,
            stored_size,
            checksum,
            coding_mode: mode as u32,
            magic: *MAGIC,
        }
    }

    /// Serialize to exactly `TRAILER_SIZE` bytes.
    pub fn to_bytes(&self) -> [u8; TRAILER_SIZE] {
        let mut buf = [0u8; TRAILER_SIZE];
        buf[0..4].copy_from_slice(&self.original_size.to_le_bytes());
        buf[4..8].copy_from_slice(&self.stored_size.to_le_bytes());
        buf[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        buf[12..16].copy_from_slice(&self.coding_mode.to_le_bytes());
        buf[16..20].copy_from_slice(&self.magic);
        buf
    }

    /// Deserialize from `TRAILER_SIZE` bytes.
    pub fn from_bytes(buf: &[u8; TRAILER_SIZE]) -> Self {
        let field = |at: usize| u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]]);
        Self {
            original_size: field(0),
            stored_size: field(4),
            checksum: field(8),
            coding_mode: field(12),
            magic: [buf[16], buf[17], buf[18], buf[19]],
        }
    }

    pub fn has_magic(&self) -> bool {
        &self.magic == MAGIC
    }
}

/// Cheap sniff: at least a trailer's worth of bytes, ending in the magic.
///
/// Passing this says nothing about sizes, checksum or coding mode; callers
/// use it only to decide whether to attempt a full decode.
pub fn looks_like_container(buf: &[u8]) -> bool {
    buf.len() >= TRAILER_SIZE && buf.ends_with(MAGIC)
}
