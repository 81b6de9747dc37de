pub mod codec;
pub mod container;
pub mod error;
pub mod format;

pub use codec::BlockCodec;
pub use container::{checksum, decode_with, encode_with, inspect, ContainerInfo};
pub use error::{ContainerError, Result};
pub use format::{looks_like_container, CodingMode, Trailer, MAGIC, TRAILER_SIZE};
