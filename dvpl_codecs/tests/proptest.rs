// Property-based tests using proptest

use dvpl_codecs::{
    decode, encode, inspect, looks_like_container, CodingMode, ContainerError, TRAILER_SIZE,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 0..20_000)) {
        let packed = encode(Some(data.as_slice())).expect("encode failed");
        let unpacked = decode(&packed).expect("decode failed");
        prop_assert_eq!(data, unpacked);
    }

    #[test]
    fn prop_encoded_sniffs_as_container(data: Vec<u8>) {
        let packed = encode(Some(data.as_slice())).expect("encode failed");
        prop_assert!(looks_like_container(&packed));
    }

    #[test]
    fn prop_never_larger_than_raw_framing(data: Vec<u8>) {
        let packed = encode(Some(data.as_slice())).expect("encode failed");
        prop_assert!(packed.len() <= data.len() + TRAILER_SIZE);

        let info = inspect(&packed).expect("inspect failed");
        prop_assert_eq!(info.original_size as usize, data.len());
        if info.coding_mode == CodingMode::Raw {
            prop_assert_eq!(&packed[..data.len()], data.as_slice());
        } else {
            prop_assert!((info.stored_size as usize) < data.len());
        }
    }

    #[test]
    fn prop_repeated_data_is_compressed(
        chunk in prop::collection::vec(any::<u8>(), 1..64),
        times in 64usize..256,
    ) {
        let data = chunk.repeat(times);
        let packed = encode(Some(data.as_slice())).expect("encode failed");
        let info = inspect(&packed).expect("inspect failed");
        prop_assert_eq!(info.coding_mode, CodingMode::BlockCompressed);
        prop_assert_eq!(decode(&packed).expect("decode failed"), data);
    }

    #[test]
    fn prop_short_buffers_are_too_short(data in prop::collection::vec(any::<u8>(), 0..TRAILER_SIZE)) {
        let is_too_short = matches!(decode(&data), Err(ContainerError::TooShort { .. }));
        prop_assert!(is_too_short);
    }

    #[test]
    fn prop_payload_corruption_is_detected(
        data in prop::collection::vec(any::<u8>(), 1..4096),
        pos in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut packed = encode(Some(data.as_slice())).expect("encode failed");
        let payload_len = packed.len() - TRAILER_SIZE;
        let i = pos.index(payload_len);
        packed[i] ^= flip;
        let is_checksum = matches!(decode(&packed), Err(ContainerError::ChecksumMismatch { .. }));
        prop_assert!(is_checksum);
    }

    #[test]
    fn prop_magic_corruption_is_detected(
        data in prop::collection::vec(any::<u8>(), 0..512),
        pos in 0usize..4,
        flip in 1u8..=255,
    ) {
        let mut packed = encode(Some(data.as_slice())).expect("encode failed");
        let i = packed.len() - 4 + pos;
        packed[i] ^= flip;
        prop_assert!(!looks_like_container(&packed));
        let is_bad_magic = matches!(decode(&packed), Err(ContainerError::BadMagic { .. }));
        prop_assert!(is_bad_magic);
    }

    #[test]
    fn prop_decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode(&data);
    }
}
