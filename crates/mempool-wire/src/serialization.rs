//! Deterministic bincode configuration shared by the envelope and payload layers.
//!
//! - Fixed-size little-endian integers
//! - `u64` length prefix on byte strings
//! - Trailing bytes rejected on deserialization

use bincode::Options;
use serde::{de::DeserializeOwned, Serialize};

fn config() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

/// Serialize a value. Callers map the error onto whichever codec failure
/// class applies.
pub(crate) fn serialize<T: Serialize + ?Sized>(value: &T) -> bincode::Result<Vec<u8>> {
    config().serialize(value)
}

/// Deserialize a value, rejecting truncated input and trailing bytes.
pub(crate) fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> bincode::Result<T> {
    config().deserialize(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_fixint() {
        let bytes = serialize(&0x0102_0304u32).unwrap();
        assert_eq!(bytes, vec![0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_byte_string_has_u64_length_prefix() {
        let bytes = serialize(&vec![0xAAu8, 0xBB]).unwrap();
        assert_eq!(bytes, vec![2, 0, 0, 0, 0, 0, 0, 0, 0xAA, 0xBB]);
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let mut bytes = serialize(&7u32).unwrap();
        bytes.push(0xFF);

        let result: bincode::Result<u32> = deserialize(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_truncated_input() {
        let result: bincode::Result<u64> = deserialize(&[0x01, 0x02]);
        assert!(matches!(result.map_err(|e| *e), Err(bincode::ErrorKind::Io(_))));
    }
}
