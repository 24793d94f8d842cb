//! Outer wire container.
//!
//! Layout (deterministic bincode):
//! - 4 bytes: little-endian `u32` tag
//! - 8 bytes: little-endian `u64` payload length
//! - N bytes: payload

use crate::error::{CodecError, Result};
use crate::message::MsgType;
use crate::registry::Registry;
use crate::serialization;
use serde::{Deserialize, Serialize};

/// Tag plus opaque payload.
///
/// The tag is kept as a raw `u32` so frames carrying tags this build does not
/// know about still parse, and can be rejected as unknown rather than
/// malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub tag: u32,
    pub payload: Vec<u8>,
}

impl Envelope {
    pub fn new(msg_type: MsgType, payload: Vec<u8>) -> Self {
        Self {
            tag: msg_type.as_u32(),
            payload,
        }
    }

    /// Parse only the outer frame, leaving the payload undecoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serialization::deserialize(bytes)
            .map_err(|e| CodecError::StructuralDecode(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serialization::serialize(self)
            .map_err(|e| CodecError::EnvelopeEncode(e.to_string()))
    }

    /// Registered tag for this frame, or [`MsgType::None`] if the raw tag is
    /// not registered.
    pub fn msg_type(&self) -> MsgType {
        Registry::global()
            .resolve(self.tag)
            .map_or(MsgType::None, |entry| entry.msg_type)
    }
}
