//! Error types for the envelope codec.

use crate::message::MsgType;
use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while encoding or decoding envelopes.
///
/// Decode failures come in three classes (structural, unknown variant,
/// payload) and stay distinct so peer-scoring code can tell a peer speaking a
/// newer protocol apart from a peer sending garbage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Outer envelope bytes could not be parsed as a tag+payload frame.
    #[error("malformed envelope: {0}")]
    StructuralDecode(String),

    /// Envelope parsed but its tag has no registered variant.
    #[error("unknown message variant tag {tag}")]
    UnknownVariant { tag: u32 },

    /// Message kind has no registered tag and cannot be put on the wire.
    #[error("unsupported message variant: {type_name}")]
    UnsupportedVariant { type_name: &'static str },

    /// Payload bytes do not conform to the resolved variant's format.
    #[error("failed to decode {msg_type} payload: {reason}")]
    PayloadDecode { msg_type: MsgType, reason: String },

    /// Variant payload could not be serialized.
    #[error("failed to encode {msg_type} payload: {reason}")]
    PayloadEncode { msg_type: MsgType, reason: String },

    /// Outer envelope could not be serialized.
    #[error("failed to encode envelope: {0}")]
    EnvelopeEncode(String),
}

impl CodecError {
    /// True for failures where the outer frame itself was unreadable.
    pub fn is_structural(&self) -> bool {
        matches!(self, CodecError::StructuralDecode(_))
    }

    /// True when the tag (decode) or the message kind (encode) is not registered.
    pub fn is_unknown_variant(&self) -> bool {
        matches!(
            self,
            CodecError::UnknownVariant { .. } | CodecError::UnsupportedVariant { .. }
        )
    }

    /// True when the frame was valid but the inner payload was not.
    pub fn is_payload(&self) -> bool {
        matches!(
            self,
            CodecError::PayloadDecode { .. } | CodecError::PayloadEncode { .. }
        )
    }
}
