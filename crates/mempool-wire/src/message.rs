//! Mempool message variants and their wire tags.
//!
//! Every message kind the relay layer can carry is one arm of
//! [`MempoolMessage`] and has one [`MsgType`] tag. Adding a kind means adding
//! both plus a registry entry. Raw wire values are mapped back to tags only
//! through the registry (see [`crate::Registry::resolve`]).

use crate::error::{CodecError, Result};
use crate::serialization;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire tag identifying a message variant.
///
/// `None` is a lookup sentinel only. It is never written into an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum MsgType {
    /// No registered mapping.
    None = 0,
    /// Transaction announcement.
    Tx = 1,
}

impl MsgType {
    /// Numeric value written into the envelope's tag field.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Short lowercase name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            MsgType::None => "none",
            MsgType::Tx => "tx",
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Announces a raw transaction to the mempool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxMessage {
    /// Opaque transaction bytes.
    pub tx: Vec<u8>,
}

impl TxMessage {
    pub fn new(tx: impl Into<Vec<u8>>) -> Self {
        Self { tx: tx.into() }
    }
}

impl fmt::Display for TxMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[TxMessage [")?;
        for (i, byte) in self.tx.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{byte}")?;
        }
        write!(f, "]]")
    }
}

/// A decoded mempool message.
///
/// Not `Serialize`: the wire tag lives in the envelope, so encode through
/// [`crate::encode_message`] which serializes only the inner variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MempoolMessage {
    /// Transaction announcement.
    Tx(TxMessage),
}

impl MempoolMessage {
    /// Tag of the variant held by this message.
    pub fn msg_type(&self) -> MsgType {
        match self {
            MempoolMessage::Tx(_) => MsgType::Tx,
        }
    }

    /// Replace the variant's contents with the decoded `payload`.
    ///
    /// Used on blank instances produced by the registry. On failure the
    /// instance is left untouched.
    pub(crate) fn fill_from_payload(&mut self, payload: &[u8]) -> Result<()> {
        let msg_type = self.msg_type();
        let payload_err = |e: bincode::Error| CodecError::PayloadDecode {
            msg_type,
            reason: e.to_string(),
        };

        match self {
            MempoolMessage::Tx(msg) => {
                *msg = serialization::deserialize(payload).map_err(payload_err)?;
            }
        }
        Ok(())
    }
}

impl From<TxMessage> for MempoolMessage {
    fn from(msg: TxMessage) -> Self {
        MempoolMessage::Tx(msg)
    }
}

impl fmt::Display for MempoolMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MempoolMessage::Tx(msg) => msg.fmt(f),
        }
    }
}
