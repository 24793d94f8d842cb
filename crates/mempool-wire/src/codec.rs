//! Envelope encode/decode.
//!
//! Outbound: message → tag lookup → payload bytes → [`Envelope`] → bytes.
//! Inbound: bytes → [`Envelope`] → blank instance for the tag → payload decode.
//!
//! Stateless. Inbound bytes come from untrusted peers, so every malformed
//! input is an ordinary `Err`, never a panic.

use crate::envelope::Envelope;
use crate::error::{CodecError, Result};
use crate::message::{MempoolMessage, MsgType};
use crate::registry::Registry;
use crate::serialization;
use serde::Serialize;
use std::any::Any;
use tracing::{debug, trace};

/// Wire tag for `msg`, or [`MsgType::None`] if its kind is not registered.
///
/// Accepts a concrete variant, a decoded [`MempoolMessage`], or either behind
/// `Box`/`Arc`.
pub fn tag_for<M: Any>(msg: &M) -> MsgType {
    Registry::global().tag_of(msg)
}

/// Encode a concrete message variant into envelope bytes.
///
/// Fails with [`CodecError::UnsupportedVariant`] if the type of `msg` is not
/// registered; no bytes are produced in that case.
pub fn encode<M: Serialize + 'static>(msg: &M) -> Result<Vec<u8>> {
    let msg_type = tag_for(msg);
    if msg_type == MsgType::None {
        return Err(CodecError::UnsupportedVariant {
            type_name: std::any::type_name::<M>(),
        });
    }

    let payload = serialization::serialize(msg).map_err(|e| CodecError::PayloadEncode {
        msg_type,
        reason: e.to_string(),
    })?;
    let payload_len = payload.len();
    let bytes = Envelope::new(msg_type, payload).to_bytes()?;

    trace!(%msg_type, payload_len, "encoded mempool message");
    Ok(bytes)
}

/// Encode a [`MempoolMessage`] by dispatching to its inner variant.
pub fn encode_message(msg: &MempoolMessage) -> Result<Vec<u8>> {
    match msg {
        MempoolMessage::Tx(tx) => encode(tx),
    }
}

/// Decode envelope bytes into a fully populated message.
///
/// The tag is resolved before the payload is touched, so an unregistered tag
/// yields [`CodecError::UnknownVariant`] and never a blank message.
pub fn decode(bytes: &[u8]) -> Result<MempoolMessage> {
    let envelope = Envelope::from_bytes(bytes).map_err(|err| {
        debug!(len = bytes.len(), error = %err, "rejecting malformed envelope");
        err
    })?;

    let mut msg = Registry::global()
        .new_instance(envelope.tag)
        .map_err(|err| {
            debug!(tag = envelope.tag, "rejecting envelope with unknown tag");
            err
        })?;

    msg.fill_from_payload(&envelope.payload).map_err(|err| {
        debug!(tag = envelope.tag, error = %err, "rejecting malformed payload");
        err
    })?;

    trace!(
        msg_type = %msg.msg_type(),
        payload_len = envelope.payload.len(),
        "decoded mempool message"
    );
    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::TxMessage;

    #[derive(Serialize)]
    struct BlockAnnounce {
        height: u64,
    }

    #[test]
    fn test_tx_scenario() {
        let msg = TxMessage::new(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        let bytes = encode(&msg).unwrap();

        assert_eq!(decode(&bytes).unwrap(), MempoolMessage::Tx(msg));
        assert_eq!(tag_for(&TxMessage::default()).as_u32(), 1);
    }

    #[test]
    fn test_tag_for_decoded_message() {
        let bytes = encode(&TxMessage::new(vec![0xDE, 0xAD, 0xBE, 0xEF])).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(tag_for(&decoded), MsgType::Tx);
        assert_eq!(tag_for(&decoded), decoded.msg_type());
    }

    #[test]
    fn test_encode_boxed_variant() {
        let tx = TxMessage::new(vec![1, 2]);
        assert_eq!(encode(&Box::new(tx.clone())).unwrap(), encode(&tx).unwrap());
    }

    #[test]
    fn test_unsupported_variant() {
        let err = encode(&BlockAnnounce { height: 7 }).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedVariant { .. }));
        assert!(err.is_unknown_variant());
    }

    #[test]
    fn test_encode_message_matches_variant_encode() {
        let tx = TxMessage::new(vec![9, 8, 7]);
        assert_eq!(
            encode_message(&MempoolMessage::Tx(tx.clone())).unwrap(),
            encode(&tx).unwrap()
        );
    }

    #[test]
    fn test_unknown_tag_checked_before_payload() {
        // Payload would not decode as anything; the tag must be rejected first.
        let bytes = Envelope {
            tag: 2,
            payload: vec![0xFF],
        }
        .to_bytes()
        .unwrap();

        assert_eq!(decode(&bytes), Err(CodecError::UnknownVariant { tag: 2 }));
    }

    #[test]
    fn test_none_tag_on_wire_is_unknown() {
        let bytes = Envelope::new(MsgType::None, vec![]).to_bytes().unwrap();
        assert_eq!(decode(&bytes), Err(CodecError::UnknownVariant { tag: 0 }));
    }
}
