//! Typed-message envelope protocol for mempool relay traffic.
//!
//! This crate provides:
//! - Message variants and their wire tags
//! - A static registry mapping message kinds to tags and decode targets
//! - The envelope container (tag + opaque payload)
//! - Stateless encode/decode with classified failures

pub mod codec;
pub mod envelope;
pub mod error;
pub mod message;
pub mod registry;
mod serialization;

pub use codec::{decode, encode, encode_message, tag_for};
pub use envelope::Envelope;
pub use error::{CodecError, Result};
pub use message::{MempoolMessage, MsgType, TxMessage};
pub use registry::{Registration, Registry, RegistryError};
