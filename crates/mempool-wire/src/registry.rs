//! Static variant registry.
//!
//! Maps each message kind's runtime identity (`TypeId`) to its wire tag and
//! to a constructor for a blank decode target. Identity covers the bare type
//! and its `Box`/`Arc` forms; a decoded [`MempoolMessage`] reports the tag of
//! the variant it holds. The table is a `static` of plain function pointers,
//! so it is immutable from program start and can be read from any number of
//! threads without locking.
//!
//! # Invariants
//!
//! - No entry uses [`MsgType::None`]
//! - Tags are unique across entries
//! - Message kinds are unique across entries

use crate::error::{CodecError, Result};
use crate::message::{MempoolMessage, MsgType, TxMessage};
use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// One registered message kind.
#[derive(Clone, Copy)]
pub struct Registration {
    /// Wire tag for this kind.
    pub msg_type: MsgType,
    /// Type name, for logs and listings.
    pub name: &'static str,
    type_id: fn() -> TypeId,
    matches: fn(&dyn Any) -> bool,
    blank: fn() -> MempoolMessage,
}

impl Registration {
    /// Runtime identity of the registered Rust type.
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// True if `msg` is this kind, owned directly or behind `Box`/`Arc`.
    pub fn matches(&self, msg: &dyn Any) -> bool {
        (self.matches)(msg)
    }

    /// Fresh, empty instance of this kind.
    pub fn new_instance(&self) -> MempoolMessage {
        (self.blank)()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("msg_type", &self.msg_type)
            .field("name", &self.name)
            .finish()
    }
}

fn is_kind<T: Any>(msg: &dyn Any) -> bool {
    msg.is::<T>() || msg.is::<Box<T>>() || msg.is::<Arc<T>>()
}

fn as_mempool_message(msg: &dyn Any) -> Option<&MempoolMessage> {
    msg.downcast_ref::<MempoolMessage>()
        .or_else(|| msg.downcast_ref::<Box<MempoolMessage>>().map(|m| &**m))
        .or_else(|| msg.downcast_ref::<Arc<MempoolMessage>>().map(|m| &**m))
}

fn blank_tx() -> MempoolMessage {
    MempoolMessage::Tx(TxMessage::default())
}

static REGISTRATIONS: [Registration; 1] = [Registration {
    msg_type: MsgType::Tx,
    name: "TxMessage",
    type_id: TypeId::of::<TxMessage>,
    matches: is_kind::<TxMessage>,
    blank: blank_tx,
}];

static GLOBAL: Registry = Registry {
    entries: &REGISTRATIONS,
};

/// Violations of the registry's bijection invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{name} is registered under the reserved none tag")]
    ReservedTag { name: &'static str },

    #[error("tag {msg_type} is registered more than once")]
    DuplicateTag { msg_type: MsgType },

    #[error("{name} is registered under more than one tag")]
    DuplicateKind { name: &'static str },
}

/// Read-only view over a table of registrations.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    entries: &'static [Registration],
}

impl Registry {
    /// The process-wide registry of every known mempool message kind.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// All registrations, in table order.
    pub fn entries(&self) -> impl Iterator<Item = &'static Registration> {
        self.entries.iter()
    }

    /// Registration for `msg_type`, if any.
    pub fn lookup(&self, msg_type: MsgType) -> Option<&'static Registration> {
        self.entries.iter().find(|entry| entry.msg_type == msg_type)
    }

    /// Registration for a raw wire tag, if any.
    pub fn resolve(&self, tag: u32) -> Option<&'static Registration> {
        self.entries
            .iter()
            .find(|entry| entry.msg_type.as_u32() == tag)
    }

    /// Tag registered for the kind of `msg`, or [`MsgType::None`].
    ///
    /// Field contents never change the result. A [`MempoolMessage`] yields the
    /// tag of the variant it holds.
    pub fn tag_of<M: Any>(&self, msg: &M) -> MsgType {
        let msg: &dyn Any = msg;
        if let Some(decoded) = as_mempool_message(msg) {
            return decoded.msg_type();
        }
        self.entries
            .iter()
            .find(|entry| entry.matches(msg))
            .map_or(MsgType::None, |entry| entry.msg_type)
    }

    /// Blank decode target for the raw wire `tag`.
    pub fn new_instance(&self, tag: u32) -> Result<MempoolMessage> {
        self.resolve(tag)
            .map(Registration::new_instance)
            .ok_or(CodecError::UnknownVariant { tag })
    }

    /// Check that the table is a bijection between tags and message kinds.
    pub fn validate(&self) -> std::result::Result<(), RegistryError> {
        let mut tags = HashSet::new();
        let mut kinds = HashSet::new();

        for entry in self.entries {
            if entry.msg_type == MsgType::None {
                return Err(RegistryError::ReservedTag { name: entry.name });
            }
            if !tags.insert(entry.msg_type) {
                return Err(RegistryError::DuplicateTag {
                    msg_type: entry.msg_type,
                });
            }
            if !kinds.insert(entry.type_id()) {
                return Err(RegistryError::DuplicateKind { name: entry.name });
            }
        }
        Ok(())
    }
}
