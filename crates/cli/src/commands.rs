//! Subcommands.

use anyhow::Context;
use clap::Subcommand;
use mempool_wire::{decode, encode, CodecError, Registry, TxMessage};
use std::fmt;
use tracing::info;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Wrap raw transaction bytes in a tx announcement envelope.
    Encode {
        /// Transaction bytes as hex.
        #[arg(long)]
        tx: String,
    },
    /// Decode an envelope and print the message it carries.
    Decode {
        /// Envelope bytes as hex.
        hex: String,
    },
    /// List registered message tags.
    Tags,
}

/// Text output of a command, one entry per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub lines: Vec<String>,
}

impl CommandResult {
    fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

impl Command {
    pub fn execute(&self) -> anyhow::Result<CommandResult> {
        match self {
            Command::Encode { tx } => {
                let tx = hex::decode(tx.trim()).context("--tx is not valid hex")?;
                let bytes = encode(&TxMessage::new(tx))?;
                info!(len = bytes.len(), "encoded envelope");
                Ok(CommandResult::line(hex::encode(bytes)))
            }
            Command::Decode { hex: input } => {
                let bytes = hex::decode(input.trim()).context("envelope is not valid hex")?;
                let msg = decode(&bytes).map_err(|err| {
                    let class = classify(&err);
                    anyhow::Error::new(err).context(class)
                })?;
                let msg_type = msg.msg_type();
                let name = Registry::global()
                    .lookup(msg_type)
                    .map_or("unregistered", |entry| entry.name);
                Ok(CommandResult {
                    lines: vec![
                        format!("tag: {} ({name})", msg_type.as_u32()),
                        msg.to_string(),
                    ],
                })
            }
            Command::Tags => Ok(CommandResult {
                lines: Registry::global()
                    .entries()
                    .map(|entry| format!("{}\t{}", entry.msg_type.as_u32(), entry.name))
                    .collect(),
            }),
        }
    }
}

fn classify(err: &CodecError) -> &'static str {
    if err.is_structural() {
        "envelope is malformed"
    } else if err.is_unknown_variant() {
        "envelope carries an unknown message tag"
    } else {
        "envelope payload is malformed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_then_decode() {
        let encoded = Command::Encode {
            tx: "deadbeef".into(),
        }
        .execute()
        .unwrap();
        assert_eq!(encoded.lines.len(), 1);

        let decoded = Command::Decode {
            hex: encoded.lines[0].clone(),
        }
        .execute()
        .unwrap();
        assert_eq!(
            decoded.lines,
            vec![
                "tag: 1 (TxMessage)".to_string(),
                "[TxMessage [222 173 190 239]]".to_string()
            ]
        );
    }

    #[test]
    fn test_encode_rejects_bad_hex() {
        let err = Command::Encode { tx: "zz".into() }.execute().unwrap_err();
        assert!(err.to_string().contains("not valid hex"));
    }

    #[test]
    fn test_decode_classifies_unknown_tag() {
        // tag 7, empty payload
        let err = Command::Decode {
            hex: "070000000000000000000000".into(),
        }
        .execute()
        .unwrap_err();

        assert_eq!(err.to_string(), "envelope carries an unknown message tag");
        assert_eq!(
            err.downcast_ref::<CodecError>(),
            Some(&CodecError::UnknownVariant { tag: 7 })
        );
    }

    #[test]
    fn test_decode_classifies_truncated_frame() {
        let err = Command::Decode { hex: "0100".into() }.execute().unwrap_err();
        assert_eq!(err.to_string(), "envelope is malformed");
    }

    #[test]
    fn test_tags() {
        let result = Command::Tags.execute().unwrap();
        assert_eq!(result.to_string(), "1\tTxMessage");
    }
}
