//! Command-line configuration and logging setup.

use crate::commands::Command;
use anyhow::{anyhow, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Inspect and build mempool relay envelopes.
#[derive(Debug, Parser)]
#[command(name = "mpwire", version)]
pub struct CliConfig {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "mempool_wire=trace").
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Install the log subscriber, run the selected command and print its output.
    pub fn run(self) -> anyhow::Result<()> {
        init_tracing(&self.log_level)?;

        let result = self.command.execute()?;
        println!("{result}");
        Ok(())
    }
}

/// Logs go to stderr so command output on stdout stays pipeable.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level {default_level:?}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decode() {
        let config = CliConfig::try_parse_from(["mpwire", "decode", "0100"]).unwrap();
        assert_eq!(config.log_level, "warn");
        assert!(matches!(config.command, Command::Decode { ref hex } if hex == "0100"));
    }

    #[test]
    fn test_parse_global_log_level() {
        let config =
            CliConfig::try_parse_from(["mpwire", "encode", "--tx", "dead", "--log-level", "debug"])
                .unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(matches!(config.command, Command::Encode { ref tx } if tx == "dead"));
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(CliConfig::try_parse_from(["mpwire"]).is_err());
    }
}
