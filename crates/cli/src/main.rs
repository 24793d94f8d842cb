//! CLI entry point for mpwire.

use clap::Parser;
use mempool_wire_cli::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    config.run()
}
