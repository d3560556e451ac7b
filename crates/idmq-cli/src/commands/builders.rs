//! Builders command
//!
//! Usage: idmq builders [--config <FILE>] [--json]

use clap::Args;
use idmq_core::FilterRegistry;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BuildersArgs {
    /// TOML file with `idm.sec.core.filter.*` overrides
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print descriptors as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: BuildersArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(args.config.as_deref())?;
    let registry = FilterRegistry::with_default_builders(config)?;
    let descriptors = registry.registered_builders()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(());
    }

    for d in descriptors {
        let marker = if d.effective { "*" } else { " " };
        println!("{} {} {} (order {})", marker, d.key, d.implementation, d.order);
    }
    Ok(())
}
