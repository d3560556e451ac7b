//! Migrate command
//!
//! Usage: idmq migrate [--db <FILE>]

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Database path
    #[arg(long, default_value = ".idmq/store.db")]
    pub db: PathBuf,
}

pub fn execute(args: MigrateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = args.db.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut conn = idmq_store::db::open(&args.db)?;
    let applied = idmq_store::migrations::apply_migrations(&mut conn)?;
    eprintln!("{} migration(s) applied to {}", applied, args.db.display());

    for id in idmq_store::migrations::applied_migrations(&conn)? {
        println!("{}", id);
    }
    Ok(())
}
