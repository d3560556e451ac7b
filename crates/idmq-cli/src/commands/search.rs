//! Search command
//!
//! Usage: idmq search --entity <TYPE> [--filter <JSON>] [--db <FILE>]
//!        [--config <FILE>] [--page N] [--size N] [--sort FIELD[:desc]]
//!        [--date YYYY-MM-DD] [--json]

use chrono::NaiveDate;
use clap::Args;
use idmq_core::model::EntityType;
use idmq_core::{DataFilter, FilterRegistry, QueryScope};
use idmq_store::{PageRequest, SortOrder};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Entity type to list (identity, contract, role, tree-node, ...)
    #[arg(short, long)]
    pub entity: String,

    /// Filter as a JSON object of property to value (or array of values)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Database path
    #[arg(long, default_value = ".idmq/store.db")]
    pub db: PathBuf,

    /// TOML file with `idm.sec.core.filter.*` overrides
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = 0)]
    pub page: u32,

    #[arg(long, default_value_t = 20)]
    pub size: u32,

    /// Sort term, repeatable; `field` or `field:desc`
    #[arg(long)]
    pub sort: Vec<String>,

    /// Evaluate validity as of this date instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Print the whole page as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let entity_type: EntityType = args.entity.parse()?;
    let filter = match &args.filter {
        Some(raw) => Some(DataFilter::from_json(
            entity_type,
            &serde_json::from_str(raw)?,
        )?),
        None => None,
    };

    let config = super::load_config(args.config.as_deref())?;
    let registry = FilterRegistry::with_default_builders(config)?;

    let mut request = PageRequest::new(args.page, args.size);
    for term in &args.sort {
        request = request.sorted_by(parse_sort(term)?);
    }

    let scope = match args.date {
        Some(date) => QueryScope::at(entity_type, date),
        None => QueryScope::new(entity_type),
    };

    let conn = idmq_store::db::open(&args.db)?;
    let page = idmq_store::repo::search_in(&conn, &registry, scope, filter.as_ref(), &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    for id in &page.ids {
        println!("{}", id);
    }
    eprintln!(
        "{} of {} (page {}, size {})",
        page.ids.len(),
        page.total,
        page.page,
        page.size
    );
    Ok(())
}

fn parse_sort(term: &str) -> Result<SortOrder, String> {
    match term.split_once(':') {
        None => Ok(SortOrder::asc(term)),
        Some((field, "asc")) => Ok(SortOrder::asc(field)),
        Some((field, "desc")) => Ok(SortOrder::desc(field)),
        Some((_, direction)) => Err(format!(
            "unknown sort direction '{}' (expected asc or desc)",
            direction
        )),
    }
}
