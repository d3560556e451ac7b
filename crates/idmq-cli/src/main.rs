use clap::{Parser, Subcommand};
use idmq_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "idmq")]
#[command(about = "Identity query filters over a local SQLite store", long_about = None)]
struct Cli {
    /// Emit operation logs to stderr (JSON with --log-json)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List registered filter builders and which one is effective per key
    Builders(commands::builders::BuildersArgs),
    /// Create or upgrade the store schema
    Migrate(commands::migrate::MigrateArgs),
    /// List entity ids matching a JSON filter
    Search(commands::search::SearchArgs),
}

fn main() {
    // a missing .env is fine; variables may come from the shell
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if cli.log_json {
        logging_facility::init(Profile::Production);
    } else if cli.verbose {
        logging_facility::init(Profile::Development);
    }

    let result = match cli.command {
        Commands::Builders(args) => commands::builders::execute(args),
        Commands::Migrate(args) => commands::migrate::execute(args),
        Commands::Search(args) => commands::search::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
