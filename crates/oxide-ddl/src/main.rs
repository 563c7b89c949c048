//! oxide-ddl CLI
//!
//! Command-line tool for diffing and formatting SQL DDL files.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use oxide_ddl::Session;

/// Migration scripts from two versions of a SQL schema.
#[derive(Parser)]
#[command(name = "oxide-ddl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dialect of the inputs (generic, cockroachdb, mysql, spanner).
    #[arg(short, long, env = "OXIDE_DDL_DIALECT", default_value = "generic")]
    dialect: String,

    /// Enable verbose output; repeat to trace parser and differ decisions.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the script migrating BEFORE to AFTER.
    Diff {
        /// Current schema (`-` for stdin).
        before: PathBuf,

        /// Desired schema (`-` for stdin).
        after: PathBuf,

        /// Comment line printed above the script (repeatable).
        #[arg(long)]
        header: Vec<String>,
    },

    /// Print a schema in canonical form.
    Fmt {
        /// Schema file (`-` for stdin).
        file: PathBuf,
    },

    /// Print the parsed schema as JSON.
    Dump {
        /// Schema file (`-` for stdin).
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the SQL.
    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let session = Session::new(&cli.dialect)?.with_trace(cli.verbose > 1);

    match cli.command {
        Commands::Diff {
            before,
            after,
            header,
        } => {
            if let Some(script) = session.diff(&before, &after, &header)? {
                print!("{script}");
            }
        }
        Commands::Fmt { file } => print!("{}", session.fmt(&file)?),
        Commands::Dump { file } => println!("{}", session.dump(&file)?),
    }

    Ok(())
}
