use clap::{Parser, Subcommand};

mod convert;
mod error;
mod format;
mod inspect;
mod logging;
mod output;
mod utils;

use error::Result;

#[derive(Parser)]
#[command(name = "rsaio")]
#[command(about = "Convert RSA keys between DER, PEM, JSON and XML", long_about = None)]
struct Cli {
    /// Log level for diagnostics on stderr (RUST_LOG overrides)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert keys from one encoding to another
    Convert {
        #[command(flatten)]
        config: convert::Config,
    },
    /// Show key sizes and exponent
    Inspect {
        #[command(flatten)]
        config: inspect::Config,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_level)?;

    match cli.command {
        Commands::Convert { config } => {
            convert::execute(config)?;
        }
        Commands::Inspect { config } => {
            inspect::execute(config)?;
        }
    }

    Ok(())
}
