use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use mxc::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount to EUR
    Convert {
        /// Amount to convert, e.g. 100.00
        amount: f64,
        /// Three letter source currency code, e.g. USD
        currency: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve conversions over HTTP
    Serve {
        /// Address to listen on, overrides the configured one
        #[arg(short, long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => mxc::cli::setup::setup(),
        Some(Commands::Convert {
            amount,
            currency,
            json,
        }) => {
            let command = mxc::AppCommand::Convert {
                amount,
                currency,
                json,
            };
            mxc::run_command(command, cli.config_path.as_deref()).await
        }
        Some(Commands::Serve { addr }) => {
            mxc::run_command(mxc::AppCommand::Serve { addr }, cli.config_path.as_deref()).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
