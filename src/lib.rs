pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{ConversionRequest, ExchangeCalculator};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: f64,
        currency: String,
        json: bool,
    },
    Serve {
        addr: Option<String>,
    },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let calculator = ExchangeCalculator::new(&config.provider.base_url, config.provider.timeout())
        .context("Failed to create exchange calculator")?;

    match command {
        AppCommand::Convert {
            amount,
            currency,
            json,
        } => {
            let request = ConversionRequest::new(amount, &currency)?;
            info!(?request, "Converting to EUR");
            let result = cli::convert::run_convert(&calculator, &request, json).await?;
            if !result.is_success() {
                anyhow::bail!("Conversion failed with status {}", result.status);
            }
            Ok(())
        }
        AppCommand::Serve { addr } => {
            let addr = addr.unwrap_or(config.server.addr);
            cli::serve::run_server(Arc::new(calculator), &addr).await
        }
    }
}
