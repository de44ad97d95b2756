//! Prints the block subsidy schedule of a BTN network as JSON.
//!
//! For usage please refer to the program help: `btn-subsidy --help`

use std::fs;

use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::Serialize;
use structopt::StructOpt;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use btn_chain::{
    amount::{Amount, NonNegative},
    block::Height,
    parameters::ConsensusParams,
};
use btn_consensus::block::subsidy::general::{
    self, block_subsidy, subsidy_schedule, total_supply, SubsidyRegime,
};

mod args;

/// Initialise tracing using its defaults.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .expect("the fallback filter is valid");

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(ErrorLayer::default())
        .init();
}

/// The subsidy at a single height.
#[derive(Debug, Serialize)]
struct HeightSubsidy {
    height: Height,
    regime: SubsidyRegime,
    halvings: Option<u32>,
    subsidy: Amount<NonNegative>,
}

/// The total subsidy below a height.
#[derive(Debug, Serialize)]
struct Supply {
    end: Height,
    total: Amount<NonNegative>,
}

/// Returns the consensus parameters selected by `args`.
fn consensus_params(args: &args::Args) -> Result<ConsensusParams> {
    match &args.params {
        Some(path) => {
            let json = fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            let params = serde_json::from_str(&json)
                .wrap_err_with(|| format!("invalid consensus parameters in {}", path.display()))?;
            info!(path = %path.display(), ?params, "loaded consensus parameters");
            Ok(params)
        }
        None => Ok(args.network.consensus_params()),
    }
}

/// process entry point for `btn-subsidy`
fn main() -> Result<()> {
    init_tracing();
    color_eyre::install()?;

    let args = args::Args::from_args();
    let params = consensus_params(&args)?;

    let json = match args.command {
        args::Command::Subsidy { height } => {
            if height > Height::MAX {
                return Err(eyre!(
                    "height {} is above the maximum height {}",
                    height,
                    Height::MAX
                ));
            }

            serde_json::to_string_pretty(&HeightSubsidy {
                height,
                regime: SubsidyRegime::current(height, &params),
                halvings: general::halvings(height, &params),
                subsidy: block_subsidy(height, &params),
            })?
        }
        args::Command::Schedule => serde_json::to_string_pretty(&subsidy_schedule(&params))?,
        args::Command::Supply { end } => {
            let total = total_supply(end, &params)
                .wrap_err_with(|| format!("supply below height {} is out of range", end))?;
            serde_json::to_string_pretty(&Supply { end, total })?
        }
    };

    println!("{}", json);

    Ok(())
}
