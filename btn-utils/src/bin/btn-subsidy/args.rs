//! btn-subsidy arguments
//!
//! For usage please refer to the program help: `btn-subsidy --help`

use std::path::PathBuf;

use structopt::StructOpt;

use btn_chain::{block::Height, parameters::Network};

/// btn-subsidy arguments
#[derive(Debug, StructOpt)]
pub struct Args {
    /// Network whose built-in consensus parameters are used
    #[structopt(default_value = "mainnet", short, long)]
    pub network: Network,

    /// JSON file with consensus parameters, used instead of the network's
    #[structopt(long, parse(from_os_str))]
    pub params: Option<PathBuf>,

    #[structopt(subcommand)]
    pub command: Command,
}

/// What to print
#[derive(Debug, StructOpt)]
pub enum Command {
    /// The subsidy, regime and halving count at a height
    Subsidy {
        /// Block height
        height: Height,
    },

    /// Every change in the subsidy schedule
    Schedule,

    /// The total subsidy created below a height
    Supply {
        /// First height that is not counted
        end: Height,
    },
}
