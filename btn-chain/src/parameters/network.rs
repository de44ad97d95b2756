use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::block::Height;

use super::ConsensusParams;

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

/// An enum describing the possible network choices.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub enum Network {
    /// The production mainnet.
    Mainnet,
    /// The testnet.
    Testnet,
    /// A local regression testing network, with short halving intervals.
    Regtest,
}

impl Default for Network {
    fn default() -> Self {
        Network::Mainnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        })
    }
}

/// A network name that doesn't match any known network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown network: {0:?}, expected one of mainnet, testnet, regtest")]
pub struct InvalidNetworkError(String);

impl FromStr for Network {
    type Err = InvalidNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(InvalidNetworkError(s.to_owned())),
        }
    }
}

impl Network {
    /// Returns the consensus parameters for this network.
    pub fn consensus_params(&self) -> ConsensusParams {
        match self {
            // The premine window ends at height 501_000, where the secondary
            // schedule starts.
            Network::Mainnet => ConsensusParams::new(
                210_000,
                Height(490_271),
                10_729,
                192_713,
                10,
                1_500_000,
            ),
            Network::Testnet => {
                ConsensusParams::new(210_000, Height(1_000), 2_000, 5_000, 10, 210_000)
            }
            Network::Regtest => ConsensusParams::new(150, Height(200), 10, 1_000, 50, 150),
        }
        .expect("hard-coded consensus parameters are valid")
    }
}
