//! Configuration for the listing pipeline and its collaborators.
//!
//! Values come from the environment (optionally via `.env`) or from a
//! config file layered under environment variables. Clients receive the
//! config explicitly; nothing is held in a process-wide singleton.

use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default listing window (10 minutes).
pub const DEFAULT_LISTING_WINDOW_SECS: u64 = 600;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub opensea: OpenSeaConfig,
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Clone, Deserialize)]
pub struct OpenSeaConfig {
    pub api_key: String,
    /// Overrides the per-network API base URL.
    #[serde(default)]
    pub api_url: Option<String>,
}

impl fmt::Debug for OpenSeaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenSeaConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl OpenSeaConfig {
    pub fn base_url(&self, network: Network) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| network.opensea_api_url().to_string())
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct RpcConfig {
    pub rpc_url: Option<String>,
    pub infura_key: Option<String>,
}

impl fmt::Debug for RpcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcConfig")
            .field("rpc_url", &self.rpc_url)
            .field("infura_key", &self.infura_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RpcConfig {
    /// Resolve the JSON-RPC endpoint for a network.
    #[allow(clippy::result_large_err)]
    pub fn url_for(&self, network: Network) -> Result<String> {
        if let Some(url) = &self.rpc_url {
            return Ok(url.clone());
        }
        self.infura_key
            .as_ref()
            .map(|key| format!("{}{}", network.infura_base_url(), key))
            .ok_or_else(|| Error::Config {
                message: "Neither RPC_URL nor INFURA_KEY is set".to_string(),
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_LISTING_WINDOW_SECS,
        }
    }
}

impl ListingConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

fn default_window_secs() -> u64 {
    DEFAULT_LISTING_WINDOW_SECS
}

/// Networks the listing flow knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Ethereum,
    Sepolia,
}

impl Network {
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Ethereum => 1,
            Network::Sepolia => 11_155_111,
        }
    }

    /// Chain slug used in OpenSea API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Ethereum => "ethereum",
            Network::Sepolia => "sepolia",
        }
    }

    pub fn opensea_api_url(&self) -> &'static str {
        match self {
            Network::Ethereum => "https://api.opensea.io",
            Network::Sepolia => "https://testnets-api.opensea.io",
        }
    }

    fn infura_base_url(&self) -> &'static str {
        match self {
            Network::Ethereum => "https://mainnet.infura.io/v3/",
            Network::Sepolia => "https://sepolia.infura.io/v3/",
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ethereum" | "mainnet" => Ok(Network::Ethereum),
            "sepolia" => Ok(Network::Sepolia),
            other => Err(Error::Config {
                message: format!("Unknown network: {}", other),
            }),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            opensea: OpenSeaConfig {
                api_key: env::var("OPENSEA_API_KEY").map_err(|_| Error::Config {
                    message: "OPENSEA_API_KEY environment variable not set".to_string(),
                })?,
                api_url: env::var("OPENSEA_API_URL").ok(),
            },
            rpc: RpcConfig {
                rpc_url: env::var("RPC_URL").ok(),
                infura_key: env::var("INFURA_KEY").ok(),
            },
            listing: ListingConfig {
                window_secs: env::var("LISTING_WINDOW_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_LISTING_WINDOW_SECS),
            },
        })
    }

    /// Load configuration from a file, overridden by `SEAPORT__*` variables
    /// (e.g. `SEAPORT__OPENSEA__API_KEY`).
    #[allow(clippy::result_large_err)]
    pub fn load(path: &str) -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SEAPORT").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Configuration for tests (no network access needed).
    pub fn test_config() -> Self {
        Self {
            opensea: OpenSeaConfig {
                api_key: "test-key".to_string(),
                api_url: None,
            },
            rpc: RpcConfig {
                rpc_url: Some("http://127.0.0.1:8545".to_string()),
                infura_key: None,
            },
            listing: ListingConfig::default(),
        }
    }
}
