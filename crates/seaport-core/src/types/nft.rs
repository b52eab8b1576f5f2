//! NFT metadata as reported by the marketplace API.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Token standard of a listed asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStandard {
    Erc721,
    Erc1155,
    Other(String),
}

impl TokenStandard {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "erc721" => TokenStandard::Erc721,
            "erc1155" => TokenStandard::Erc1155,
            _ => TokenStandard::Other(raw.to_string()),
        }
    }
}

impl fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenStandard::Erc721 => write!(f, "erc721"),
            TokenStandard::Erc1155 => write!(f, "erc1155"),
            TokenStandard::Other(s) => write!(f, "{}", s),
        }
    }
}

/// NFT entry from the account/collection endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nft {
    pub identifier: String,
    pub contract: String,
    pub token_standard: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Nft {
    /// Convert the loosely typed API record into a listable asset.
    #[allow(clippy::result_large_err)]
    pub fn to_asset(&self) -> Result<NftAsset> {
        let contract = self.contract.parse::<Address>().map_err(|e| {
            Error::encoding(format!("Invalid NFT contract {}: {}", self.contract, e))
        })?;
        let token_id = U256::from_str_radix(self.identifier.trim(), 10).map_err(|e| {
            Error::encoding(format!("Invalid token identifier {}: {}", self.identifier, e))
        })?;

        Ok(NftAsset {
            contract,
            token_id,
            standard: TokenStandard::parse(&self.token_standard),
        })
    }
}

/// A single token, strongly typed, ready to become an offer line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftAsset {
    pub contract: Address,
    pub token_id: U256,
    pub standard: TokenStandard,
}
