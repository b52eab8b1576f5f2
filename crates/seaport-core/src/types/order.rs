//! Seaport order parameters in their submission (JSON) form.
//!
//! Field names follow Seaport's `OrderParameters`; uint256 values are
//! carried as `U256` and serialized as decimal strings.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Seaport item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ItemType {
    Native = 0,
    Erc20 = 1,
    Erc721 = 2,
    Erc1155 = 3,
}

impl ItemType {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl From<ItemType> for u8 {
    fn from(kind: ItemType) -> u8 {
        kind.as_u8()
    }
}

impl TryFrom<u8> for ItemType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ItemType::Native),
            1 => Ok(ItemType::Erc20),
            2 => Ok(ItemType::Erc721),
            3 => Ok(ItemType::Erc1155),
            other => Err(Error::encoding(format!("Unknown item type: {}", other))),
        }
    }
}

/// Seaport order type. Listings built here are always `FullOpen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OrderType {
    /// No partial fills, anyone can execute.
    #[default]
    FullOpen = 0,
    PartialOpen = 1,
    FullRestricted = 2,
    PartialRestricted = 3,
}

impl OrderType {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl From<OrderType> for u8 {
    fn from(kind: OrderType) -> u8 {
        kind.as_u8()
    }
}

impl TryFrom<u8> for OrderType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OrderType::FullOpen),
            1 => Ok(OrderType::PartialOpen),
            2 => Ok(OrderType::FullRestricted),
            3 => Ok(OrderType::PartialRestricted),
            other => Err(Error::encoding(format!("Unknown order type: {}", other))),
        }
    }
}

/// The asset being sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferLine {
    pub item_type: ItemType,
    pub token: Address,
    #[serde(with = "super::dec_str")]
    pub identifier_or_criteria: U256,
    #[serde(with = "super::dec_str")]
    pub start_amount: U256,
    #[serde(with = "super::dec_str")]
    pub end_amount: U256,
}

/// A payment owed when the order fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsiderationLine {
    pub item_type: ItemType,
    pub token: Address,
    #[serde(with = "super::dec_str")]
    pub identifier_or_criteria: U256,
    #[serde(with = "super::dec_str")]
    pub start_amount: U256,
    #[serde(with = "super::dec_str")]
    pub end_amount: U256,
    pub recipient: Address,
}

/// Order parameters as signed and submitted.
///
/// `zone_hash`, `conduit_key` and `salt` keep the textual form the API
/// expects; the typed-data encoder canonicalizes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub offerer: Address,
    pub zone: Address,
    pub zone_hash: String,
    #[serde(with = "super::dec_str")]
    pub start_time: u64,
    #[serde(with = "super::dec_str")]
    pub end_time: u64,
    pub order_type: OrderType,
    pub salt: String,
    pub conduit_key: String,
    pub offer: Vec<OfferLine>,
    pub consideration: Vec<ConsiderationLine>,
    pub total_original_consideration_items: usize,
    #[serde(with = "super::dec_str")]
    pub counter: U256,
}

impl Order {
    /// Sum of every consideration line's start amount, `None` past uint256.
    pub fn total_consideration(&self) -> Option<U256> {
        self.consideration
            .iter()
            .try_fold(U256::ZERO, |acc, line| acc.checked_add(line.start_amount))
    }
}
