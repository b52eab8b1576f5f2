//! Marketplace fee rules and the payment splits derived from them.

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A collection fee as published by the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRule {
    /// Percentage of the sale price (2.5 means 2.5%).
    #[serde(rename = "fee")]
    pub percentage: Decimal,
    pub recipient: Address,
    pub required: bool,
}

impl FeeRule {
    pub fn new(percentage: Decimal, recipient: Address, required: bool) -> Self {
        Self {
            percentage,
            recipient,
            required,
        }
    }
}

/// One payee of a listing and what it receives, in base units of the
/// payment token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSplit {
    pub recipient: Address,
    #[serde(with = "super::dec_str")]
    pub amount: U256,
}

/// Token a listing is priced in. The zero address denotes the chain's
/// native currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentToken {
    pub symbol: String,
    pub address: Address,
    pub decimals: u32,
}

impl PaymentToken {
    pub fn native(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            address: Address::ZERO,
            decimals: 18,
        }
    }

    pub fn is_native(&self) -> bool {
        self.address == Address::ZERO
    }
}
