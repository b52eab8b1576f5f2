//! Signed listing payload and the marketplace's answer to it.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::order::Order;

/// Body of `POST /api/v2/orders/{chain}/seaport/listings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOrderPayload {
    pub parameters: Order,
    /// 65-byte signature, lower-case `0x` hex.
    pub signature: String,
    pub protocol_address: Address,
}

/// Listing as accepted by the marketplace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingReceipt {
    pub order_hash: Option<String>,
    pub protocol_address: Option<String>,
    pub current_price: Option<String>,
    pub created_date: Option<String>,
    pub closing_date: Option<String>,
    pub listing_time: Option<u64>,
    pub expiration_time: Option<u64>,
}
