//! Signing module for Seaport listing orders.
//!
//! This module provides EIP-712 typed data encoding and signing for
//! Seaport `OrderComponents`.
//!
//! # Architecture
//!
//! ```text
//! Order (listing::OrderBuilder)
//!       │
//!       ▼
//! TypedDataEncoder ─── encodes ──► EncodedTypedData (domain + OrderComponents)
//!                                        │
//!                                        ▼
//!                        OrderSigner ── TypedDataSigner (key custody)
//!                                        │
//!                                        ▼
//!                               SignedOrderPayload ──► OpenSea API
//! ```
//!
//! # Example
//!
//! ```ignore
//! use seaport_core::signing::{OrderSigner, SeaportDomain, TypedDataEncoder};
//! use alloy_signer_local::PrivateKeySigner;
//!
//! let signer = OrderSigner::new(PrivateKeySigner::from_str("0x...")?);
//! let encoded = TypedDataEncoder::encode(&order, &SeaportDomain::seaport(1))?;
//! let payload = signer.sign(order, &encoded).await?;
//! ```

pub mod domain;
pub mod signer;
pub mod typed_data;

pub use domain::{
    SeaportDomain, MAINNET_CHAIN_ID, SEAPORT_ADDRESS, SEAPORT_CONDUIT_KEY, SEAPORT_NAME,
    SEAPORT_VERSION, SEPOLIA_CHAIN_ID, ZERO_BYTES32_HEX,
};

pub use typed_data::{
    parse_bytes32, parse_salt, ConsiderationItem, EncodedTypedData, OfferItem, OrderComponents,
    TypedDataEncoder,
};

pub use signer::{recover_signer, OrderSigner, TypedDataSigner};
