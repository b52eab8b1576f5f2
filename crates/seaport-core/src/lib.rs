//! Seaport Core Library
//!
//! Fee allocation, Seaport order assembly, EIP-712 signing and the
//! OpenSea/RPC clients used to list NFTs.

pub mod api;
pub mod config;
pub mod error;
pub mod listing;
pub mod signing;
pub mod types;

pub use error::{Error, Result};
