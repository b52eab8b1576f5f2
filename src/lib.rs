//! Seaport Lister: NFT listing automation for OpenSea
//!
//! This is the root crate that provides benchmark access to the internal modules.
//! For actual functionality, use the individual crates directly:
//!
//! - `seaport-core`: Fee allocation, order assembly, EIP-712 signing, API clients
//! - `list-nft`: Command-line driver for listing a single NFT

// Re-export for benchmarks
pub use seaport_core as core;
