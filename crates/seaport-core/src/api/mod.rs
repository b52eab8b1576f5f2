//! API clients for external services.

pub mod opensea;
pub mod rpc;

pub use opensea::{BestListing, Collection, ContractInfo, OpenSeaClient, Payment};
pub use rpc::{SeaportInformation, SeaportRpc};
