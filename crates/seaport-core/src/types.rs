//! Core domain types for the listing pipeline.

pub mod dec_str;
pub mod fee;
pub mod nft;
pub mod order;
pub mod payload;

pub use fee::*;
pub use nft::*;
pub use order::*;
pub use payload::*;
