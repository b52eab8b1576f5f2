//! Seller wallet loading.

use alloy_primitives::Address;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use std::str::FromStr;

/// The key that owns the listed NFTs and signs their orders.
#[derive(Clone)]
pub struct SellerWallet {
    signer: PrivateKeySigner,
    address: Address,
}

impl SellerWallet {
    /// Load the wallet from `WALLET_PRIVATE_KEY`.
    pub fn from_env() -> Result<Self> {
        let private_key = std::env::var("WALLET_PRIVATE_KEY")
            .context("WALLET_PRIVATE_KEY environment variable not set")?;

        Self::from_private_key(&private_key)
    }

    /// Create a wallet from a 64-character hex key, with or without `0x`.
    pub fn from_private_key(key: &str) -> Result<Self> {
        let key_clean = key.trim().trim_start_matches("0x");

        let signer = PrivateKeySigner::from_str(key_clean)
            .context("Invalid private key format - expected 64 hex characters")?;
        let address = signer.address();

        Ok(Self { signer, address })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn into_signer(self) -> PrivateKeySigner {
        self.signer
    }
}

impl std::fmt::Debug for SellerWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SellerWallet")
            .field("address", &self.address)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known development key, never funded on a real network.
    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_from_private_key_with_and_without_prefix() {
        let expected: Address = TEST_ADDRESS.parse().unwrap();

        let wallet = SellerWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(wallet.address(), expected);

        let bare = SellerWallet::from_private_key(TEST_PRIVATE_KEY.trim_start_matches("0x"))
            .unwrap();
        assert_eq!(bare.address(), expected);
    }

    #[test]
    fn test_invalid_private_key() {
        assert!(SellerWallet::from_private_key("not-a-valid-key").is_err());
        assert!(SellerWallet::from_private_key("0x1234").is_err());
    }

    #[test]
    fn test_debug_does_not_expose_key() {
        let wallet = SellerWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let debug_str = format!("{:?}", wallet);

        assert!(debug_str.contains("SellerWallet"));
        assert!(!debug_str.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478"));
    }
}
