//! EIP-712 domain and fixed protocol constants for Seaport.
//!
//! Seaport binds every order signature to its own contract, the chain, and
//! the protocol version through the EIP-712 domain separator.

use alloy_primitives::{address, Address, B256, U256};
use alloy_sol_types::SolValue;
use std::borrow::Cow;

/// Chain ID for Ethereum mainnet.
pub const MAINNET_CHAIN_ID: u64 = 1;

/// Chain ID for Sepolia testnet.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Seaport 1.6 contract address (same on every supported chain).
pub const SEAPORT_ADDRESS: Address = address!("00000000000000adc04c56bf30ac9d3c0aaf14dc");

/// OpenSea conduit key.
pub const SEAPORT_CONDUIT_KEY: &str =
    "0x0000007b02230091a7ed01230072f7006a004d60a8d4e71d599b8104250f0000";

/// Canonical zero `bytes32`, as used for `zoneHash`.
pub const ZERO_BYTES32_HEX: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";

/// Domain name reported by Seaport's `name()`.
pub const SEAPORT_NAME: &str = "Seaport";

/// Version reported by Seaport 1.6's `information()`.
pub const SEAPORT_VERSION: &str = "1.6";

/// EIP-712 domain for Seaport order signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeaportDomain {
    /// Domain name.
    pub name: String,
    /// Domain version.
    pub version: String,
    /// Chain ID.
    pub chain_id: U256,
    /// Verifying contract address.
    pub verifying_contract: Address,
}

impl SeaportDomain {
    /// Seaport 1.6 on the given chain.
    pub fn seaport(chain_id: u64) -> Self {
        Self {
            name: SEAPORT_NAME.to_string(),
            version: SEAPORT_VERSION.to_string(),
            chain_id: U256::from(chain_id),
            verifying_contract: SEAPORT_ADDRESS,
        }
    }

    /// Create domain with custom parameters (e.g. as read from the contract).
    pub fn custom(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: U256::from(chain_id),
            verifying_contract,
        }
    }

    /// Compute the EIP-712 domain separator hash.
    pub fn separator(&self) -> B256 {
        let domain_type_hash = alloy_primitives::keccak256(
            b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
        );

        let name_hash = alloy_primitives::keccak256(self.name.as_bytes());
        let version_hash = alloy_primitives::keccak256(self.version.as_bytes());

        // encodeData pads the address to a full word
        let contract_padded = B256::left_padding_from(self.verifying_contract.as_slice());

        let encoded = (
            domain_type_hash,
            name_hash,
            version_hash,
            self.chain_id,
            contract_padded,
        )
            .abi_encode_packed();

        alloy_primitives::keccak256(&encoded)
    }

    /// The domain as `alloy_sol_types` models it, for struct hashing.
    pub fn to_eip712(&self) -> alloy_sol_types::Eip712Domain {
        alloy_sol_types::Eip712Domain::new(
            Some(Cow::Owned(self.name.clone())),
            Some(Cow::Owned(self.version.clone())),
            Some(self.chain_id),
            Some(self.verifying_contract),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seaport_domain() {
        let domain = SeaportDomain::seaport(MAINNET_CHAIN_ID);
        assert_eq!(domain.name, "Seaport");
        assert_eq!(domain.version, "1.6");
        assert_eq!(domain.chain_id, U256::from(1u64));
        assert_eq!(
            domain.verifying_contract,
            "0x00000000000000adc04c56bf30ac9d3c0aaf14dc"
                .parse::<Address>()
                .unwrap()
        );
    }

    #[test]
    fn test_domain_separator_deterministic() {
        let domain1 = SeaportDomain::seaport(SEPOLIA_CHAIN_ID);
        let domain2 = SeaportDomain::seaport(SEPOLIA_CHAIN_ID);
        assert_eq!(domain1.separator(), domain2.separator());
    }

    #[test]
    fn test_domain_separator_is_chain_bound() {
        assert_ne!(
            SeaportDomain::seaport(MAINNET_CHAIN_ID).separator(),
            SeaportDomain::seaport(SEPOLIA_CHAIN_ID).separator()
        );
    }

    #[test]
    fn test_separator_matches_sol_types() {
        let domain = SeaportDomain::seaport(MAINNET_CHAIN_ID);
        assert_eq!(domain.separator(), domain.to_eip712().separator());
    }

    #[test]
    fn test_constants_are_well_formed() {
        assert_eq!(SEAPORT_CONDUIT_KEY.len(), 66);
        assert_eq!(ZERO_BYTES32_HEX.len(), 66);
        assert!(ZERO_BYTES32_HEX[2..].chars().all(|c| c == '0'));
    }
}
