//! Order signing for Seaport listings.
//!
//! Key custody stays behind [`TypedDataSigner`]; the local private-key
//! signer implements it, and other backends (hardware wallets, remote
//! KMS) can plug in the same way.

use alloy_primitives::{Address, Signature};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{debug, info};

use super::domain::SEAPORT_ADDRESS;
use super::typed_data::{EncodedTypedData, TypedDataEncoder};
use crate::types::{Order, SignedOrderPayload};
use crate::{Error, Result};

/// Capability that signs EIP-712 typed data on behalf of one address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TypedDataSigner: Send + Sync {
    /// Address whose key produces the signatures.
    fn signer_address(&self) -> Address;

    /// Sign `data.signing_hash()`.
    async fn sign_encoded(&self, data: &EncodedTypedData) -> Result<Signature>;
}

#[async_trait]
impl TypedDataSigner for PrivateKeySigner {
    fn signer_address(&self) -> Address {
        Signer::address(self)
    }

    async fn sign_encoded(&self, data: &EncodedTypedData) -> Result<Signature> {
        let digest = data.signing_hash();
        self.sign_hash(&digest).await.map_err(|e| Error::Signing {
            message: format!("Failed to sign order: {}", e),
        })
    }
}

/// Signs encoded orders and packages them for submission.
#[derive(Clone)]
pub struct OrderSigner<S> {
    signer: S,
    protocol_address: Address,
}

impl<S: TypedDataSigner> OrderSigner<S> {
    /// Create a signer that submits against Seaport 1.6.
    pub fn new(signer: S) -> Self {
        Self {
            signer,
            protocol_address: SEAPORT_ADDRESS,
        }
    }

    /// Create a signer for a different Seaport deployment.
    pub fn with_protocol_address(signer: S, protocol_address: Address) -> Self {
        Self {
            signer,
            protocol_address,
        }
    }

    /// Get the signer's address.
    pub fn address(&self) -> Address {
        self.signer.signer_address()
    }

    pub fn protocol_address(&self) -> Address {
        self.protocol_address
    }

    /// Sign `encoded` and pair the signature with the order it encodes.
    ///
    /// Fails without signing if the order does not belong to this signer
    /// or does not match the encoded message.
    pub async fn sign(
        &self,
        order: Order,
        encoded: &EncodedTypedData,
    ) -> Result<SignedOrderPayload> {
        let address = self.address();
        if order.offerer != address {
            return Err(Error::Signing {
                message: format!(
                    "order offerer {} does not match signer {}",
                    order.offerer, address
                ),
            });
        }

        let expected = TypedDataEncoder::encode(&order, &encoded.domain)?;
        if expected.message != encoded.message {
            return Err(Error::Signing {
                message: "encoded typed data does not match the order".to_string(),
            });
        }

        let signature = self.signer.sign_encoded(encoded).await?;
        let signature = format!("0x{}", hex::encode(signature.as_bytes()));

        debug!(signature = %signature, "Order signed");
        info!(
            order_hash = %encoded.struct_hash(),
            offerer = %address,
            "Signed Seaport order"
        );

        Ok(SignedOrderPayload {
            parameters: order,
            signature,
            protocol_address: self.protocol_address,
        })
    }
}

/// Recover the address that produced `signature` over `encoded`.
#[allow(clippy::result_large_err)]
pub fn recover_signer(encoded: &EncodedTypedData, signature: &str) -> Result<Address> {
    let raw = hex::decode(signature.trim_start_matches("0x")).map_err(|e| Error::Signing {
        message: format!("Signature is not hex: {}", e),
    })?;
    let signature = Signature::try_from(raw.as_slice()).map_err(|e| Error::Signing {
        message: format!("Malformed signature: {}", e),
    })?;

    signature
        .recover_address_from_prehash(&encoded.signing_hash())
        .map_err(|e| Error::Signing {
            message: format!("Failed to recover signer: {}", e),
        })
}

impl<S: TypedDataSigner> std::fmt::Debug for OrderSigner<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSigner")
            .field("address", &format!("{:?}", self.address()))
            .field("protocol_address", &format!("{:?}", self.protocol_address))
            .finish()
    }
}
