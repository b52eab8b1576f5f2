//! EIP-712 typed-data encoding of Seaport orders.
//!
//! The schema is declared once with `sol!`, so the `OrderComponents`,
//! `OfferItem` and `ConsiderationItem` types (and their type hashes) are
//! checked at compile time. The encoder only maps an [`Order`] onto these
//! types and canonicalizes its textual fields; hashing happens when the
//! signer asks for [`EncodedTypedData::signing_hash`].

use alloy_primitives::{B256, U256};
use alloy_sol_types::{sol, SolStruct};
use serde_json::{json, Value};

use super::domain::{SeaportDomain, ZERO_BYTES32_HEX};
use crate::types::Order;
use crate::{Error, Result};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct OfferItem {
        uint8 itemType;
        address token;
        uint256 identifierOrCriteria;
        uint256 startAmount;
        uint256 endAmount;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct ConsiderationItem {
        uint8 itemType;
        address token;
        uint256 identifierOrCriteria;
        uint256 startAmount;
        uint256 endAmount;
        address recipient;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct OrderComponents {
        address offerer;
        address zone;
        OfferItem[] offer;
        ConsiderationItem[] consideration;
        uint8 orderType;
        uint256 startTime;
        uint256 endTime;
        bytes32 zoneHash;
        uint256 salt;
        bytes32 conduitKey;
        uint256 counter;
    }
}

/// One `(name, type)` member of an EIP-712 struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: &'static str,
}

const fn field(name: &'static str, ty: &'static str) -> Field {
    Field { name, ty }
}

pub const EIP712_DOMAIN_FIELDS: &[Field] = &[
    field("name", "string"),
    field("version", "string"),
    field("chainId", "uint256"),
    field("verifyingContract", "address"),
];

pub const ORDER_COMPONENTS_FIELDS: &[Field] = &[
    field("offerer", "address"),
    field("zone", "address"),
    field("offer", "OfferItem[]"),
    field("consideration", "ConsiderationItem[]"),
    field("orderType", "uint8"),
    field("startTime", "uint256"),
    field("endTime", "uint256"),
    field("zoneHash", "bytes32"),
    field("salt", "uint256"),
    field("conduitKey", "bytes32"),
    field("counter", "uint256"),
];

pub const OFFER_ITEM_FIELDS: &[Field] = &[
    field("itemType", "uint8"),
    field("token", "address"),
    field("identifierOrCriteria", "uint256"),
    field("startAmount", "uint256"),
    field("endAmount", "uint256"),
];

pub const CONSIDERATION_ITEM_FIELDS: &[Field] = &[
    field("itemType", "uint8"),
    field("token", "address"),
    field("identifierOrCriteria", "uint256"),
    field("startAmount", "uint256"),
    field("endAmount", "uint256"),
    field("recipient", "address"),
];

/// Order components plus the domain they are signed under.
#[derive(Debug, Clone)]
pub struct EncodedTypedData {
    pub domain: SeaportDomain,
    pub message: OrderComponents,
}

impl EncodedTypedData {
    pub const PRIMARY_TYPE: &'static str = "OrderComponents";

    /// `hashStruct(message)`, which is also Seaport's order hash.
    pub fn struct_hash(&self) -> B256 {
        self.message.eip712_hash_struct()
    }

    /// `keccak256("\x19\x01" ‖ domainSeparator ‖ hashStruct(message))`.
    pub fn signing_hash(&self) -> B256 {
        self.message.eip712_signing_hash(&self.domain.to_eip712())
    }

    /// `eth_signTypedData_v4` document, for external signers and logging.
    pub fn to_json(&self) -> Value {
        let m = &self.message;

        json!({
            "types": {
                "EIP712Domain": fields_json(EIP712_DOMAIN_FIELDS),
                "OrderComponents": fields_json(ORDER_COMPONENTS_FIELDS),
                "OfferItem": fields_json(OFFER_ITEM_FIELDS),
                "ConsiderationItem": fields_json(CONSIDERATION_ITEM_FIELDS),
            },
            "primaryType": Self::PRIMARY_TYPE,
            "domain": {
                "name": self.domain.name,
                "version": self.domain.version,
                "chainId": self.domain.chain_id.to_string(),
                "verifyingContract": self.domain.verifying_contract.to_string(),
            },
            "message": {
                "offerer": m.offerer.to_string(),
                "zone": m.zone.to_string(),
                "offer": m.offer.iter().map(|o| json!({
                    "itemType": o.itemType.to_string(),
                    "token": o.token.to_string(),
                    "identifierOrCriteria": o.identifierOrCriteria.to_string(),
                    "startAmount": o.startAmount.to_string(),
                    "endAmount": o.endAmount.to_string(),
                })).collect::<Vec<_>>(),
                "consideration": m.consideration.iter().map(|c| json!({
                    "itemType": c.itemType.to_string(),
                    "token": c.token.to_string(),
                    "identifierOrCriteria": c.identifierOrCriteria.to_string(),
                    "startAmount": c.startAmount.to_string(),
                    "endAmount": c.endAmount.to_string(),
                    "recipient": c.recipient.to_string(),
                })).collect::<Vec<_>>(),
                "orderType": m.orderType.to_string(),
                "startTime": m.startTime.to_string(),
                "endTime": m.endTime.to_string(),
                "zoneHash": format!("0x{}", hex::encode(m.zoneHash)),
                "salt": m.salt.to_string(),
                "conduitKey": format!("0x{}", hex::encode(m.conduitKey)),
                "counter": m.counter.to_string(),
            },
        })
    }
}

fn fields_json(fields: &[Field]) -> Value {
    Value::Array(
        fields
            .iter()
            .map(|f| json!({ "name": f.name, "type": f.ty }))
            .collect(),
    )
}

/// Maps orders onto the typed-data schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedDataEncoder;

impl TypedDataEncoder {
    #[allow(clippy::result_large_err)]
    pub fn encode(order: &Order, domain: &SeaportDomain) -> Result<EncodedTypedData> {
        if order.total_original_consideration_items != order.consideration.len() {
            return Err(Error::encoding(format!(
                "totalOriginalConsiderationItems is {} but order has {} consideration items",
                order.total_original_consideration_items,
                order.consideration.len()
            )));
        }
        if order.offer.len() != 1 {
            return Err(Error::encoding(format!(
                "listing must offer exactly one item, order has {}",
                order.offer.len()
            )));
        }
        if order.start_time >= order.end_time {
            return Err(Error::encoding(format!(
                "startTime {} is not before endTime {}",
                order.start_time, order.end_time
            )));
        }

        let offer = order
            .offer
            .iter()
            .map(|line| OfferItem {
                itemType: line.item_type.as_u8(),
                token: line.token,
                identifierOrCriteria: line.identifier_or_criteria,
                startAmount: line.start_amount,
                endAmount: line.end_amount,
            })
            .collect();

        let consideration = order
            .consideration
            .iter()
            .map(|line| ConsiderationItem {
                itemType: line.item_type.as_u8(),
                token: line.token,
                identifierOrCriteria: line.identifier_or_criteria,
                startAmount: line.start_amount,
                endAmount: line.end_amount,
                recipient: line.recipient,
            })
            .collect();

        let message = OrderComponents {
            offerer: order.offerer,
            zone: order.zone,
            offer,
            consideration,
            orderType: order.order_type.as_u8(),
            startTime: U256::from(order.start_time),
            endTime: U256::from(order.end_time),
            zoneHash: parse_bytes32(&order.zone_hash)?,
            salt: parse_salt(&order.salt)?,
            conduitKey: parse_bytes32(&order.conduit_key)?,
            counter: order.counter,
        };

        Ok(EncodedTypedData {
            domain: domain.clone(),
            message,
        })
    }
}

/// Decode a `0x`-prefixed 32-byte hex string.
///
/// The canonical zero string maps directly to the zero word. Anything that
/// is not exactly 64 hex digits is rejected rather than padded or cut.
#[allow(clippy::result_large_err)]
pub fn parse_bytes32(value: &str) -> Result<B256> {
    if value == ZERO_BYTES32_HEX {
        return Ok(B256::ZERO);
    }

    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| Error::encoding(format!("bytes32 value {:?} lacks 0x prefix", value)))?;

    if digits.len() != 64 {
        return Err(Error::encoding(format!(
            "bytes32 value {:?} has {} hex digits, expected 64",
            value,
            digits.len()
        )));
    }

    let mut out = [0u8; 32];
    hex::decode_to_slice(digits, &mut out)
        .map_err(|e| Error::encoding(format!("bytes32 value {:?}: {}", value, e)))?;

    Ok(B256::from(out))
}

/// Parse a salt given in decimal or `0x` hex.
#[allow(clippy::result_large_err)]
pub fn parse_salt(value: &str) -> Result<U256> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(digits) if !digits.is_empty() => U256::from_str_radix(digits, 16),
        Some(_) => return Err(Error::encoding("salt has no digits")),
        None if !trimmed.is_empty() => U256::from_str_radix(trimmed, 10),
        None => return Err(Error::encoding("salt is empty")),
    };

    parsed.map_err(|e| Error::encoding(format!("invalid salt {:?}: {}", value, e)))
}
