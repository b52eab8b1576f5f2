//! Assembly of a single-asset Seaport listing order.

use alloy_primitives::{Address, U256};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::DEFAULT_LISTING_WINDOW_SECS;
use crate::signing::domain::{SEAPORT_CONDUIT_KEY, ZERO_BYTES32_HEX};
use crate::types::{
    ConsiderationLine, ItemType, NftAsset, OfferLine, Order, OrderType, PaymentSplit,
    TokenStandard,
};
use crate::{Error, Result};

/// Builds the `Order` for one NFT listing with a fluent API.
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    offerer: Option<Address>,
    asset: Option<NftAsset>,
    price: Option<U256>,
    payment_token: Address,
    splits: Vec<PaymentSplit>,
    counter: U256,
    window: Duration,
    start_time: Option<u64>,
    salt: Option<U256>,
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self {
            offerer: None,
            asset: None,
            price: None,
            payment_token: Address::ZERO,
            splits: Vec::new(),
            counter: U256::ZERO,
            window: Duration::from_secs(DEFAULT_LISTING_WINDOW_SECS),
            start_time: None,
            salt: None,
        }
    }

    pub fn offerer(mut self, offerer: Address) -> Self {
        self.offerer = Some(offerer);
        self
    }

    pub fn asset(mut self, asset: NftAsset) -> Self {
        self.asset = Some(asset);
        self
    }

    /// Listing price in base units of the payment token.
    pub fn price(mut self, price: U256) -> Self {
        self.price = Some(price);
        self
    }

    /// Payment token; the zero address (default) means native currency.
    pub fn payment_token(mut self, token: Address) -> Self {
        self.payment_token = token;
        self
    }

    pub fn splits(mut self, splits: Vec<PaymentSplit>) -> Self {
        self.splits = splits;
        self
    }

    /// Offerer's current Seaport counter.
    pub fn counter(mut self, counter: U256) -> Self {
        self.counter = counter;
        self
    }

    pub fn listing_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Fix the start time instead of using the clock.
    pub fn start_at(mut self, timestamp: u64) -> Self {
        self.start_time = Some(timestamp);
        self
    }

    /// Fix the salt instead of drawing a random one.
    pub fn salt(mut self, salt: U256) -> Self {
        self.salt = Some(salt);
        self
    }

    /// Build the order.
    ///
    /// The price is checked before anything else so a zero price never
    /// reaches the network or the signer.
    #[allow(clippy::result_large_err)]
    pub fn build(self) -> Result<Order> {
        let price = match self.price {
            Some(p) if !p.is_zero() => p,
            _ => return Err(Error::invalid_price("price must be greater than zero")),
        };
        let offerer = self
            .offerer
            .ok_or_else(|| Error::configuration("order has no offerer"))?;
        let asset = self
            .asset
            .ok_or_else(|| Error::configuration("order has no asset"))?;

        let item_type = item_type_for(&asset.standard)?;

        if self.window.as_secs() == 0 {
            return Err(Error::configuration("listing window must be at least one second"));
        }

        if self.splits.is_empty() {
            return Err(Error::configuration("order has no payment splits"));
        }
        let total = self
            .splits
            .iter()
            .try_fold(U256::ZERO, |acc, s| acc.checked_add(s.amount))
            .ok_or_else(|| Error::configuration("payment splits overflow uint256"))?;
        if total != price {
            return Err(Error::configuration(format!(
                "payment splits sum to {} but price is {}",
                total, price
            )));
        }

        let start_time = self.start_time.unwrap_or_else(unix_now);
        let end_time = start_time
            .checked_add(self.window.as_secs())
            .ok_or_else(|| Error::configuration("listing end time overflows"))?;

        let salt = self.salt.unwrap_or_else(random_salt);

        let offer = vec![OfferLine {
            item_type,
            token: asset.contract,
            identifier_or_criteria: asset.token_id,
            start_amount: U256::from(1u64),
            end_amount: U256::from(1u64),
        }];

        let payment_kind = if self.payment_token == Address::ZERO {
            ItemType::Native
        } else {
            ItemType::Erc20
        };

        let consideration: Vec<ConsiderationLine> = self
            .splits
            .iter()
            .map(|split| ConsiderationLine {
                item_type: payment_kind,
                token: self.payment_token,
                identifier_or_criteria: U256::ZERO,
                start_amount: split.amount,
                end_amount: split.amount,
                recipient: split.recipient,
            })
            .collect();

        Ok(Order {
            offerer,
            zone: Address::ZERO,
            zone_hash: ZERO_BYTES32_HEX.to_string(),
            start_time,
            end_time,
            order_type: OrderType::FullOpen,
            salt: salt.to_string(),
            conduit_key: SEAPORT_CONDUIT_KEY.to_string(),
            offer,
            total_original_consideration_items: consideration.len(),
            consideration,
            counter: self.counter,
        })
    }
}

impl Default for OrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Seaport item type for an NFT standard.
#[allow(clippy::result_large_err)]
pub fn item_type_for(standard: &TokenStandard) -> Result<ItemType> {
    match standard {
        TokenStandard::Erc721 => Ok(ItemType::Erc721),
        TokenStandard::Erc1155 => Ok(ItemType::Erc1155),
        TokenStandard::Other(raw) => Err(Error::UnsupportedAsset {
            standard: raw.clone(),
        }),
    }
}

/// Random 256-bit salt; distinct for orders built in the same second.
fn random_salt() -> U256 {
    U256::from_be_bytes(rand::random::<[u8; 32]>())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELLER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn seller() -> Address {
        SELLER.parse().unwrap()
    }

    fn asset(standard: TokenStandard) -> NftAsset {
        NftAsset {
            contract: "0x300b105942d6d181cdfe8199fd48eb09d26efd24"
                .parse()
                .unwrap(),
            token_id: U256::from(42u64),
            standard,
        }
    }

    fn splits() -> Vec<PaymentSplit> {
        vec![
            PaymentSplit {
                recipient: seller(),
                amount: U256::from(281_775_000_000_000_000u64),
            },
            PaymentSplit {
                recipient: Address::repeat_byte(0xaa),
                amount: U256::from(7_225_000_000_000_000u64),
            },
        ]
    }

    fn builder() -> OrderBuilder {
        OrderBuilder::new()
            .offerer(seller())
            .asset(asset(TokenStandard::Erc721))
            .price(U256::from(289_000_000_000_000_000u64))
            .splits(splits())
            .counter(U256::from(3u64))
    }

    #[test]
    fn test_build_listing_order() {
        let order = builder().start_at(1_700_000_000).build().unwrap();

        assert_eq!(order.offerer, seller());
        assert_eq!(order.zone, Address::ZERO);
        assert_eq!(order.zone_hash, ZERO_BYTES32_HEX);
        assert_eq!(order.conduit_key, SEAPORT_CONDUIT_KEY);
        assert_eq!(order.order_type, OrderType::FullOpen);
        assert_eq!(order.start_time, 1_700_000_000);
        assert_eq!(order.end_time, 1_700_000_600);
        assert_eq!(order.counter, U256::from(3u64));

        assert_eq!(order.offer.len(), 1);
        let offer = &order.offer[0];
        assert_eq!(offer.item_type, ItemType::Erc721);
        assert_eq!(offer.identifier_or_criteria, U256::from(42u64));
        assert_eq!(offer.start_amount, U256::from(1u64));
        assert_eq!(offer.end_amount, U256::from(1u64));

        assert_eq!(order.consideration.len(), 2);
        assert_eq!(order.total_original_consideration_items, 2);
        assert_eq!(order.consideration[0].recipient, seller());
        assert!(order
            .consideration
            .iter()
            .all(|c| c.item_type == ItemType::Native
                && c.token == Address::ZERO
                && c.identifier_or_criteria.is_zero()
                && c.start_amount == c.end_amount));
        assert_eq!(
            order.total_consideration(),
            Some(U256::from(289_000_000_000_000_000u64))
        );
    }

    #[test]
    fn test_erc1155_item_type() {
        let order = builder()
            .asset(asset(TokenStandard::Erc1155))
            .build()
            .unwrap();
        assert_eq!(order.offer[0].item_type, ItemType::Erc1155);
    }

    #[test]
    fn test_erc20_payment_token() {
        let weth = Address::repeat_byte(0xee);
        let order = builder().payment_token(weth).build().unwrap();
        assert!(order
            .consideration
            .iter()
            .all(|c| c.item_type == ItemType::Erc20 && c.token == weth));
    }

    #[test]
    fn test_unknown_standard_rejected() {
        let result = builder()
            .asset(asset(TokenStandard::Other("cryptopunks".to_string())))
            .build();
        assert!(matches!(result, Err(Error::UnsupportedAsset { .. })));
    }

    #[test]
    fn test_zero_price_rejected_first() {
        // No asset or offerer either: the price check must win.
        let result = OrderBuilder::new().price(U256::ZERO).build();
        assert!(matches!(result, Err(Error::InvalidPrice { .. })));

        let result = OrderBuilder::new().build();
        assert!(matches!(result, Err(Error::InvalidPrice { .. })));
    }

    #[test]
    fn test_splits_must_match_price() {
        let result = builder().price(U256::from(1u64)).build();
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_zero_window_rejected() {
        let result = builder().listing_window(Duration::ZERO).build();
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_custom_window_and_salt() {
        let order = builder()
            .start_at(100)
            .listing_window(Duration::from_secs(3600))
            .salt(U256::from(12345u64))
            .build()
            .unwrap();
        assert_eq!(order.end_time, 3700);
        assert_eq!(order.salt, "12345");
    }

    #[test]
    fn test_salts_differ_between_orders() {
        let a = builder().start_at(1).build().unwrap();
        let b = builder().start_at(1).build().unwrap();
        assert_ne!(a.salt, b.salt);
    }

    #[test]
    fn test_start_time_defaults_to_now() {
        let before = unix_now();
        let order = builder().build().unwrap();
        assert!(order.start_time >= before);
        assert!(order.start_time < order.end_time);
    }
}
