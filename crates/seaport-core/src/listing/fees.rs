//! Fee allocation: splits a listing price between the seller and the
//! collection's required fee recipients.

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use tracing::debug;

use super::price::pow10;
use crate::types::{FeeRule, PaymentSplit};
use crate::{Error, Result};

/// Turns a price and a set of fee rules into the ordered payment schedule
/// of a listing: seller first, then one split per required rule in rule
/// order.
#[derive(Debug, Clone, Copy)]
pub struct FeeAllocator {
    seller: Address,
}

impl FeeAllocator {
    pub fn new(seller: Address) -> Self {
        Self { seller }
    }

    pub fn seller(&self) -> Address {
        self.seller
    }

    /// Allocate `price` (base units). Splits always sum to `price`; the
    /// rounding remainder of every fee stays with the seller.
    #[allow(clippy::result_large_err)]
    pub fn allocate(&self, price: U256, rules: &[FeeRule]) -> Result<Vec<PaymentSplit>> {
        if price.is_zero() {
            return Err(Error::invalid_price("price must be greater than zero"));
        }

        let mut splits = Vec::with_capacity(rules.len() + 1);
        let mut total_fees = U256::ZERO;

        for rule in rules.iter().filter(|r| r.required) {
            let amount = fee_amount(price, rule.percentage)?;
            total_fees = total_fees
                .checked_add(amount)
                .ok_or_else(|| Error::configuration("total fees overflow uint256"))?;

            debug!(
                recipient = %rule.recipient,
                percentage = %rule.percentage,
                amount = %amount,
                "Required fee allocated"
            );

            splits.push(PaymentSplit {
                recipient: rule.recipient,
                amount,
            });
        }

        if total_fees >= price {
            return Err(Error::configuration(format!(
                "required fees {} leave nothing for the seller out of price {}",
                total_fees, price
            )));
        }

        splits.insert(
            0,
            PaymentSplit {
                recipient: self.seller,
                amount: price - total_fees,
            },
        );

        Ok(splits)
    }
}

/// `floor(price * percentage / 100)` in exact integer arithmetic.
#[allow(clippy::result_large_err)]
fn fee_amount(price: U256, percentage: Decimal) -> Result<U256> {
    if percentage.is_sign_negative() && !percentage.is_zero() {
        return Err(Error::configuration(format!(
            "negative fee percentage {}",
            percentage
        )));
    }

    let numerator = U256::from(percentage.mantissa().unsigned_abs());
    let denominator = pow10(percentage.scale())
        .and_then(|scale| scale.checked_mul(U256::from(100u64)))
        .ok_or_else(|| Error::configuration(format!("fee percentage {} too precise", percentage)))?;

    price
        .checked_mul(numerator)
        .map(|scaled| scaled / denominator)
        .ok_or_else(|| Error::configuration(format!("fee on price {} overflows uint256", price)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn sum(splits: &[PaymentSplit]) -> U256 {
        splits.iter().fold(U256::ZERO, |acc, s| acc + s.amount)
    }

    #[test]
    fn test_single_required_fee() {
        let seller = addr(0x11);
        let allocator = FeeAllocator::new(seller);
        let price = U256::from(289_000_000_000_000_000u64);
        let rules = vec![FeeRule::new(Decimal::new(25, 1), addr(0xaa), true)];

        let splits = allocator.allocate(price, &rules).unwrap();

        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].recipient, seller);
        assert_eq!(splits[0].amount, U256::from(281_775_000_000_000_000u64));
        assert_eq!(splits[1].recipient, addr(0xaa));
        assert_eq!(splits[1].amount, U256::from(7_225_000_000_000_000u64));
        assert_eq!(sum(&splits), price);
    }

    #[test]
    fn test_optional_fees_ignored() {
        let allocator = FeeAllocator::new(addr(0x11));
        let price = U256::from(1_000_000u64);
        let rules = vec![
            FeeRule::new(Decimal::new(5, 0), addr(0xbb), false),
            FeeRule::new(Decimal::new(1, 0), addr(0xcc), true),
        ];

        let splits = allocator.allocate(price, &rules).unwrap();

        assert_eq!(splits.len(), 2);
        assert!(splits.iter().all(|s| s.recipient != addr(0xbb)));
        assert_eq!(splits[0].amount, U256::from(990_000u64));
        assert_eq!(splits[1].amount, U256::from(10_000u64));
    }

    #[test]
    fn test_rounding_remainder_goes_to_seller() {
        let allocator = FeeAllocator::new(addr(0x11));
        // 2.5% of 999 = 24.975 -> 24; 1.25% of 999 = 12.4875 -> 12
        let price = U256::from(999u64);
        let rules = vec![
            FeeRule::new(Decimal::new(25, 1), addr(0xaa), true),
            FeeRule::new(Decimal::new(125, 2), addr(0xbb), true),
        ];

        let splits = allocator.allocate(price, &rules).unwrap();

        assert_eq!(splits[1].amount, U256::from(24u64));
        assert_eq!(splits[2].amount, U256::from(12u64));
        assert_eq!(splits[0].amount, U256::from(963u64));
        assert_eq!(sum(&splits), price);
    }

    #[test]
    fn test_fee_order_preserved() {
        let allocator = FeeAllocator::new(addr(0x11));
        let rules = vec![
            FeeRule::new(Decimal::new(1, 0), addr(0x03), true),
            FeeRule::new(Decimal::new(1, 0), addr(0x01), true),
            FeeRule::new(Decimal::new(1, 0), addr(0x02), true),
        ];

        let splits = allocator
            .allocate(U256::from(10_000u64), &rules)
            .unwrap();

        let recipients: Vec<_> = splits.iter().map(|s| s.recipient).collect();
        assert_eq!(
            recipients,
            vec![addr(0x11), addr(0x03), addr(0x01), addr(0x02)]
        );
    }

    #[test]
    fn test_no_rules_gives_seller_everything() {
        let allocator = FeeAllocator::new(addr(0x11));
        let splits = allocator.allocate(U256::from(42u64), &[]).unwrap();
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].amount, U256::from(42u64));
    }

    #[test]
    fn test_zero_price_rejected() {
        let allocator = FeeAllocator::new(addr(0x11));
        let rules = vec![FeeRule::new(Decimal::new(25, 1), addr(0xaa), true)];
        assert!(matches!(
            allocator.allocate(U256::ZERO, &rules),
            Err(Error::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_fees_over_price_rejected() {
        let allocator = FeeAllocator::new(addr(0x11));
        let rules = vec![
            FeeRule::new(Decimal::new(60, 0), addr(0xaa), true),
            FeeRule::new(Decimal::new(50, 0), addr(0xbb), true),
        ];
        assert!(matches!(
            allocator.allocate(U256::from(1_000u64), &rules),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_fees_equal_to_price_rejected() {
        let allocator = FeeAllocator::new(addr(0x11));
        let rules = vec![FeeRule::new(Decimal::new(100, 0), addr(0xaa), true)];
        assert!(matches!(
            allocator.allocate(U256::from(1_000u64), &rules),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_negative_percentage_rejected() {
        let allocator = FeeAllocator::new(addr(0x11));
        let rules = vec![FeeRule::new(Decimal::new(-1, 0), addr(0xaa), true)];
        assert!(matches!(
            allocator.allocate(U256::from(1_000u64), &rules),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_splits_always_sum_to_price() {
        let allocator = FeeAllocator::new(addr(0x11));
        let rules = vec![
            FeeRule::new(Decimal::new(25, 1), addr(0xaa), true),
            FeeRule::new(Decimal::new(333, 2), addr(0xbb), true),
            FeeRule::new(Decimal::new(7, 0), addr(0xcc), false),
        ];

        for raw in [1u64, 7, 99, 1_001, 123_456_789, 289_000_000_000_000_000] {
            let price = U256::from(raw);
            let splits = allocator.allocate(price, &rules).unwrap();
            assert_eq!(sum(&splits), price, "price {}", raw);
        }
    }
}
