//! Conversion of human-readable prices into token base units.

use alloy_primitives::U256;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{Error, Result};

/// `10^exp` as a `U256`, `None` past the type's range.
pub(crate) fn pow10(exp: u32) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(exp))
}

/// Parse a human price ("0.289"), rejecting zero and negative values.
#[allow(clippy::result_large_err)]
pub fn parse_decimal(text: &str) -> Result<Decimal> {
    let price = Decimal::from_str(text.trim())
        .map_err(|e| Error::encoding(format!("Invalid price {:?}: {}", text, e)))?;
    if price <= Decimal::ZERO {
        return Err(Error::invalid_price(format!(
            "price must be positive, got {}",
            price
        )));
    }
    Ok(price)
}

/// Parse a decimal price and shift it by the payment token's decimals.
/// Digits below the smallest unit are truncated.
#[allow(clippy::result_large_err)]
pub fn parse_price(text: &str, decimals: u32) -> Result<U256> {
    to_base_units(parse_decimal(text)?, decimals)
}

/// Shift a decimal amount into base units of a token with `decimals` places.
#[allow(clippy::result_large_err)]
pub fn to_base_units(price: Decimal, decimals: u32) -> Result<U256> {
    if price <= Decimal::ZERO {
        return Err(Error::invalid_price(format!(
            "price must be positive, got {}",
            price
        )));
    }

    // price > 0, so the mantissa is positive
    let mantissa = U256::from(price.mantissa().unsigned_abs());
    let scale = price.scale();

    let amount = if decimals >= scale {
        pow10(decimals - scale)
            .and_then(|factor| mantissa.checked_mul(factor))
            .ok_or_else(|| Error::encoding(format!("price {} overflows uint256", price)))?
    } else {
        let divisor = pow10(scale - decimals)
            .ok_or_else(|| Error::encoding(format!("price {} has too many digits", price)))?;
        mantissa / divisor
    };

    if amount.is_zero() {
        return Err(Error::invalid_price(format!(
            "price {} is below the smallest unit of a {}-decimal token",
            price, decimals
        )));
    }

    Ok(amount)
}

/// Render a base-unit amount with `decimals` places, trailing zeros trimmed.
pub fn format_units(amount: U256, decimals: u32) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;
    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };

    let (whole, frac) = padded.split_at(padded.len() - decimals);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac)
    }
}
