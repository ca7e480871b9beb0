//! Fee computation from gas price tiers.
use crate::{
    chain::info::GasPriceStep,
    currency::Currency,
    error::FeeError,
    tx::config::Coin,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// Gas prices are applied in fixed point with 18 decimal places.
const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeTier {
    Low,
    #[default]
    Average,
    High,
}

impl FeeTier {
    pub const ALL: [FeeTier; 3] = [FeeTier::Low, FeeTier::Average, FeeTier::High];
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeeTier::Low => "low",
            FeeTier::Average => "average",
            FeeTier::High => "high",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for FeeTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(FeeTier::Low),
            "average" => Ok(FeeTier::Average),
            "high" => Ok(FeeTier::High),
            other => Err(format!(
                "unknown fee tier '{}', expected low, average or high",
                other
            )),
        }
    }
}

/// Computes `ceil(gas * price)` in the minimal denomination of `currency`.
pub fn compute_fee(gas: u64, price: f64, currency: &Currency) -> Result<Coin, FeeError> {
    if !price.is_finite() || price < 0.0 {
        return Err(FeeError::InvalidGasPrice(price));
    }
    let scaled = (price * PRICE_SCALE as f64).round();
    if scaled >= u128::MAX as f64 {
        return Err(FeeError::InvalidGasPrice(price));
    }

    let product = u128::from(gas)
        .checked_mul(scaled as u128)
        .ok_or(FeeError::Overflow(gas))?;
    let mut amount = product / PRICE_SCALE;
    if product % PRICE_SCALE != 0 {
        amount += 1;
    }

    Ok(Coin::new(amount, &currency.coin_minimal_denom))
}

/// Fee for `gas` at the price of `tier`, paid in the first of `fee_currencies`.
pub fn fee_for_tier(
    gas: u64,
    step: &GasPriceStep,
    tier: FeeTier,
    fee_currencies: &[Currency],
) -> Result<Coin, FeeError> {
    let currency = fee_currencies.first().ok_or(FeeError::NoFeeCurrency)?;

    compute_fee(gas, step.price(tier), currency)
}
