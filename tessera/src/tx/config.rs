use crate::error::FeeError;
use cosmrs::tx::Fee;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// An amount of a currency in its minimal denomination.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(amount: u128, denom: &str) -> Self {
        Coin {
            denom: denom.to_string(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = FeeError;

    /// Parses the `{amount}{denom}` form, e.g. `5000uatom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| FeeError::InvalidCoin(s.to_string()))?;
        let (amount, denom) = s.split_at(split);
        if amount.is_empty() {
            return Err(FeeError::InvalidCoin(s.to_string()));
        }
        let amount = amount
            .parse::<u128>()
            .map_err(|_| FeeError::InvalidCoin(s.to_string()))?;

        Ok(Coin::new(amount, denom))
    }
}

/// The part of a pending transaction the user may edit before it is signed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TxBuilderConfig {
    pub gas: u64,
    pub fee: Vec<Coin>,
    pub memo: String,
}

impl TxBuilderConfig {
    /// Converts the gas and fee into the [`Fee`] carried by a signed transaction.
    pub fn to_fee(&self) -> Result<Fee, FeeError> {
        let mut amount = Vec::with_capacity(self.fee.len());
        for coin in &self.fee {
            let value =
                u64::try_from(coin.amount).map_err(|_| FeeError::InvalidCoin(coin.to_string()))?;
            amount.push(cosmrs::Coin {
                denom: coin.denom.parse()?,
                amount: value.into(),
            });
        }

        Ok(Fee {
            amount,
            gas_limit: self.gas.into(),
            payer: None,
            granter: None,
        })
    }
}
