use crate::{
    chain::info::GasPriceStep,
    currency::Currency,
    error::FeeError,
    tx::{
        config::Coin,
        fee::{self, FeeTier},
    },
};
use tracing::debug;

/// Cosmos SDK default for the maximum memo size.
pub const MAX_MEMO_BYTES: usize = 256;

/// Fields of the form that take part in validity checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TxField {
    Gas,
    Memo,
    Fees,
}

/// Editable gas, memo and fee values of a pending transaction.
///
/// When a fee tier is selected the fees follow the gas: every change to the gas, the gas price
/// step or the fee currencies recomputes them.
#[derive(Clone, Debug, Default)]
pub struct TxState {
    gas: u64,
    memo: String,
    fees: Vec<Coin>,
    fee_currencies: Vec<Currency>,
    gas_price_step: GasPriceStep,
    fee_tier: Option<FeeTier>,
}

impl TxState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gas(&self) -> u64 {
        self.gas
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn fees(&self) -> &[Coin] {
        &self.fees
    }

    pub fn fee_currencies(&self) -> &[Currency] {
        &self.fee_currencies
    }

    pub fn fee_tier(&self) -> Option<FeeTier> {
        self.fee_tier
    }

    pub fn set_gas(&mut self, gas: u64) {
        self.gas = gas;
        self.refresh_fees();
    }

    pub fn set_memo(&mut self, memo: &str) {
        self.memo = memo.to_string();
    }

    /// Sets the fees directly, dropping any fee tier selection.
    pub fn set_fees(&mut self, fees: Vec<Coin>) {
        self.fee_tier = None;
        self.fees = fees;
    }

    pub fn set_fee_currencies(&mut self, currencies: Vec<Currency>) {
        self.fee_currencies = currencies;
        self.refresh_fees();
    }

    pub fn set_gas_price_step(&mut self, step: GasPriceStep) {
        self.gas_price_step = step;
        self.refresh_fees();
    }

    /// Selects a fee tier and computes the fee from it.
    pub fn select_fee_tier(&mut self, tier: FeeTier) -> Result<(), FeeError> {
        let fee = fee::fee_for_tier(self.gas, &self.gas_price_step, tier, &self.fee_currencies)?;
        self.fee_tier = Some(tier);
        self.fees = vec![fee];

        Ok(())
    }

    /// Fee each tier would cost at the current gas.
    pub fn tier_fees(&self) -> Vec<(FeeTier, Result<Coin, FeeError>)> {
        FeeTier::ALL
            .iter()
            .map(|tier| {
                (
                    *tier,
                    fee::fee_for_tier(self.gas, &self.gas_price_step, *tier, &self.fee_currencies),
                )
            })
            .collect()
    }

    fn refresh_fees(&mut self) {
        let tier = match self.fee_tier {
            Some(tier) => tier,
            None => return,
        };

        match fee::fee_for_tier(self.gas, &self.gas_price_step, tier, &self.fee_currencies) {
            Ok(fee) => self.fees = vec![fee],
            Err(err) => {
                debug!("clearing fees, {} fee could not be computed: {}", tier, err);
                self.fees.clear();
            }
        }
    }

    /// Describes why `field` is invalid, or `None` if it is valid.
    pub fn field_error(&self, field: TxField) -> Option<String> {
        match field {
            TxField::Gas => {
                if self.gas == 0 {
                    return Some("gas must be greater than 0".to_string());
                }
            }
            TxField::Memo => {
                if self.memo.len() > MAX_MEMO_BYTES {
                    return Some(format!("memo must be at most {} bytes", MAX_MEMO_BYTES));
                }
            }
            TxField::Fees => {
                if self.fees.is_empty() {
                    return Some("fee is required".to_string());
                }
                for coin in &self.fees {
                    if !self
                        .fee_currencies
                        .iter()
                        .any(|c| c.coin_minimal_denom == coin.denom)
                    {
                        return Some(format!("{} is not a fee currency", coin.denom));
                    }
                }
            }
        }

        None
    }

    pub fn is_valid(&self, fields: &[TxField]) -> bool {
        fields.iter().all(|field| self.field_error(*field).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay::assay;

    fn state() -> TxState {
        let mut state = TxState::new();
        state.set_fee_currencies(vec![Currency::new("ATOM", "uatom", 6)]);
        state.set_gas(200_000);
        state
    }

    #[assay]
    fn fees_follow_gas_once_a_tier_is_selected() {
        let mut state = state();
        assert!(state.fees().is_empty());

        state.select_fee_tier(FeeTier::High).unwrap();
        assert_eq!(state.fees(), &[Coin::new(8000, "uatom")]);

        state.set_gas(100_000);
        assert_eq!(state.fees(), &[Coin::new(4000, "uatom")]);

        state.set_fees(vec![Coin::new(1, "uatom")]);
        state.set_gas(300_000);
        assert_eq!(state.fees(), &[Coin::new(1, "uatom")]);
        assert_eq!(state.fee_tier(), None);
    }

    #[assay]
    fn validity_per_field() {
        let mut state = state();
        assert!(state.is_valid(&[TxField::Gas, TxField::Memo]));
        assert!(!state.is_valid(&[TxField::Gas, TxField::Memo, TxField::Fees]));

        state.set_fees(vec![Coin::new(5000, "uosmo")]);
        assert_eq!(
            state.field_error(TxField::Fees),
            Some("uosmo is not a fee currency".to_string())
        );

        state.select_fee_tier(FeeTier::Average).unwrap();
        assert!(state.is_valid(&[TxField::Gas, TxField::Memo, TxField::Fees]));

        state.set_memo(&"m".repeat(MAX_MEMO_BYTES + 1));
        assert!(!state.is_valid(&[TxField::Memo]));

        state.set_gas(0);
        assert!(state.field_error(TxField::Gas).is_some());
    }

    #[assay]
    fn tier_fees_lists_every_tier() {
        let fees = state().tier_fees();

        assert_eq!(fees.len(), 3);
        assert_eq!(fees[0].0, FeeTier::Low);
        assert_eq!(fees[0].1.as_ref().unwrap(), &Coin::new(2000, "uatom"));
    }
}
