//! Validation of chain information suggested by third-party sites.
//!
//! Validation happens in two stages. Deserialization enforces the shape of the payload: known
//! keys only, integer and type tag checks, currency variants. [`SuggestingChainInfo::validate`]
//! then checks values, collects every violation with its path and normalizes contract-backed
//! currency denominations.
use crate::{
    chain::info::{ChainFeature, ChainInfo},
    error::{ChainInfoError, ValidationErrors},
    utils,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

pub const MAX_CHAIN_ID_LENGTH: usize = 30;
pub const MAX_CHAIN_NAME_LENGTH: usize = 30;

/// Chain information as received from a site. It has the shape of a [`ChainInfo`] but none of
/// its values have been checked; the only way to obtain the [`ChainInfo`] is to validate it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SuggestingChainInfo(ChainInfo);

impl SuggestingChainInfo {
    pub fn new(info: ChainInfo) -> Self {
        SuggestingChainInfo(info)
    }

    pub fn chain_id(&self) -> &str {
        &self.0.chain_id
    }

    /// Validates the suggestion and returns the normalized [`ChainInfo`].
    pub fn validate(self) -> Result<ChainInfo, ChainInfoError> {
        let mut info = self.0;
        let mut errors = ValidationErrors::new();

        if !utils::is_absolute_uri(&info.rpc) {
            errors.push("rpc", "must be a valid uri");
        }
        if !utils::is_absolute_uri(&info.rest) {
            errors.push("rest", "must be a valid uri");
        }
        check_length(&mut errors, "chainId", &info.chain_id, MAX_CHAIN_ID_LENGTH);
        check_length(
            &mut errors,
            "chainName",
            &info.chain_name,
            MAX_CHAIN_NAME_LENGTH,
        );

        info.stake_currency.validate("stakeCurrency", &mut errors);

        for (name, url) in [
            ("walletUrl", &info.wallet_url),
            ("walletUrlForStaking", &info.wallet_url_for_staking),
        ] {
            if let Some(url) = url {
                if !utils::is_absolute_uri(url) {
                    errors.push(name, "must be a valid uri");
                }
            }
        }

        info.bip44.validate("bip44", &mut errors);
        for (i, bip44) in info.alternative_bip44s.iter().enumerate() {
            bip44.validate(&format!("alternativeBIP44s[{}]", i), &mut errors);
        }
        info.bech32_config.validate("bech32Config", &mut errors);

        if info.currencies.is_empty() {
            errors.push("currencies", "must contain at least 1 items");
        }
        for (i, currency) in info.currencies.iter().enumerate() {
            currency.validate(&format!("currencies[{}]", i), &mut errors);
        }

        if info.fee_currencies.is_empty() {
            errors.push("feeCurrencies", "must contain at least 1 items");
        }
        for (i, currency) in info.fee_currencies.iter().enumerate() {
            currency.validate(&format!("feeCurrencies[{}]", i), &mut errors);
        }

        if let Some(step) = &info.gas_price_step {
            step.validate("gasPriceStep", &mut errors);
        }

        check_features(&mut errors, &info.features);

        let mut info = errors.into_result(info)?;
        for currency in info.currencies.iter_mut() {
            currency.normalize();
        }
        debug!("validated suggested chain {}", info.chain_id);

        Ok(info)
    }
}

/// Parses a JSON chain suggestion and validates it.
pub fn parse_suggesting_chain_info(json: &str) -> Result<ChainInfo, ChainInfoError> {
    let suggesting: SuggestingChainInfo = serde_json::from_str(json)?;

    suggesting.validate()
}

// Lengths are counted in UTF-16 code units, the unit sites measure strings in.
fn check_length(errors: &mut ValidationErrors, path: &str, value: &str, max: usize) {
    let length = value.encode_utf16().count();
    if length == 0 {
        errors.push(path, "is not allowed to be empty");
    } else if length > max {
        errors.push(
            path,
            format!("length must be less than or equal to {} characters long", max),
        );
    }
}

fn check_features(errors: &mut ValidationErrors, features: &[ChainFeature]) {
    let mut seen = HashSet::new();
    for (i, feature) in features.iter().enumerate() {
        if !seen.insert(feature) {
            errors.push(
                format!("features[{}]", i),
                format!("contains a duplicate value \"{}\"", feature),
            );
        }
    }

    if seen.contains(&ChainFeature::Cosmwasm) && seen.contains(&ChainFeature::Secretwasm) {
        errors.push("features", "cosmwasm and secretwasm are not compatible");
    }
}
