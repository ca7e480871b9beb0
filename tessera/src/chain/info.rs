//! Contains models for serializing and deserializing the chain information a wallet keeps for
//! every network it can connect to, as well as a few helpers for reading it.
use crate::{
    currency::{AppCurrency, Currency},
    error::ValidationErrors,
    tx::fee::FeeTier,
};
use bech32::{u5, Variant};
use bip32::DerivationPath;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChainInfo {
    pub rpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_config: Option<EndpointConfig>,
    pub rest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_config: Option<EndpointConfig>,
    pub chain_id: String,
    pub chain_name: String,
    /// The currency used for staking. Full currency information is also listed in `currencies`.
    pub stake_currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_url_for_staking: Option<String>,
    pub bip44: Bip44,
    #[serde(
        default,
        rename = "alternativeBIP44s",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub alternative_bip44s: Vec<Bip44>,
    pub bech32_config: Bech32Config,
    pub currencies: Vec<AppCurrency>,
    /// Currencies that can pay transaction fees.
    pub fee_currencies: Vec<Currency>,
    /// The slip-044 coin type, used when resolving addresses through ENS. Any integer is
    /// accepted here; only `bip44.coinType` has to form a derivation path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_type: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_step: Option<GasPriceStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<ChainFeature>,
    /// Marks chains whose staking and sending support comes without guarantee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<bool>,
}

impl ChainInfo {
    pub fn gas_price_step_or_default(&self) -> GasPriceStep {
        self.gas_price_step.clone().unwrap_or_default()
    }

    pub fn has_feature(&self, feature: ChainFeature) -> bool {
        self.features.contains(&feature)
    }

    pub fn find_currency(&self, minimal_denom: &str) -> Option<&AppCurrency> {
        self.currencies
            .iter()
            .find(|c| c.currency().coin_minimal_denom == minimal_denom)
    }

    pub fn is_beta(&self) -> bool {
        self.beta.unwrap_or(false)
    }
}

/// Request configuration for an RPC or REST endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    /// Request timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// BIP44 derivation parameters.
///
/// Only `coinType` is read when deserializing; every other key, `account` and `change`
/// included, is ignored whatever its type so that BIP44 objects produced by other libraries
/// deserialize. Read values always derive from account 0, change 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bip44 {
    pub coin_type: u32,
    #[serde(skip_deserializing)]
    pub account: u32,
    #[serde(skip_deserializing)]
    pub change: u32,
}

impl Bip44 {
    pub const PURPOSE: u32 = 44;

    pub fn new(coin_type: u32) -> Self {
        Bip44 {
            coin_type,
            account: 0,
            change: 0,
        }
    }

    /// Renders `m/44'/{coin_type}'/{account}'/{change}/{index}` and parses it, which rejects
    /// components that do not fit a BIP32 child number.
    pub fn derivation_path(&self, index: u32) -> Result<DerivationPath, bip32::Error> {
        format!(
            "m/{}'/{}'/{}'/{}/{}",
            Self::PURPOSE,
            self.coin_type,
            self.account,
            self.change,
            index
        )
        .parse()
    }

    pub(crate) fn validate(&self, path: &str, errors: &mut ValidationErrors) {
        if self.derivation_path(0).is_err() {
            errors.push(
                path,
                format!(
                    "does not form a valid derivation path (coinType {}, account {}, change {})",
                    self.coin_type, self.account, self.change
                ),
            );
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: String,
    pub bech32_prefix_acc_pub: String,
    pub bech32_prefix_val_addr: String,
    pub bech32_prefix_val_pub: String,
    pub bech32_prefix_cons_addr: String,
    pub bech32_prefix_cons_pub: String,
}

impl Bech32Config {
    /// Builds the Cosmos SDK default prefix set from an account prefix, e.g. `cosmos`,
    /// `cosmosvaloper`, `cosmosvalcons`.
    pub fn from_account_prefix(prefix: &str) -> Self {
        Bech32Config {
            bech32_prefix_acc_addr: prefix.to_string(),
            bech32_prefix_acc_pub: format!("{}pub", prefix),
            bech32_prefix_val_addr: format!("{}valoper", prefix),
            bech32_prefix_val_pub: format!("{}valoperpub", prefix),
            bech32_prefix_cons_addr: format!("{}valcons", prefix),
            bech32_prefix_cons_pub: format!("{}valconspub", prefix),
        }
    }

    fn prefixes(&self) -> [(&'static str, &str); 6] {
        [
            ("bech32PrefixAccAddr", &self.bech32_prefix_acc_addr),
            ("bech32PrefixAccPub", &self.bech32_prefix_acc_pub),
            ("bech32PrefixValAddr", &self.bech32_prefix_val_addr),
            ("bech32PrefixValPub", &self.bech32_prefix_val_pub),
            ("bech32PrefixConsAddr", &self.bech32_prefix_cons_addr),
            ("bech32PrefixConsPub", &self.bech32_prefix_cons_pub),
        ]
    }

    pub(crate) fn validate(&self, path: &str, errors: &mut ValidationErrors) {
        for (name, prefix) in self.prefixes() {
            let field = format!("{}.{}", path, name);
            if prefix.is_empty() {
                errors.push(field, "is not allowed to be empty");
                continue;
            }
            // encoding an empty payload only exercises the human readable part checks
            if let Err(err) = bech32::encode(prefix, Vec::<u5>::new(), Variant::Bech32) {
                errors.push(field, format!("is not a valid bech32 prefix: {}", err));
            }
        }
    }
}

/// Gas prices offered as low/average/high presets.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GasPriceStep {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

impl Default for GasPriceStep {
    fn default() -> Self {
        GasPriceStep {
            low: 0.01,
            average: 0.025,
            high: 0.04,
        }
    }
}

impl GasPriceStep {
    pub fn price(&self, tier: FeeTier) -> f64 {
        match tier {
            FeeTier::Low => self.low,
            FeeTier::Average => self.average,
            FeeTier::High => self.high,
        }
    }

    pub(crate) fn validate(&self, path: &str, errors: &mut ValidationErrors) {
        for (name, price) in [
            ("low", self.low),
            ("average", self.average),
            ("high", self.high),
        ] {
            if !price.is_finite() || price < 0.0 {
                errors.push(
                    format!("{}.{}", path, name),
                    "must be a finite, non-negative number",
                );
            }
        }
    }
}

/// Capabilities a chain advertises.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFeature {
    Stargate,
    Cosmwasm,
    Secretwasm,
}

impl fmt::Display for ChainFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChainFeature::Stargate => "stargate",
            ChainFeature::Cosmwasm => "cosmwasm",
            ChainFeature::Secretwasm => "secretwasm",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ChainInfoWithEmbed {
    pub embedded: bool,
    pub chain_info: ChainInfo,
}

/// A chain added at runtime at the request of a site.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SuggestedChainInfo {
    pub origin: String,
    pub chain_info: ChainInfo,
}

/// Origins allowed to interact with a chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccessOrigin {
    pub chain_id: String,
    pub origins: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay::assay;

    #[assay]
    fn bech32_config_from_account_prefix() {
        let config = Bech32Config::from_account_prefix("osmo");

        assert_eq!(config.bech32_prefix_acc_addr, "osmo");
        assert_eq!(config.bech32_prefix_acc_pub, "osmopub");
        assert_eq!(config.bech32_prefix_val_addr, "osmovaloper");
        assert_eq!(config.bech32_prefix_val_pub, "osmovaloperpub");
        assert_eq!(config.bech32_prefix_cons_addr, "osmovalcons");
        assert_eq!(config.bech32_prefix_cons_pub, "osmovalconspub");

        let mut errors = ValidationErrors::new();
        config.validate("bech32Config", &mut errors);
        assert!(errors.is_empty());
    }

    #[assay]
    fn bech32_config_rejects_invalid_prefixes() {
        let mut config = Bech32Config::from_account_prefix("cosmos");
        config.bech32_prefix_val_pub = "cosmos valoper pub".to_string();
        config.bech32_prefix_cons_addr = String::new();

        let mut errors = ValidationErrors::new();
        config.validate("bech32Config", &mut errors);

        assert_eq!(errors.len(), 2);
        assert!(errors.contains("bech32Config.bech32PrefixValPub"));
        assert!(errors.contains("bech32Config.bech32PrefixConsAddr"));
    }

    #[assay]
    fn bip44_derivation_path() {
        let path = Bip44::new(118).derivation_path(3).unwrap();
        assert_eq!(path.to_string(), "m/44'/118'/0'/0/3");

        let mut errors = ValidationErrors::new();
        Bip44::new(u32::MAX).validate("bip44", &mut errors);
        assert!(errors.contains("bip44"));
    }

    #[assay]
    fn bip44_ignores_foreign_keys() {
        let bip44: Bip44 =
            serde_json::from_str(r#"{"coinType":529,"purpose":44,"extra":"yes"}"#).unwrap();
        assert_eq!(bip44, Bip44::new(529));

        let bip44: Bip44 =
            serde_json::from_str(r#"{"coinType":118,"account":"0","change":-1}"#).unwrap();
        assert_eq!(bip44, Bip44::new(118));

        let bip44: Bip44 = serde_json::from_str(r#"{"coinType":118,"account":5}"#).unwrap();
        assert_eq!(bip44.account, 0);
    }

    #[assay]
    fn gas_price_step_defaults_and_tiers() {
        let step = GasPriceStep::default();

        assert_eq!(step.price(FeeTier::Low), 0.01);
        assert_eq!(step.price(FeeTier::Average), 0.025);
        assert_eq!(step.price(FeeTier::High), 0.04);
    }

    #[assay]
    fn features_use_lowercase_names() {
        let features: Vec<ChainFeature> =
            serde_json::from_str(r#"["stargate","secretwasm"]"#).unwrap();
        assert_eq!(
            features,
            vec![ChainFeature::Stargate, ChainFeature::Secretwasm]
        );
        assert_eq!(ChainFeature::Cosmwasm.to_string(), "cosmwasm");
        assert!(serde_json::from_str::<Vec<ChainFeature>>(r#"["evm"]"#).is_err());
    }
}
