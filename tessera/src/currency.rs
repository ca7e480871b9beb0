//! Currency models shared by chain configuration and fee handling.
//!
//! A chain lists native currencies and contract-backed tokens. Contract-backed tokens are
//! identified on the wire by a `type` tag and carry their contract address in the minimal
//! denomination, e.g. `cw20:juno1abc...:ujunox`.
use crate::error::ValidationErrors;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CW20_TYPE: &str = "cw20";
pub const SECRET20_TYPE: &str = "secret20";

/// Largest number of decimals a currency may declare.
pub const MAX_COIN_DECIMALS: u8 = 18;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Currency {
    pub coin_denom: String,
    pub coin_minimal_denom: String,
    pub coin_decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_gecko_id: Option<String>,
}

impl Currency {
    pub fn new(coin_denom: &str, coin_minimal_denom: &str, coin_decimals: u8) -> Self {
        Currency {
            coin_denom: coin_denom.to_string(),
            coin_minimal_denom: coin_minimal_denom.to_string(),
            coin_decimals,
            coin_gecko_id: None,
        }
    }

    pub(crate) fn validate(&self, path: &str, errors: &mut ValidationErrors) {
        if self.coin_denom.is_empty() {
            errors.push(format!("{}.coinDenom", path), "is not allowed to be empty");
        }
        if self.coin_minimal_denom.is_empty() {
            errors.push(
                format!("{}.coinMinimalDenom", path),
                "is not allowed to be empty",
            );
        }
        if self.coin_decimals > MAX_COIN_DECIMALS {
            errors.push(
                format!("{}.coinDecimals", path),
                format!("must be less than or equal to {}", MAX_COIN_DECIMALS),
            );
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cw20Currency {
    pub currency: Currency,
    pub contract_address: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Secret20Currency {
    pub currency: Currency,
    pub contract_address: String,
    pub viewing_key: String,
}

/// Any currency a chain can list: native, or backed by a token contract.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawCurrency", into = "RawCurrency")]
pub enum AppCurrency {
    Native(Currency),
    Cw20(Cw20Currency),
    Secret20(Secret20Currency),
}

impl AppCurrency {
    pub fn currency(&self) -> &Currency {
        match self {
            AppCurrency::Native(c) => c,
            AppCurrency::Cw20(c) => &c.currency,
            AppCurrency::Secret20(c) => &c.currency,
        }
    }

    /// The wire `type` tag, `None` for native currencies.
    pub fn type_tag(&self) -> Option<&'static str> {
        match self {
            AppCurrency::Native(_) => None,
            AppCurrency::Cw20(_) => Some(CW20_TYPE),
            AppCurrency::Secret20(_) => Some(SECRET20_TYPE),
        }
    }

    pub fn contract_address(&self) -> Option<&str> {
        match self {
            AppCurrency::Native(_) => None,
            AppCurrency::Cw20(c) => Some(&c.contract_address),
            AppCurrency::Secret20(c) => Some(&c.contract_address),
        }
    }

    /// The `{type}:{contractAddress}:` prefix contract-backed denominations must carry.
    pub fn denom_prefix(&self) -> Option<String> {
        match (self.type_tag(), self.contract_address()) {
            (Some(tag), Some(address)) => Some(denom_prefix(tag, address)),
            _ => None,
        }
    }

    /// Prefixes the minimal denomination of a contract-backed currency with
    /// `{type}:{contractAddress}:` unless it already starts with it.
    pub fn normalize(&mut self) {
        let prefix = match self.denom_prefix() {
            Some(prefix) => prefix,
            None => return,
        };
        let currency = match self {
            AppCurrency::Native(_) => return,
            AppCurrency::Cw20(c) => &mut c.currency,
            AppCurrency::Secret20(c) => &mut c.currency,
        };

        if !currency.coin_minimal_denom.starts_with(&prefix) {
            debug!(
                "prefixing minimal denom {} with {}",
                currency.coin_minimal_denom, prefix
            );
            currency.coin_minimal_denom = prefix + &currency.coin_minimal_denom;
        }
    }

    pub(crate) fn validate(&self, path: &str, errors: &mut ValidationErrors) {
        self.currency().validate(path, errors);

        match self {
            AppCurrency::Native(_) => {}
            AppCurrency::Cw20(c) => {
                if c.contract_address.is_empty() {
                    errors.push(
                        format!("{}.contractAddress", path),
                        "is not allowed to be empty",
                    );
                }
            }
            AppCurrency::Secret20(c) => {
                if c.contract_address.is_empty() {
                    errors.push(
                        format!("{}.contractAddress", path),
                        "is not allowed to be empty",
                    );
                }
                if c.viewing_key.is_empty() {
                    errors.push(format!("{}.viewingKey", path), "is not allowed to be empty");
                }
            }
        }
    }
}

impl From<Currency> for AppCurrency {
    fn from(currency: Currency) -> Self {
        AppCurrency::Native(currency)
    }
}

pub fn denom_prefix(type_tag: &str, contract_address: &str) -> String {
    format!("{}:{}:", type_tag, contract_address)
}

// Wire form of every currency variant. Deserializing through this keeps unknown keys
// rejected while letting the `type` tag pick the variant.
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawCurrency {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    coin_denom: String,
    coin_minimal_denom: String,
    coin_decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coin_gecko_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    viewing_key: Option<String>,
}

impl TryFrom<RawCurrency> for AppCurrency {
    type Error = String;

    fn try_from(raw: RawCurrency) -> Result<Self, Self::Error> {
        let currency = Currency {
            coin_denom: raw.coin_denom,
            coin_minimal_denom: raw.coin_minimal_denom,
            coin_decimals: raw.coin_decimals,
            coin_gecko_id: raw.coin_gecko_id,
        };

        match raw.kind.as_deref() {
            None => {
                if raw.contract_address.is_some() {
                    return Err("\"contractAddress\" is not allowed without \"type\"".to_string());
                }
                if raw.viewing_key.is_some() {
                    return Err("\"viewingKey\" is not allowed without \"type\"".to_string());
                }
                Ok(AppCurrency::Native(currency))
            }
            Some(CW20_TYPE) => {
                if raw.viewing_key.is_some() {
                    return Err("\"viewingKey\" is not allowed for cw20 currencies".to_string());
                }
                let contract_address = raw
                    .contract_address
                    .ok_or_else(|| "cw20 currency requires \"contractAddress\"".to_string())?;
                Ok(AppCurrency::Cw20(Cw20Currency {
                    currency,
                    contract_address,
                }))
            }
            Some(SECRET20_TYPE) => {
                let contract_address = raw
                    .contract_address
                    .ok_or_else(|| "secret20 currency requires \"contractAddress\"".to_string())?;
                let viewing_key = raw
                    .viewing_key
                    .ok_or_else(|| "secret20 currency requires \"viewingKey\"".to_string())?;
                Ok(AppCurrency::Secret20(Secret20Currency {
                    currency,
                    contract_address,
                    viewing_key,
                }))
            }
            Some(other) => Err(format!(
                "unknown currency type \"{}\", expected one of \"{}\", \"{}\"",
                other, CW20_TYPE, SECRET20_TYPE
            )),
        }
    }
}

impl From<AppCurrency> for RawCurrency {
    fn from(currency: AppCurrency) -> Self {
        let (kind, currency, contract_address, viewing_key) = match currency {
            AppCurrency::Native(c) => (None, c, None, None),
            AppCurrency::Cw20(c) => (
                Some(CW20_TYPE.to_string()),
                c.currency,
                Some(c.contract_address),
                None,
            ),
            AppCurrency::Secret20(c) => (
                Some(SECRET20_TYPE.to_string()),
                c.currency,
                Some(c.contract_address),
                Some(c.viewing_key),
            ),
        };

        RawCurrency {
            kind,
            coin_denom: currency.coin_denom,
            coin_minimal_denom: currency.coin_minimal_denom,
            coin_decimals: currency.coin_decimals,
            coin_gecko_id: currency.coin_gecko_id,
            contract_address,
            viewing_key,
        }
    }
}
