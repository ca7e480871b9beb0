//! Chains compiled into the wallet. These are always available and cannot be replaced by
//! suggestions.
use crate::{
    chain::info::{Bech32Config, Bip44, ChainFeature, ChainInfo, GasPriceStep},
    currency::{AppCurrency, Currency},
};

pub const COSMOSHUB_CHAIN_ID: &str = "cosmoshub-4";
pub const OSMOSIS_CHAIN_ID: &str = "osmosis-1";

pub fn embedded_chain_infos() -> Vec<ChainInfo> {
    vec![cosmoshub(), osmosis()]
}

pub fn is_embedded(chain_id: &str) -> bool {
    chain_id == COSMOSHUB_CHAIN_ID || chain_id == OSMOSIS_CHAIN_ID
}

fn cosmoshub() -> ChainInfo {
    let mut atom = Currency::new("ATOM", "uatom", 6);
    atom.coin_gecko_id = Some("cosmos".to_string());

    ChainInfo {
        rpc: "https://rpc-cosmoshub.keplr.app".to_string(),
        rpc_config: None,
        rest: "https://lcd-cosmoshub.keplr.app".to_string(),
        rest_config: None,
        chain_id: COSMOSHUB_CHAIN_ID.to_string(),
        chain_name: "Cosmos Hub".to_string(),
        stake_currency: atom.clone(),
        wallet_url: Some("https://wallet.keplr.app/#/cosmoshub/stake".to_string()),
        wallet_url_for_staking: Some("https://wallet.keplr.app/#/cosmoshub/stake".to_string()),
        bip44: Bip44::new(118),
        alternative_bip44s: Vec::new(),
        bech32_config: Bech32Config::from_account_prefix("cosmos"),
        currencies: vec![AppCurrency::Native(atom.clone())],
        fee_currencies: vec![atom],
        coin_type: Some(118),
        gas_price_step: Some(GasPriceStep::default()),
        features: vec![ChainFeature::Stargate],
        beta: None,
    }
}

fn osmosis() -> ChainInfo {
    let mut osmo = Currency::new("OSMO", "uosmo", 6);
    osmo.coin_gecko_id = Some("osmosis".to_string());
    let mut ion = Currency::new("ION", "uion", 6);
    ion.coin_gecko_id = Some("ion".to_string());

    ChainInfo {
        rpc: "https://rpc-osmosis.keplr.app".to_string(),
        rpc_config: None,
        rest: "https://lcd-osmosis.keplr.app".to_string(),
        rest_config: None,
        chain_id: OSMOSIS_CHAIN_ID.to_string(),
        chain_name: "Osmosis".to_string(),
        stake_currency: osmo.clone(),
        wallet_url: Some("https://app.osmosis.zone".to_string()),
        wallet_url_for_staking: Some("https://wallet.keplr.app/#/osmosis/stake".to_string()),
        bip44: Bip44::new(118),
        alternative_bip44s: Vec::new(),
        bech32_config: Bech32Config::from_account_prefix("osmo"),
        currencies: vec![AppCurrency::Native(osmo.clone()), AppCurrency::Native(ion)],
        fee_currencies: vec![osmo],
        coin_type: Some(118),
        gas_price_step: Some(GasPriceStep {
            low: 0.0,
            average: 0.025,
            high: 0.04,
        }),
        features: vec![ChainFeature::Stargate],
        beta: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::schema::SuggestingChainInfo;
    use assay::assay;

    #[assay]
    fn embedded_chains_pass_validation() {
        for info in embedded_chain_infos() {
            assert!(is_embedded(&info.chain_id));
            let validated = SuggestingChainInfo::new(info.clone()).validate().unwrap();
            assert_eq!(validated, info);
        }
    }
}
