#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tessera::{
    error::TxRequestError,
    tx::{Coin, HostWindow, MemoryBackend, TxBuilderConfig, TxConfigBackend},
};

pub fn suggestion(chain_id: &str, prefix: &str) -> Value {
    json!({
        "rpc": format!("https://rpc.{}.example", prefix),
        "rest": format!("https://lcd.{}.example", prefix),
        "chainId": chain_id,
        "chainName": chain_id,
        "stakeCurrency": {
            "coinDenom": prefix.to_uppercase(),
            "coinMinimalDenom": format!("u{}", prefix),
            "coinDecimals": 6
        },
        "bip44": { "coinType": 118 },
        "bech32Config": {
            "bech32PrefixAccAddr": prefix,
            "bech32PrefixAccPub": format!("{}pub", prefix),
            "bech32PrefixValAddr": format!("{}valoper", prefix),
            "bech32PrefixValPub": format!("{}valoperpub", prefix),
            "bech32PrefixConsAddr": format!("{}valcons", prefix),
            "bech32PrefixConsPub": format!("{}valconspub", prefix)
        },
        "currencies": [{
            "coinDenom": prefix.to_uppercase(),
            "coinMinimalDenom": format!("u{}", prefix),
            "coinDecimals": 6
        }],
        "feeCurrencies": [{
            "coinDenom": prefix.to_uppercase(),
            "coinMinimalDenom": format!("u{}", prefix),
            "coinDecimals": 6
        }]
    })
}

pub fn tx_config() -> TxBuilderConfig {
    TxBuilderConfig {
        gas: 200_000,
        fee: vec![Coin::new(1, "uatom")],
        memo: "from the dapp".to_string(),
    }
}

/// Host window recording the side effects requested of it.
#[derive(Clone, Default)]
pub struct RecordingWindow {
    pub calls: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingWindow {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl HostWindow for RecordingWindow {
    fn fit_window(&self) {
        self.calls.lock().unwrap().push("fit_window");
    }

    fn disable_scroll(&self) {
        self.calls.lock().unwrap().push("disable_scroll");
    }

    fn enable_scroll(&self) {
        self.calls.lock().unwrap().push("enable_scroll");
    }
}

/// Backend refusing the first `failures` approvals as if the request holder had gone away.
pub struct FlakyBackend {
    pub inner: Arc<MemoryBackend>,
    failures: AtomicUsize,
}

impl FlakyBackend {
    pub fn new(inner: Arc<MemoryBackend>, failures: usize) -> Self {
        FlakyBackend {
            inner,
            failures: AtomicUsize::new(failures),
        }
    }
}

#[async_trait]
impl TxConfigBackend for FlakyBackend {
    async fn load(&self, id: &str) -> Result<(String, TxBuilderConfig), TxRequestError> {
        self.inner.load(id).await
    }

    fn approve(&self, id: &str, config: TxBuilderConfig) -> Result<(), TxRequestError> {
        let refused = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refused {
            return Err(TxRequestError::ChannelClosed);
        }

        self.inner.approve(id, config)
    }

    fn reject(&self, id: &str) -> Result<(), TxRequestError> {
        self.inner.reject(id)
    }
}
