use crate::{commands::to_pretty_json, prelude::*};
use abscissa_core::{Command, Runnable};
use clap::Parser;
use serde::Deserialize;
use std::{fs, path::PathBuf, sync::Arc};
use tessera::tx::{
    Coin, FeePage, FeeRoute, FeeTier, MemoryBackend, NoopWindow, TxBuilderConfig,
    TxConfigBackend, TxField,
};

/// A pending transaction request as read from disk.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct PendingRequest {
    id: String,
    chain_id: String,
    config: TxBuilderConfig,
}

/// Loads a pending request into the fee page, applies the given edits and approves it. The
/// approved config is printed as JSON.
#[derive(Command, Debug, Parser)]
pub struct ReviewCmd {
    /// JSON file holding `id`, `chainId` and `config` of the request
    path: PathBuf,

    /// Replace the gas limit
    #[clap(short, long)]
    gas: Option<u64>,

    /// Replace the memo
    #[clap(short, long)]
    memo: Option<String>,

    /// Fee tier to pay (low, average or high)
    #[clap(short, long, conflicts_with = "fee")]
    tier: Option<FeeTier>,

    /// Exact fee to pay, e.g. 5000uatom
    #[clap(short, long)]
    fee: Option<Coin>,
}

impl Runnable for ReviewCmd {
    fn run(&self) {
        let content = fs::read_to_string(&self.path).unwrap_or_else(|err| {
            status_err!("Can't read {}: {}", self.path.display(), err);
            std::process::exit(1);
        });
        let request: PendingRequest = serde_json::from_str(&content).unwrap_or_else(|err| {
            status_err!("Invalid tx request: {}", err);
            std::process::exit(1);
        });

        let mut store = APP.config().open_store().unwrap_or_else(|err| {
            status_err!("Can't open chain store: {}", err);
            std::process::exit(1);
        });

        let memory = Arc::new(MemoryBackend::new());
        memory.insert(&request.id, &request.chain_id, request.config);
        let backend: Arc<dyn TxConfigBackend> = memory.clone();

        abscissa_tokio::run(&APP, async {
            let mut page = FeePage::open(
                FeeRoute::new(&request.id, false),
                &mut store,
                backend,
                Box::new(NoopWindow),
            );
            page.init().await.unwrap_or_else(|err| {
                status_err!("Can't load tx request: {}", err);
                std::process::exit(1);
            });

            if let Some(gas) = self.gas {
                page.state_mut().set_gas(gas);
            }
            if let Some(memo) = &self.memo {
                page.state_mut().set_memo(memo);
            }
            if let Some(fee) = &self.fee {
                page.state_mut().set_fees(vec![fee.clone()]);
            }
            if let Some(tier) = self.tier {
                if let Err(err) = page.select_fee_tier(tier) {
                    status_err!("Can't select {} fee: {}", tier, err);
                    std::process::exit(1);
                }
            }

            if page.submit_disabled() {
                let mut fields = vec![TxField::Gas, TxField::Memo];
                if page.requires_fee() {
                    fields.push(TxField::Fees);
                }
                let errors: Vec<String> = fields
                    .into_iter()
                    .filter_map(|field| page.state().field_error(field))
                    .collect();
                status_err!("Can't approve tx request: {}", errors.join(", "));
                std::process::exit(1);
            }
            if let Err(err) = page.submit() {
                status_err!("Can't approve tx request: {}", err);
                std::process::exit(1);
            }
        })
        .unwrap_or_else(|e| {
            status_err!("executor exited with error: {}", e);
            std::process::exit(1);
        });

        let approved = memory.approved();
        let (_, config) = approved.first().unwrap_or_else(|| {
            status_err!("tx request {} was not approved", request.id);
            std::process::exit(1);
        });
        match to_pretty_json(config) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                status_err!("Can't convert tx config to JSON: {}", err);
                std::process::exit(1);
            }
        }
    }
}
