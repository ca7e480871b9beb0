use crate::prelude::*;
use abscissa_core::{Command, Runnable};
use clap::Parser;
use tessera::tx::{fee, FeeTier};

#[derive(Command, Debug, Parser)]
pub struct QuoteCmd {
    /// Chain to quote for
    chain_id: String,

    /// Gas limit of the transaction
    #[clap(short, long)]
    gas: u64,

    /// Only quote this tier (low, average or high)
    #[clap(short, long)]
    tier: Option<FeeTier>,
}

impl Runnable for QuoteCmd {
    fn run(&self) {
        let store = APP.config().open_store().unwrap_or_else(|err| {
            status_err!("Can't open chain store: {}", err);
            std::process::exit(1);
        });

        let info = store.chain_info(&self.chain_id).unwrap_or_else(|| {
            status_err!("Can't find chain {}, suggest it first", self.chain_id);
            std::process::exit(1);
        });
        let step = info.gas_price_step_or_default();

        let tiers = match self.tier {
            Some(tier) => vec![tier],
            None => FeeTier::ALL.to_vec(),
        };
        for tier in tiers {
            match fee::fee_for_tier(self.gas, &step, tier, &info.fee_currencies) {
                Ok(coin) => println!("{}: {}", tier, coin),
                Err(err) => {
                    status_err!("Can't compute {} fee: {}", tier, err);
                    std::process::exit(1);
                }
            }
        }
    }
}
