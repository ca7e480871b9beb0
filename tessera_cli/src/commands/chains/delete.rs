use crate::prelude::*;
use abscissa_core::{Command, Runnable};
use clap::Parser;

/// Removes a suggested chain together with its access grants. Embedded chains cannot be
/// removed.
#[derive(Command, Debug, Parser)]
pub struct DeleteCmd {
    chain_id: String,
}

impl Runnable for DeleteCmd {
    fn run(&self) {
        let config = APP.config();
        let mut store = config.open_store().unwrap_or_else(|err| {
            status_err!("Can't open chain store: {}", err);
            std::process::exit(1);
        });

        if let Err(err) = store.remove_chain(&self.chain_id) {
            status_err!("Can't delete chain: {}", err);
            std::process::exit(1);
        }

        // the default falls back to the store's chain when it pointed at the removed one
        if config.default_chain == self.chain_id {
            let mut updated = (*config).clone();
            updated.default_chain = store.current_chain_id().to_string();
            if let Err(err) = updated.save() {
                status_err!("Can't update default chain: {}", err);
                std::process::exit(1);
            }
        }

        status_ok!("Deleted", "chain {}", self.chain_id);
    }
}
