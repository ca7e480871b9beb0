use crate::prelude::*;
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct SetDefaultCmd {
    /// Id of a known chain
    chain_id: String,
}

impl Runnable for SetDefaultCmd {
    /// Make a known chain the default in both the store and the config file
    fn run(&self) {
        let config = APP.config();
        let mut store = config.open_store().unwrap_or_else(|err| {
            status_err!("Can't open chain store: {}", err);
            std::process::exit(1);
        });

        if let Err(err) = store.set_chain(&self.chain_id) {
            status_err!("Can't set default chain: {}", err);
            std::process::exit(1);
        }

        let mut updated = (*config).clone();
        updated.default_chain = self.chain_id.clone();
        if let Err(err) = updated.save() {
            status_err!("Can't write config: {}", err);
            std::process::exit(1);
        }

        status_ok!("Default", "chain set to {}", self.chain_id);
    }
}
