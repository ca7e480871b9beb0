use crate::{commands::to_pretty_json, prelude::*};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct ShowCmd {
    /// Id of the chain to show
    pub chain_id: String,
}

impl Runnable for ShowCmd {
    /// Print the chain info as JSON
    fn run(&self) {
        let store = APP.config().open_store().unwrap_or_else(|err| {
            status_err!("Can't open chain store: {}", err);
            std::process::exit(1);
        });

        let info = store.chain_info(&self.chain_id).unwrap_or_else(|| {
            status_err!("Can't find chain {}, suggest it first", self.chain_id);
            std::process::exit(1);
        });

        match to_pretty_json(info) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                status_err!("Can't convert chain info to JSON: {}", err);
                std::process::exit(1);
            }
        }
    }
}
