use crate::{commands::to_pretty_json, prelude::*};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct ShowDefaultCmd {}

impl Runnable for ShowDefaultCmd {
    fn run(&self) {
        let config = APP.config();
        let store = config.open_store().unwrap_or_else(|err| {
            status_err!("Can't open chain store: {}", err);
            std::process::exit(1);
        });

        let info = store.chain_info(&config.default_chain).unwrap_or_else(|| {
            status_err!(
                "Default chain {} is not in the chain store",
                config.default_chain
            );
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
