use crate::prelude::*;
use abscissa_core::{Command, Runnable};
use clap::Parser;

/// Lists every known chain, embedded chains first.
#[derive(Command, Debug, Parser)]
pub struct ListCmd {}

impl Runnable for ListCmd {
    fn run(&self) {
        let config = APP.config();
        let store = config.open_store().unwrap_or_else(|err| {
            status_err!("Can't open chain store: {}", err);
            std::process::exit(1);
        });

        for chain in store.chain_infos() {
            let info = &chain.chain_info;
            let mut line = format!("{}\t{}", info.chain_id, info.chain_name);
            if chain.embedded {
                line.push_str("\t(embedded)");
            } else if info.is_beta() {
                line.push_str("\t(beta)");
            }
            if info.chain_id == config.default_chain {
                line.push_str("\t*");
            }

            println!("{}", line);
        }
    }
}
