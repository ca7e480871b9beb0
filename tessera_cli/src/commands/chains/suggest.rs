use crate::prelude::*;
use abscissa_core::{Command, Runnable};
use clap::Parser;
use std::{fs, path::PathBuf};

/// Adds a chain suggestion to the store on behalf of an origin, which is granted access to it.
#[derive(Command, Debug, Parser)]
pub struct SuggestCmd {
    /// JSON file holding the suggested chain info
    path: PathBuf,

    /// Origin of the site suggesting the chain
    #[clap(short, long)]
    origin: String,
}

impl Runnable for SuggestCmd {
    fn run(&self) {
        let content = fs::read_to_string(&self.path).unwrap_or_else(|err| {
            status_err!("Can't read {}: {}", self.path.display(), err);
            std::process::exit(1);
        });

        let mut store = APP.config().open_store().unwrap_or_else(|err| {
            status_err!("Can't open chain store: {}", err);
            std::process::exit(1);
        });

        match store.suggest_chain(&content, &self.origin) {
            Ok(info) => status_ok!("Added", "chain {}", info.chain_id),
            Err(err) => {
                status_err!("Can't add chain: {}", err);
                std::process::exit(1);
            }
        }
    }
}
