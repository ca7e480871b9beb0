use crate::{commands::to_pretty_json, prelude::*};
use abscissa_core::{Command, Runnable};
use clap::Parser;
use std::{fs, path::PathBuf};
use tessera::chain::parse_suggesting_chain_info;

/// Validates a chain suggestion without storing it.
#[derive(Command, Debug, Parser)]
pub struct ValidateCmd {
    /// JSON file holding the suggested chain info
    path: PathBuf,
}

impl Runnable for ValidateCmd {
    fn run(&self) {
        let content = fs::read_to_string(&self.path).unwrap_or_else(|err| {
            status_err!("Can't read {}: {}", self.path.display(), err);
            std::process::exit(1);
        });

        let info = parse_suggesting_chain_info(&content).unwrap_or_else(|err| {
            status_err!("Invalid chain info: {}", err);
            std::process::exit(1);
        });

        match to_pretty_json(&info) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                status_err!("Can't convert chain info to JSON: {}", err);
                std::process::exit(1);
            }
        }
    }
}
