//! `fee` subcommands
mod quote;
mod review;

use crate::config::TesseraCliConfig;
use abscissa_core::{config, Command, FrameworkError, Runnable};
use clap::Parser;

use self::{quote::QuoteCmd, review::ReviewCmd};

/// `fee` subcommand
#[derive(Command, Debug, Parser, Runnable)]
pub enum FeeCmd {
    /// Fee of a gas amount at each gas price tier of a chain
    Quote(QuoteCmd),
    /// Review a pending transaction request and approve it
    Review(ReviewCmd),
}

impl config::Override<TesseraCliConfig> for FeeCmd {
    fn override_config(
        &self,
        config: TesseraCliConfig,
    ) -> Result<TesseraCliConfig, FrameworkError> {
        Ok(config)
    }
}
