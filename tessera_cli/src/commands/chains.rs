//! `chains` subcommands: validate chain suggestions and manage the local chain store.
mod delete;
mod list;
mod set_default;
mod show;
mod show_default;
mod suggest;
mod validate;

use crate::config::TesseraCliConfig;
use abscissa_core::{config, Command, FrameworkError, Runnable};
use clap::Parser;

use self::{
    delete::DeleteCmd, list::ListCmd, set_default::SetDefaultCmd, show::ShowCmd,
    show_default::ShowDefaultCmd, suggest::SuggestCmd, validate::ValidateCmd,
};

/// `chains` subcommand
#[derive(Command, Debug, Parser, Runnable)]
pub enum ChainsCmd {
    /// Validate a chain suggestion and print it normalized
    Validate(ValidateCmd),
    /// Validate a chain suggestion and add it to the store
    Suggest(SuggestCmd),
    /// List every known chain
    List(ListCmd),
    /// Show one chain
    Show(ShowCmd),
    /// Remove a suggested chain
    Delete(DeleteCmd),
    /// Set the default chain
    SetDefault(SetDefaultCmd),
    /// Show the default chain
    ShowDefault(ShowDefaultCmd),
}

impl config::Override<TesseraCliConfig> for ChainsCmd {
    // Process the given command line options, overriding settings from
    // a configuration file using explicit flags taken from command-line
    // arguments.
    fn override_config(
        &self,
        config: TesseraCliConfig,
    ) -> Result<TesseraCliConfig, FrameworkError> {
        Ok(config)
    }
}
