//! TesseraCli Subcommands

mod chains;
mod fee;

use self::{chains::ChainsCmd, fee::FeeCmd};
use crate::{
    config::TesseraCliConfig,
    error::{Error, ErrorKind},
};
use abscissa_core::{config::Override, Command, Configurable, FrameworkError, Runnable};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// TesseraCli Subcommands
/// Subcommands need to be listed in an enum.
#[derive(Command, Debug, Parser, Runnable)]
pub enum TesseraCliCmd {
    /// command for managing chains
    #[clap(subcommand)]
    Chains(ChainsCmd),

    /// command for computing and reviewing transaction fees
    #[clap(subcommand)]
    Fee(FeeCmd),
}

/// Entry point for the application. It needs to be a struct to allow using subcommands!
#[derive(Command, Debug, Parser)]
#[clap(author, about, version)]
pub struct EntryPoint {
    #[clap(subcommand)]
    cmd: TesseraCliCmd,

    /// Enable verbose logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Use the specified config file
    #[clap(short, long)]
    pub config: Option<String>,
}

impl Runnable for EntryPoint {
    fn run(&self) {
        self.cmd.run()
    }
}

/// This trait allows you to define how application configuration is loaded.
impl Configurable<TesseraCliConfig> for EntryPoint {
    /// Location of the configuration file
    fn config_path(&self) -> Option<PathBuf> {
        // abscissa loads config before any command runs, so the default file has to exist
        // by the time this returns.
        let path = match &self.config {
            Some(path) => PathBuf::from(path),
            None => crate::config::init().ok()?,
        };
        crate::config::set_loaded_path(&path);

        Some(path)
    }

    /// Apply changes to the config after it's been loaded, e.g. overriding
    /// values in a config file using command-line options.
    fn process_config(&self, config: TesseraCliConfig) -> Result<TesseraCliConfig, FrameworkError> {
        match &self.cmd {
            TesseraCliCmd::Chains(cmd) => cmd.override_config(config),
            TesseraCliCmd::Fee(cmd) => cmd.override_config(config),
        }
    }
}

/// Renders `value` as JSON with 4-space indentation.
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, Error> {
    let buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(buf, formatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(serializer.into_inner()).map_err(|e| ErrorKind::Io.context(e).into())
}
