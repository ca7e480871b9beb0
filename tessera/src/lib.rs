//! Wallet-side handling of Cosmos SDK chain suggestions and transaction fee configuration.
//!
//! * [`chain`] validates chain information suggested by sites and keeps the wallet's set of
//!   known chains.
//! * [`tx`] holds the fee page controller that lets a user adjust gas, memo and fee of a
//!   pending transaction before approving it.
pub use error::{ChainInfoError, ChainStoreError, FeePageError};

pub mod chain;
pub mod currency;
pub mod error;
pub mod tx;
mod utils;
