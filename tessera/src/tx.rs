pub use self::{
    config::{Coin, TxBuilderConfig},
    fee::FeeTier,
    fee_page::{FeePage, FeeRoute, HostWindow, NoopWindow},
    request::{ChannelBackend, MemoryBackend, TxBuilderHandle, TxConfigBackend, TxConfigMessage},
    state::{TxField, TxState},
};

pub mod config;
pub mod fee;
pub mod fee_page;
pub mod request;
pub mod state;
