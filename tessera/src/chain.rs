pub use self::{
    info::{
        AccessOrigin, Bech32Config, Bip44, ChainFeature, ChainInfo, ChainInfoWithEmbed,
        EndpointConfig, GasPriceStep, SuggestedChainInfo,
    },
    schema::{parse_suggesting_chain_info, SuggestingChainInfo},
    store::ChainStore,
};

pub mod embed;
pub mod info;
pub mod schema;
pub mod store;
