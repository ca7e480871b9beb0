use std::fmt;
use thiserror::Error;

// Higher level errors: ChainStoreError, FeePageError
#[derive(Debug, Error)]
pub enum ChainStoreError {
    #[error("{0}")]
    ChainInfo(#[from] ChainInfoError),
    #[error("chain '{0}' is embedded and cannot be replaced or removed")]
    EmbeddedChain(String),
    #[error("unknown chain id: {0}")]
    UnknownChain(String),
    #[error("invalid origin: {0}")]
    InvalidOrigin(String),
    #[error("error processing file: {0}")]
    FileIO(String),
    #[error("error parsing toml: {0}")]
    Toml(String),
}

#[derive(Debug, Error)]
pub enum FeePageError {
    #[error("tx builder is not loaded")]
    TxBuilderNotLoaded,
    #[error("config is not loaded")]
    ConfigNotLoaded,
    #[error("{0}")]
    ChainStore(#[from] ChainStoreError),
    #[error("error during tx request: {0}")]
    Request(#[from] TxRequestError),
    #[error("{0}")]
    Fee(#[from] FeeError),
}

// Lower level errors; should be used by higher level errors
#[derive(Debug, Error)]
pub enum ChainInfoError {
    #[error("malformed chain info: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid chain info: {0}")]
    Validation(#[from] ValidationErrors),
}

/// A single field level violation. `path` is the JSON path of the offending value,
/// e.g. `currencies[1].coinDecimals`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("\"{path}\" {message}")]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

/// Every violation found while validating a value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(ValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns true if any violation was recorded for `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|e| e.path == path)
    }

    /// Converts the collected violations into a result, yielding `value` when there are none.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Error)]
pub enum FeeError {
    #[error("invalid coin: {0}")]
    InvalidCoin(String),
    #[error("no fee currency available")]
    NoFeeCurrency,
    #[error("invalid gas price: {0}")]
    InvalidGasPrice(f64),
    #[error("fee overflows for gas {0}")]
    Overflow(u64),
    #[error("error converting types: {0}")]
    TypeConversion(#[from] eyre::Report),
}

#[derive(Debug, Error)]
pub enum TxRequestError {
    #[error("unknown tx request: {0}")]
    UnknownRequest(String),
    #[error("tx request '{0}' was already resolved")]
    AlreadyResolved(String),
    #[error("tx request channel closed")]
    ChannelClosed,
}
