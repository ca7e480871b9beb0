//! The boundary between the fee page and whatever holds pending transaction requests.
use crate::{error::TxRequestError, tx::config::TxBuilderConfig};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};
use tokio::sync::{mpsc, oneshot};

/// Access to pending transaction requests, keyed by request id.
///
/// Approving and rejecting are synchronous so a request can still be rejected while the page
/// holding it is being dropped.
#[async_trait]
pub trait TxConfigBackend: Send + Sync {
    /// Fetches a pending request: the chain id it targets and its config.
    async fn load(&self, id: &str) -> Result<(String, TxBuilderConfig), TxRequestError>;
    fn approve(&self, id: &str, config: TxBuilderConfig) -> Result<(), TxRequestError>;
    fn reject(&self, id: &str) -> Result<(), TxRequestError>;
}

/// Messages sent by [`ChannelBackend`].
#[derive(Debug)]
pub enum TxConfigMessage {
    Load {
        id: String,
        reply: oneshot::Sender<Option<(String, TxBuilderConfig)>>,
    },
    Approve {
        id: String,
        config: TxBuilderConfig,
    },
    Reject {
        id: String,
    },
}

/// Backend forwarding every operation as a [`TxConfigMessage`] to a receiver owned by the
/// request holder.
#[derive(Clone, Debug)]
pub struct ChannelBackend {
    sender: mpsc::UnboundedSender<TxConfigMessage>,
}

impl ChannelBackend {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TxConfigMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();

        (ChannelBackend { sender }, receiver)
    }

    fn send(&self, message: TxConfigMessage) -> Result<(), TxRequestError> {
        self.sender
            .send(message)
            .map_err(|_| TxRequestError::ChannelClosed)
    }
}

#[async_trait]
impl TxConfigBackend for ChannelBackend {
    async fn load(&self, id: &str) -> Result<(String, TxBuilderConfig), TxRequestError> {
        let (reply, response) = oneshot::channel();
        self.send(TxConfigMessage::Load {
            id: id.to_string(),
            reply,
        })?;

        response
            .await
            .map_err(|_| TxRequestError::ChannelClosed)?
            .ok_or_else(|| TxRequestError::UnknownRequest(id.to_string()))
    }

    fn approve(&self, id: &str, config: TxBuilderConfig) -> Result<(), TxRequestError> {
        self.send(TxConfigMessage::Approve {
            id: id.to_string(),
            config,
        })
    }

    fn reject(&self, id: &str) -> Result<(), TxRequestError> {
        self.send(TxConfigMessage::Reject { id: id.to_string() })
    }
}

/// In memory backend. Requests are inserted up front; approvals and rejections are recorded
/// for inspection.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: Mutex<MemoryBackendState>,
}

#[derive(Debug, Default)]
struct MemoryBackendState {
    pending: HashMap<String, (String, TxBuilderConfig)>,
    approved: Vec<(String, TxBuilderConfig)>,
    rejected: Vec<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryBackendState> {
        // the state stays consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn insert(&self, id: &str, chain_id: &str, config: TxBuilderConfig) {
        self.state()
            .pending
            .insert(id.to_string(), (chain_id.to_string(), config));
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.state().pending.contains_key(id)
    }

    /// Approved requests with the config they were approved with, in order.
    pub fn approved(&self) -> Vec<(String, TxBuilderConfig)> {
        self.state().approved.clone()
    }

    /// Ids of rejected requests, in order.
    pub fn rejected(&self) -> Vec<String> {
        self.state().rejected.clone()
    }

    fn resolve(&self, id: &str) -> Result<MutexGuard<'_, MemoryBackendState>, TxRequestError> {
        let mut state = self.state();
        if state.pending.remove(id).is_some() {
            return Ok(state);
        }
        if state.approved.iter().any(|(a, _)| a == id) || state.rejected.iter().any(|r| r == id) {
            return Err(TxRequestError::AlreadyResolved(id.to_string()));
        }

        Err(TxRequestError::UnknownRequest(id.to_string()))
    }
}

#[async_trait]
impl TxConfigBackend for MemoryBackend {
    async fn load(&self, id: &str) -> Result<(String, TxBuilderConfig), TxRequestError> {
        self.state()
            .pending
            .get(id)
            .cloned()
            .ok_or_else(|| TxRequestError::UnknownRequest(id.to_string()))
    }

    fn approve(&self, id: &str, config: TxBuilderConfig) -> Result<(), TxRequestError> {
        let mut state = self.resolve(id)?;
        state.approved.push((id.to_string(), config));

        Ok(())
    }

    fn reject(&self, id: &str) -> Result<(), TxRequestError> {
        let mut state = self.resolve(id)?;
        state.rejected.push(id.to_string());

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Pending,
    Approved,
    Rejected,
}

/// Tracks one transaction request from loading to its resolution. A request resolves at most
/// once: after approval or rejection further attempts are refused or ignored.
#[derive(Debug)]
pub struct TxBuilderHandle {
    id: String,
    chain_id: Option<String>,
    config: Option<TxBuilderConfig>,
    requested: bool,
    resolution: Resolution,
}

impl TxBuilderHandle {
    pub fn new(id: &str) -> Self {
        TxBuilderHandle {
            id: id.to_string(),
            chain_id: None,
            config: None,
            requested: false,
            resolution: Resolution::Pending,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn chain_id(&self) -> Option<&str> {
        self.chain_id.as_deref()
    }

    pub fn config(&self) -> Option<&TxBuilderConfig> {
        self.config.as_ref()
    }

    /// True until the config has been loaded.
    pub fn initializing(&self) -> bool {
        self.config.is_none()
    }

    /// True once an approval has been sent.
    pub fn requested(&self) -> bool {
        self.requested
    }

    pub fn loading(&self) -> bool {
        self.initializing() || self.requested
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn is_pending(&self) -> bool {
        self.resolution == Resolution::Pending
    }

    pub async fn load(
        &mut self,
        backend: &dyn TxConfigBackend,
    ) -> Result<(String, TxBuilderConfig), TxRequestError> {
        let (chain_id, config) = backend.load(&self.id).await?;
        self.chain_id = Some(chain_id.clone());
        self.config = Some(config.clone());

        Ok((chain_id, config))
    }

    /// Sends `config` as the approved version of the request. The handle stays pending when the
    /// backend refuses the approval.
    pub fn approve(
        &mut self,
        backend: &dyn TxConfigBackend,
        config: TxBuilderConfig,
    ) -> Result<(), TxRequestError> {
        if !self.is_pending() {
            return Err(TxRequestError::AlreadyResolved(self.id.clone()));
        }
        backend.approve(&self.id, config.clone())?;
        self.requested = true;
        self.resolution = Resolution::Approved;
        self.config = Some(config);

        Ok(())
    }

    /// Rejects the request if it is still pending. Returns whether a rejection was sent; a
    /// failed rejection leaves the request pending.
    pub fn reject(&mut self, backend: &dyn TxConfigBackend) -> Result<bool, TxRequestError> {
        if !self.is_pending() {
            return Ok(false);
        }
        backend.reject(&self.id)?;
        self.resolution = Resolution::Rejected;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::config::Coin;
    use assay::assay;

    fn config() -> TxBuilderConfig {
        TxBuilderConfig {
            gas: 80_000,
            fee: vec![Coin::new(2000, "uatom")],
            memo: "hello".to_string(),
        }
    }

    #[assay]
    async fn handle_resolves_once() {
        let backend = MemoryBackend::new();
        backend.insert("1", "cosmoshub-4", config());

        let mut handle = TxBuilderHandle::new("1");
        assert!(handle.initializing());
        assert!(handle.loading());

        let (chain_id, loaded) = handle.load(&backend).await.unwrap();
        assert_eq!(chain_id, "cosmoshub-4");
        assert_eq!(loaded, config());
        assert!(!handle.loading());

        handle.approve(&backend, loaded).unwrap();
        assert!(handle.requested());
        assert_eq!(handle.resolution(), Resolution::Approved);

        assert!(!handle.reject(&backend).unwrap());
        assert!(matches!(
            handle.approve(&backend, config()),
            Err(TxRequestError::AlreadyResolved(_))
        ));
        assert_eq!(backend.approved().len(), 1);
        assert!(backend.rejected().is_empty());
    }

    #[assay]
    async fn failed_resolution_keeps_handle_pending() {
        let backend = MemoryBackend::new();
        backend.insert("1", "cosmoshub-4", config());
        let (closed, receiver) = ChannelBackend::new();
        drop(receiver);

        let mut handle = TxBuilderHandle::new("1");
        let (_, loaded) = handle.load(&backend).await.unwrap();

        assert!(matches!(
            handle.approve(&closed, loaded.clone()),
            Err(TxRequestError::ChannelClosed)
        ));
        assert!(handle.is_pending());
        assert!(!handle.requested());
        assert!(handle.reject(&closed).is_err());
        assert!(handle.is_pending());

        handle.approve(&backend, loaded).unwrap();
        assert_eq!(handle.resolution(), Resolution::Approved);
        assert_eq!(backend.approved().len(), 1);
    }

    #[assay]
    async fn memory_backend_refuses_double_resolution() {
        let backend = MemoryBackend::new();
        backend.insert("7", "cosmoshub-4", config());

        backend.reject("7").unwrap();
        assert!(!backend.is_pending("7"));
        assert!(matches!(
            backend.reject("7"),
            Err(TxRequestError::AlreadyResolved(_))
        ));
        assert!(matches!(
            backend.load("8").await,
            Err(TxRequestError::UnknownRequest(_))
        ));
    }

    #[assay]
    async fn channel_backend_forwards_messages() {
        let (backend, mut receiver) = ChannelBackend::new();

        let responder = tokio::spawn(async move {
            let mut events = Vec::new();
            while let Some(message) = receiver.recv().await {
                match message {
                    TxConfigMessage::Load { id, reply } => {
                        let response = if id == "42" {
                            Some(("osmosis-1".to_string(), config()))
                        } else {
                            None
                        };
                        let _ = reply.send(response);
                    }
                    TxConfigMessage::Approve { id, .. } => events.push(format!("approve {}", id)),
                    TxConfigMessage::Reject { id } => events.push(format!("reject {}", id)),
                }
            }
            events
        });

        let (chain_id, _) = backend.load("42").await.unwrap();
        assert_eq!(chain_id, "osmosis-1");
        assert!(matches!(
            backend.load("43").await,
            Err(TxRequestError::UnknownRequest(_))
        ));
        backend.approve("42", config()).unwrap();
        backend.reject("43").unwrap();
        drop(backend);

        let events = responder.await.unwrap();
        assert_eq!(events, vec!["approve 42", "reject 43"]);
    }
}
