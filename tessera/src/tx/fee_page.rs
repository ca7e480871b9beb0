//! Controller for the page where a user reviews gas, memo and fee of a pending transaction
//! before approving it.
//!
//! The page mirrors the request's config into a [`TxState`], keeps the chain store pointed at
//! the request's chain and resolves the request exactly once: approved on a valid submission,
//! rejected when an externally opened page goes away while the request is still pending.
use crate::{
    chain::store::ChainStore,
    error::FeePageError,
    tx::{
        fee::FeeTier,
        request::{TxBuilderHandle, TxConfigBackend},
        state::{TxField, TxState},
    },
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

// Chains on the cyber network (euler-*) accept transactions without fees.
static FEE_EXEMPT_CHAIN_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(euler-)(\d)+").expect("fee exempt chain id pattern is valid"));

/// Returns false for chain ids that do not take a fee.
pub fn requires_fee(chain_id: &str) -> bool {
    !FEE_EXEMPT_CHAIN_ID.is_match(chain_id)
}

/// Side effects on the window hosting the page.
pub trait HostWindow {
    fn fit_window(&self);
    fn disable_scroll(&self);
    fn enable_scroll(&self);
}

/// Window that ignores every request, for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopWindow;

impl HostWindow for NoopWindow {
    fn fit_window(&self) {}
    fn disable_scroll(&self) {}
    fn enable_scroll(&self) {}
}

/// Route the page was opened with: the request id and whether the page was opened by a site
/// (external) rather than from inside the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeRoute {
    pub id: String,
    pub external: bool,
}

impl FeeRoute {
    pub fn new(id: &str, external: bool) -> Self {
        FeeRoute {
            id: id.to_string(),
            external,
        }
    }

    /// Parses routes of the form `/fee/{id}?external=true`. `external` is set when the key is
    /// present with any non-empty value, including `false` and `0`.
    pub fn parse(route: &str) -> Option<FeeRoute> {
        let base = Url::parse("popup://wallet/").ok()?;
        let url = base.join(route).ok()?;
        let id = url
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .last()?
            .to_string();
        let external = url
            .query_pairs()
            .find(|(key, _)| key == "external")
            .map(|(_, value)| !value.is_empty())
            .unwrap_or(false);

        Some(FeeRoute { id, external })
    }
}

pub struct FeePage<'a> {
    route: FeeRoute,
    store: &'a mut ChainStore,
    backend: Arc<dyn TxConfigBackend>,
    window: Box<dyn HostWindow + 'a>,
    state: TxState,
    handle: Option<TxBuilderHandle>,
}

impl<'a> FeePage<'a> {
    /// Mounts the page. Externally opened pages fit the window to their content and disable
    /// scrolling; pages opened from inside the wallet keep scrolling enabled.
    pub fn open(
        route: FeeRoute,
        store: &'a mut ChainStore,
        backend: Arc<dyn TxConfigBackend>,
        window: Box<dyn HostWindow + 'a>,
    ) -> Self {
        if route.external {
            window.fit_window();
            window.disable_scroll();
        } else {
            window.enable_scroll();
        }

        let mut page = FeePage {
            route,
            store,
            backend,
            window,
            state: TxState::new(),
            handle: None,
        };
        page.sync_chain();

        page
    }

    pub fn route(&self) -> &FeeRoute {
        &self.route
    }

    pub fn state(&self) -> &TxState {
        &self.state
    }

    /// Form state for user edits of gas, memo and fees.
    pub fn state_mut(&mut self) -> &mut TxState {
        &mut self.state
    }

    pub fn handle(&self) -> Option<&TxBuilderHandle> {
        self.handle.as_ref()
    }

    pub fn chain_id(&self) -> &str {
        self.store.current_chain_id()
    }

    // Fee currencies and gas prices always mirror the current chain.
    fn sync_chain(&mut self) {
        let info = self.store.current();
        let fee_currencies = info.fee_currencies.clone();
        let step = info.gas_price_step_or_default();

        self.state.set_fee_currencies(fee_currencies);
        self.state.set_gas_price_step(step);
    }

    /// Loads the request named by the route and mirrors its config into the form: the store
    /// switches to the request's chain, gas and memo are copied and the fee comes from the
    /// selected fee tier.
    pub async fn init(&mut self) -> Result<(), FeePageError> {
        let mut handle = TxBuilderHandle::new(&self.route.id);
        let loaded = handle.load(self.backend.as_ref()).await;
        self.handle = Some(handle);
        let (chain_id, config) = loaded?;

        self.store.set_chain(&chain_id)?;
        self.sync_chain();
        self.state.set_gas(config.gas);
        self.state.set_memo(&config.memo);
        if self.requires_fee() {
            let tier = self.state.fee_tier().unwrap_or_default();
            self.state.select_fee_tier(tier)?;
        }
        debug!("loaded tx request {} for chain {}", self.route.id, chain_id);

        Ok(())
    }

    /// Loads a different request. A pending request the page was showing is rejected first
    /// when the page is external.
    pub async fn change_request(&mut self, id: &str) -> Result<(), FeePageError> {
        if id == self.route.id {
            return Ok(());
        }
        self.reject_pending()?;
        self.route.id = id.to_string();

        self.init().await
    }

    pub fn requires_fee(&self) -> bool {
        requires_fee(self.store.current_chain_id())
    }

    /// Whether the fee input is part of the page.
    pub fn shows_fee_input(&self) -> bool {
        self.requires_fee()
    }

    pub fn select_fee_tier(&mut self, tier: FeeTier) -> Result<(), FeePageError> {
        self.state.select_fee_tier(tier).map_err(|e| e.into())
    }

    pub fn is_valid(&self) -> bool {
        if self.requires_fee() {
            self.state
                .is_valid(&[TxField::Gas, TxField::Memo, TxField::Fees])
        } else {
            self.state.is_valid(&[TxField::Gas, TxField::Memo])
        }
    }

    pub fn submit_disabled(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| h.initializing())
            .unwrap_or(true)
            || !self.is_valid()
    }

    /// Writes gas, fee and memo into the request's config and approves it.
    ///
    /// Returns `Ok(false)` without touching the request when the form is invalid or the
    /// request was already resolved.
    pub fn submit(&mut self) -> Result<bool, FeePageError> {
        if !self.is_valid() {
            return Ok(false);
        }

        let handle = self
            .handle
            .as_mut()
            .ok_or(FeePageError::TxBuilderNotLoaded)?;
        let mut config = handle
            .config()
            .cloned()
            .ok_or(FeePageError::ConfigNotLoaded)?;
        if !handle.is_pending() {
            return Ok(false);
        }

        config.gas = self.state.gas();
        config.fee = self.state.fees().to_vec();
        config.memo = self.state.memo().to_string();
        handle.approve(self.backend.as_ref(), config)?;
        debug!("approved tx request {}", handle.id());

        Ok(true)
    }

    /// Handles the host window closing. An external page rejects its request unless it is
    /// still loading.
    pub fn on_window_close(&mut self) -> Result<bool, FeePageError> {
        let loading = self.handle.as_ref().map(|h| h.loading()).unwrap_or(true);
        if loading {
            return Ok(false);
        }

        self.reject_pending()
    }

    /// Unmounts the page, rejecting the request if the page is external and the request is
    /// still pending. Dropping the page does the same.
    pub fn close(mut self) -> Result<bool, FeePageError> {
        self.reject_pending()
    }

    fn reject_pending(&mut self) -> Result<bool, FeePageError> {
        if !self.route.external {
            return Ok(false);
        }
        let handle = match self.handle.as_mut() {
            Some(handle) => handle,
            None => return Ok(false),
        };

        let rejected = handle.reject(self.backend.as_ref())?;
        if rejected {
            warn!("rejected tx request {}", handle.id());
        }

        Ok(rejected)
    }
}

impl<'a> Drop for FeePage<'a> {
    fn drop(&mut self) {
        if let Err(err) = self.reject_pending() {
            warn!("failed to reject tx request {}: {}", self.route.id, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay::assay;

    #[assay]
    fn fee_exempt_chain_ids() {
        assert!(!requires_fee("euler-6"));
        assert!(!requires_fee("euler-42"));
        assert!(requires_fee("euler-"));
        assert!(requires_fee("euler"));
        assert!(requires_fee("cosmoshub-4"));
        assert!(requires_fee("my-euler-6"));
    }

    #[assay]
    fn parses_routes() {
        assert_eq!(
            FeeRoute::parse("/fee/12ab?external=true"),
            Some(FeeRoute::new("12ab", true))
        );
        assert_eq!(FeeRoute::parse("/fee/12ab"), Some(FeeRoute::new("12ab", false)));
        assert_eq!(
            FeeRoute::parse("/fee/12ab?external="),
            Some(FeeRoute::new("12ab", false))
        );
        assert_eq!(
            FeeRoute::parse("/fee/12ab?external=false"),
            Some(FeeRoute::new("12ab", true))
        );
        assert_eq!(
            FeeRoute::parse("/fee/12ab?external=0"),
            Some(FeeRoute::new("12ab", true))
        );
        assert_eq!(FeeRoute::parse("/"), None);
    }
}
