//! Operations the presentation shell drives
//!
//! The `Coordinator` ties the pure pieces (merge, build, rotate) to the
//! network and the binding store. It serializes its own operations behind a
//! lock so a roster fetch never interleaves with a dispatch.

use std::sync::Arc;

use tokio::sync::Mutex;

use ob_core::traits::ConsoleConnector;
use ob_core::{
    build_commands, merge, rotate, BindingMap, BindingStore, ConfigError, DispatchReport, ObError,
};
use ob_protocol::{ConnectionTarget, PlayerRecord};

use crate::dispatcher::{DispatchOptions, MultiHostDispatcher};
use crate::roster::fetch_roster;

/// What a save-and-apply produced
#[derive(Debug)]
pub struct ApplyReport {
    /// Bindings that were persisted and pushed
    pub bindings: BindingMap,
    /// Set when persisting failed; the dispatch still ran
    pub save_error: Option<ConfigError>,
    /// Per-target outcomes
    pub dispatch: DispatchReport,
}

/// Drives roster fetches and bind dispatches
pub struct Coordinator<C> {
    connector: Arc<C>,
    dispatcher: MultiHostDispatcher<C>,
    store: BindingStore,
    /// Held for the duration of each network operation
    ops: Mutex<()>,
}

impl<C: ConsoleConnector + 'static> Coordinator<C> {
    /// Create a coordinator over `connector`, persisting into `store`
    pub fn new(connector: C, options: DispatchOptions, store: BindingStore) -> Self {
        let connector = Arc::new(connector);
        Self {
            dispatcher: MultiHostDispatcher::new(Arc::clone(&connector), options),
            connector,
            store,
            ops: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &BindingStore {
        &self.store
    }

    /// Fetch the roster from the first target only
    pub async fn fetch_roster(
        &self,
        targets: &[ConnectionTarget],
    ) -> Result<Vec<PlayerRecord>, ObError> {
        let target = targets
            .first()
            .ok_or_else(|| ConfigError::Invalid("no hosts configured".to_string()))?;

        let _guard = self.ops.lock().await;
        let timeout = self.dispatcher.options().target_timeout;
        Ok(fetch_roster(self.connector.as_ref(), target, timeout).await?)
    }

    /// Build the batch for `roster` and push it to every target
    pub async fn apply_bindings(
        &self,
        targets: &[ConnectionTarget],
        roster: &[PlayerRecord],
        bindings: &BindingMap,
    ) -> Result<DispatchReport, ObError> {
        if targets.is_empty() {
            return Err(ConfigError::Invalid("no hosts configured".to_string()).into());
        }

        let commands = build_commands(roster, bindings);
        tracing::info!(
            targets = targets.len(),
            commands = commands.len(),
            "Dispatching binds"
        );

        let _guard = self.ops.lock().await;
        Ok(self.dispatcher.dispatch(targets, &commands).await)
    }

    /// Merge entered keys, persist them, then push them everywhere
    ///
    /// A failed save is reported in the result but does not stop the push.
    /// An empty roster is rejected before anything is saved or sent.
    pub async fn save_and_apply(
        &self,
        targets: &[ConnectionTarget],
        roster: &[PlayerRecord],
        entered: &BindingMap,
    ) -> Result<ApplyReport, ObError> {
        if targets.is_empty() {
            return Err(ConfigError::Invalid("no hosts configured".to_string()).into());
        }
        if roster.is_empty() {
            return Err(ObError::EmptyRoster);
        }

        let bindings = merge(roster, entered);
        let save_error = self.store.save(&bindings).err();
        let dispatch = self.apply_bindings(targets, roster, &bindings).await?;

        Ok(ApplyReport {
            bindings,
            save_error,
            dispatch,
        })
    }

    /// Halftime swap: rotate the current keys, persist, and push
    pub async fn rotate_and_apply(
        &self,
        targets: &[ConnectionTarget],
        roster: &[PlayerRecord],
        current: &BindingMap,
    ) -> Result<ApplyReport, ObError> {
        let rotated = rotate(roster, current);
        tracing::info!(players = rotated.len(), "Applying halftime swap");
        self.save_and_apply(targets, roster, &rotated).await
    }
}
