//! Provider: owns the placement engine, runs the SDK initialization protocol
//! and wires the engine to the emitter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde_json::Value;
use tapresearch_common::{Config, EventKind, Result, SdkEvent, TapResearchError};
use tapresearch_sdk::SurveySdk;
use tracing::{error, info, warn};

use crate::emitter::{EventEmitter, ListenerId, Subscription};
use crate::engine::Engine;
use crate::notify::backend::NotifyBackend;
use crate::router::SdkEventRouter;
use crate::state::{PlacementReducer, PlacementState};

pub type PlacementEngine =
    Engine<SdkEvent, PlacementState, Arc<dyn NotifyBackend>, PlacementReducer, SdkEventRouter>;

pub struct TapResearchProvider<S: SurveySdk> {
    sdk: S,
    emitter: Arc<EventEmitter>,
    engine: Arc<PlacementEngine>,
    subscriptions: Mutex<Vec<Subscription>>,
    initialized: AtomicBool,
}

impl<S: SurveySdk> TapResearchProvider<S> {
    pub fn new(sdk: S, emitter: Arc<EventEmitter>, notifier: Arc<dyn NotifyBackend>) -> Self {
        let engine = Engine::new(PlacementReducer, SdkEventRouter, notifier, PlacementState::new());
        Self {
            sdk,
            emitter,
            engine: Arc::new(engine),
            subscriptions: Mutex::new(Vec::new()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Run the initialization protocol:
    ///   1. init the SDK with the API token
    ///   2. register the user identifier
    ///   3. enable reward collection delivery
    ///   4. subscribe the engine to every SDK event
    ///
    /// A failure in step 1 is recorded in the published state so the UI can
    /// show it. Any failure leaves the provider unsubscribed and retryable.
    pub async fn initialize(&self, config: &Config) -> Result<()> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(TapResearchError::AlreadyInitialized);
        }

        match self.run_protocol(config).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.initialized.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    async fn run_protocol(&self, config: &Config) -> Result<()> {
        info!(user_identifier = config.user_identifier.as_str(), "Initializing TapResearch SDK");

        if let Err(e) = self.sdk.init_with_api_token(&config.api_token).await {
            error!(error = %e, "TapResearch SDK initialization failed");
            let message = e.to_string();
            self.engine
                .update(|state| state.set_init_error(Some(message.clone())));
            return Err(TapResearchError::SdkInit(message));
        }
        self.engine.update(|state| state.set_init_error(None));

        self.sdk
            .set_unique_user_identifier(&config.user_identifier)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to set unique user identifier"))?;

        self.sdk
            .set_receive_reward_collection(true)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to enable reward collection"))?;

        self.subscribe();
        info!("TapResearch SDK initialized");
        Ok(())
    }

    fn subscribe(&self) {
        let mut subscriptions = self.subscriptions.lock();
        for kind in EventKind::ALL {
            let engine = Arc::clone(&self.engine);
            let subscription = self.emitter.add_listener(kind.name(), move |payload: &Value| {
                match SdkEvent::parse(kind, payload) {
                    Ok(event) => engine.dispatch(event),
                    Err(e) => warn!(error = %e, event = kind.name(), "Dropping malformed SDK event"),
                }
            });
            subscriptions.push(subscription);
        }
    }

    /// Unsubscribe every handler. Events emitted afterwards are not seen.
    pub fn teardown(&self) {
        let subscriptions: Vec<Subscription> = self.subscriptions.lock().drain(..).collect();
        if subscriptions.is_empty() {
            return;
        }
        for subscription in &subscriptions {
            self.emitter.remove_subscription(subscription);
        }
        self.initialized.store(false, Ordering::SeqCst);
        info!(handlers = subscriptions.len(), "TapResearch handlers removed");
    }

    pub fn is_subscribed(&self) -> bool {
        !self.subscriptions.lock().is_empty()
    }

    /// Read handle for consumers. It stops working once the provider is dropped.
    pub fn handle(&self) -> PlacementsHandle {
        PlacementsHandle {
            engine: Arc::downgrade(&self.engine),
        }
    }

    pub fn snapshot(&self) -> Arc<PlacementState> {
        self.engine.current()
    }

    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    pub fn notifier(&self) -> &Arc<dyn NotifyBackend> {
        self.engine.deps()
    }
}

impl<S: SurveySdk> Drop for TapResearchProvider<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Consumer-side read access to the provider's placement state.
///
/// `PlacementsHandle::default()` is a handle with no provider behind it;
/// every read on it fails with [`TapResearchError::OutsideProvider`].
#[derive(Clone, Default)]
pub struct PlacementsHandle {
    engine: Weak<PlacementEngine>,
}

impl PlacementsHandle {
    pub fn is_attached(&self) -> bool {
        self.engine.strong_count() > 0
    }

    fn engine(&self) -> Result<Arc<PlacementEngine>> {
        self.engine
            .upgrade()
            .ok_or(TapResearchError::OutsideProvider("PlacementsHandle"))
    }

    pub fn snapshot(&self) -> Result<Arc<PlacementState>> {
        Ok(self.engine()?.current())
    }

    /// Be told about every new snapshot.
    pub fn subscribe(
        &self,
        callback: impl Fn(&Arc<PlacementState>) + Send + Sync + 'static,
    ) -> Result<ListenerId> {
        Ok(self.engine()?.publisher().subscribe(callback))
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        if let Some(engine) = self.engine.upgrade() {
            engine.publisher().unsubscribe(id);
        }
    }
}
