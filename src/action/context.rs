use crate::gateway::RemoteGateway;
use crate::notify::Notifier;
use crate::store::EntityStore;
use std::sync::Arc;

/// Everything an action needs to plan and apply its effects, passed in
/// explicitly rather than resolved from ambient state.
#[derive(Clone)]
pub struct ActionContext {
    store: EntityStore,
    gateway: Arc<dyn RemoteGateway>,
    notifier: Notifier,
}

impl ActionContext {
    pub fn new(store: EntityStore, gateway: Arc<dyn RemoteGateway>, notifier: Notifier) -> Self {
        Self {
            store,
            gateway,
            notifier,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn gateway(&self) -> &Arc<dyn RemoteGateway> {
        &self.gateway
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}
