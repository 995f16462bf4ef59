//! Dependency injection: configuration in, a ready `KageApi` out

use std::sync::Arc;

use kage_adapter::controller::{Gateways, KageApi};
use kage_adapter::gateway::{LogNotifier, Sha256Hasher, SystemClock};
use kage_adapter::repository::InMemoryStore;
use kage_domain::{Notifier, NullNotifier};
use rbac::AccessPolicy;
use shared::KageConfig;
use tracing::debug;

pub fn build(config: &KageConfig) -> anyhow::Result<KageApi> {
    let policy = AccessPolicy::new(config.policy.elevated_role()?);

    let notifier: Arc<dyn Notifier> = if config.notifications.enabled {
        Arc::new(LogNotifier::new(&config.notifications))
    } else {
        Arc::new(NullNotifier)
    };

    let gateways = Gateways {
        clock: Arc::new(SystemClock),
        hasher: Arc::new(Sha256Hasher::new(config.credentials.pepper.clone())),
        notifier,
    };

    debug!(
        elevated = %policy.elevated_role(),
        notifications = config.notifications.enabled,
        "Wiring the in-memory store"
    );
    Ok(KageApi::new(&InMemoryStore::new(), policy, gateways))
}
