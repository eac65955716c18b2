use std::{error::Error, future::Future, sync::Arc};

use tracing::{info, warn};

use crate::access::EventAccess;
use crate::config::{Config, StoreBackend};
use crate::controller::{FetchController, FetchState};
use crate::storage::{
    event_store::EventStore, firestore::FirestoreEventStore, memory::InMemoryEventStore,
};

/// Builds the one store client the process uses; callers own its lifetime.
pub fn build_store(config: &Config) -> Result<Arc<dyn EventStore>, Box<dyn Error>> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("STORE_BACKEND=memory, showing demo events only");
            Ok(Arc::new(InMemoryEventStore::demo()))
        }
        StoreBackend::Firestore => {
            let settings = config.firestore_settings()?;
            info!(
                project = %settings.project_id,
                collection = %settings.collection,
                base_url = %settings.base_url,
                "Using Firestore storage"
            );
            Ok(Arc::new(FirestoreEventStore::new(settings)?))
        }
    }
}

/// Mounts a controller, waits for the snapshot or `shutdown`, then unmounts.
///
/// When `shutdown` wins the state stays `Loading` and the in-flight read is
/// abandoned.
pub async fn run_dashboard<S>(access: EventAccess, shutdown: S) -> FetchState
where
    S: Future<Output = ()>,
{
    let mut controller = FetchController::new(access);
    controller.mount();

    let settled = tokio::select! {
        state = controller.wait_settled() => Some(state),
        _ = shutdown => None,
    };

    controller.unmount();
    match settled {
        Some(state) => state,
        None => {
            info!("Interrupted before events arrived");
            controller.state()
        }
    }
}
