//! Remote-first store with on-device fallback.
//!
//! # Responsibility
//! - Try the remote store for every operation; on any remote failure, log
//!   a warning and replay the operation against the local store.
//! - Run local-only when no remote base URL is configured.
//!
//! # Invariants
//! - The fallback never retries the remote; retry policy, if any, belongs
//!   to the transport.
//! - Local errors are surfaced unchanged; there is no third tier.

use log::warn;
use uuid::Uuid;

use crate::store::local::LocalStore;
use crate::store::remote::RemoteStore;
use crate::store::{Entity, Store, StoreError, StoreResult};

/// Decorator combining a remote store with a local fallback.
pub struct FallbackStore<T> {
    remote: Option<RemoteStore<T>>,
    local: LocalStore<T>,
}

impl<T: Entity> FallbackStore<T> {
    pub fn new(remote: RemoteStore<T>, local: LocalStore<T>) -> Self {
        Self {
            remote: Some(remote),
            local,
        }
    }

    /// Store that never attempts a remote call.
    pub fn local_only(local: LocalStore<T>) -> Self {
        Self {
            remote: None,
            local,
        }
    }

    fn recover(&self, operation: &str, err: StoreError) -> &LocalStore<T> {
        warn!(
            "event=remote_fallback module=store status=recovered collection={} operation={operation} cause={err}",
            T::collection()
        );
        &self.local
    }
}

impl<T: Entity> Store<T> for FallbackStore<T> {
    fn get_all(&self) -> StoreResult<Vec<T>> {
        match &self.remote {
            Some(remote) => match remote.get_all() {
                Ok(items) => Ok(items),
                Err(err) => self.recover("get_all", err).get_all(),
            },
            None => self.local.get_all(),
        }
    }

    fn get_by_id(&self, id: Uuid) -> StoreResult<Option<T>> {
        match &self.remote {
            Some(remote) => match remote.get_by_id(id) {
                Ok(item) => Ok(item),
                Err(err) => self.recover("get_by_id", err).get_by_id(id),
            },
            None => self.local.get_by_id(id),
        }
    }

    fn create(&self, item: T) -> StoreResult<T> {
        match &self.remote {
            Some(remote) => match remote.create(item.clone()) {
                Ok(created) => Ok(created),
                Err(err) => self.recover("create", err).create(item),
            },
            None => self.local.create(item),
        }
    }

    fn update(&self, id: Uuid, patch: &serde_json::Value) -> StoreResult<Option<T>> {
        match &self.remote {
            Some(remote) => match remote.update(id, patch) {
                Ok(updated) => Ok(updated),
                Err(err) => self.recover("update", err).update(id, patch),
            },
            None => self.local.update(id, patch),
        }
    }

    fn delete(&self, id: Uuid) -> StoreResult<bool> {
        match &self.remote {
            Some(remote) => match remote.delete(id) {
                Ok(done) => Ok(done),
                Err(err) => self.recover("delete", err).delete(id),
            },
            None => self.local.delete(id),
        }
    }
}
