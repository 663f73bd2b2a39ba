//! Remote HTTP JSON store.
//!
//! # Responsibility
//! - Map the five store operations onto resource-oriented JSON calls
//!   (`GET/POST/PUT/DELETE {base}/{collection}[/{id}]`).
//! - Translate every failure mode (network error, non-2xx status, bad
//!   response body) into `StoreError::Transport` so the fallback decorator
//!   can take over.

use std::marker::PhantomData;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use uuid::Uuid;

use crate::store::{Entity, Store, StoreError, StoreResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-backed store for one collection.
pub struct RemoteStore<T> {
    base_url: String,
    client: Client,
    _entity: PhantomData<T>,
}

impl<T: Entity> RemoteStore<T> {
    /// Creates a store rooted at `base_url`, e.g. `https://host/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, T::collection().endpoint())
    }

    fn item_url(&self, id: Uuid) -> String {
        format!("{}/{id}", self.collection_url())
    }
}

impl<T: Entity> Store<T> for RemoteStore<T> {
    fn get_all(&self) -> StoreResult<Vec<T>> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .map_err(transport)?;
        decode(check(response)?)
    }

    fn get_by_id(&self, id: Uuid) -> StoreResult<Option<T>> {
        let response = self
            .client
            .get(self.item_url(id))
            .send()
            .map_err(transport)?;
        decode(check(response)?)
    }

    fn create(&self, mut item: T) -> StoreResult<T> {
        if item.id().is_nil() {
            item.assign_id(Uuid::new_v4());
        }
        let response = self
            .client
            .post(self.collection_url())
            .json(&item)
            .send()
            .map_err(transport)?;
        decode(check(response)?)
    }

    fn update(&self, id: Uuid, patch: &serde_json::Value) -> StoreResult<Option<T>> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(patch)
            .send()
            .map_err(transport)?;
        decode(check(response)?)
    }

    fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .map_err(transport)?;
        check(response)?;
        Ok(true)
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

fn check(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Transport(format!("status {status}")))
    }
}

fn decode<V: serde::de::DeserializeOwned>(response: Response) -> StoreResult<V> {
    response
        .json()
        .map_err(|err| StoreError::Transport(format!("invalid response body: {err}")))
}
