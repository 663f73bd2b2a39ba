//! On-device JSON store.
//!
//! # Responsibility
//! - Persist one collection as a JSON array in a single namespaced file.
//! - Self-heal: a corrupt or unparseable blob is logged and reset to an
//!   empty collection instead of propagating a parse error.
//!
//! # Invariants
//! - Every operation re-reads the blob; the file is the source of truth.
//! - A missing blob is equivalent to an empty collection.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{error, warn};
use serde_json::Value;
use uuid::Uuid;

use crate::store::{Entity, Store, StoreError, StoreResult};

/// File-backed store holding one collection under `data_dir`.
pub struct LocalStore<T> {
    data_dir: PathBuf,
    _entity: PhantomData<T>,
}

impl<T: Entity> LocalStore<T> {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            _entity: PhantomData,
        }
    }

    /// Path of the collection blob, e.g. `data/federwi_todos.json`.
    pub fn blob_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.json", T::collection().storage_key()))
    }

    fn load(&self) -> StoreResult<Vec<Value>> {
        let path = self.blob_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.save(&[])?;
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                // Corrupt blob: reset to empty rather than surfacing the
                // parse error (recovered StorageCorruption).
                error!(
                    "event=blob_reset module=local_store status=recovered collection={} path={} cause={err}",
                    T::collection(),
                    path.display()
                );
                self.save(&[])?;
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, items: &[Value]) -> StoreResult<()> {
        if let Some(parent) = self.blob_path().parent() {
            ensure_dir(parent)?;
        }
        let raw = serde_json::to_string(items)
            .map_err(|err| StoreError::InvalidRecord(err.to_string()))?;
        fs::write(self.blob_path(), raw)?;
        Ok(())
    }

    fn decode(&self, value: Value) -> StoreResult<T> {
        serde_json::from_value(value).map_err(|err| {
            StoreError::InvalidRecord(format!(
                "collection {}: {err}",
                T::collection()
            ))
        })
    }
}

impl<T: Entity> Store<T> for LocalStore<T> {
    fn get_all(&self) -> StoreResult<Vec<T>> {
        self.load()?
            .into_iter()
            .map(|value| self.decode(value))
            .collect()
    }

    fn get_by_id(&self, id: Uuid) -> StoreResult<Option<T>> {
        let wanted = Value::String(id.to_string());
        for value in self.load()? {
            if value.get("id") == Some(&wanted) {
                return Ok(Some(self.decode(value)?));
            }
        }
        Ok(None)
    }

    fn create(&self, mut item: T) -> StoreResult<T> {
        if item.id().is_nil() {
            item.assign_id(Uuid::new_v4());
        }
        let mut items = self.load()?;
        let encoded = serde_json::to_value(&item)
            .map_err(|err| StoreError::InvalidRecord(err.to_string()))?;
        items.push(encoded);
        self.save(&items)?;
        Ok(item)
    }

    fn update(&self, id: Uuid, patch: &Value) -> StoreResult<Option<T>> {
        let wanted = Value::String(id.to_string());
        let mut items = self.load()?;

        let Some(slot) = items
            .iter_mut()
            .find(|value| value.get("id") == Some(&wanted))
        else {
            return Ok(None);
        };

        if let (Some(record), Some(fields)) = (slot.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                record.insert(key.clone(), value.clone());
            }
            record.insert(
                "lastModifiedTimestamp".to_string(),
                serde_json::to_value(Utc::now())
                    .map_err(|err| StoreError::InvalidRecord(err.to_string()))?,
            );
        } else {
            warn!(
                "event=patch_skipped module=local_store status=ignored collection={} id={id}",
                T::collection()
            );
        }

        let updated = self.decode(slot.clone())?;
        self.save(&items)?;
        Ok(Some(updated))
    }

    fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let wanted = Value::String(id.to_string());
        let mut items = self.load()?;
        items.retain(|value| value.get("id") != Some(&wanted));
        self.save(&items)?;
        Ok(true)
    }
}

fn ensure_dir(path: &Path) -> StoreResult<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(err.into()),
    }
}
