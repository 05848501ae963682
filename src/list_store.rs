//! Load / mutate / persist manager for one item collection.
//!
//! A [`ListStore`] owns the in-memory copy of one list and keeps it in step
//! with the blob stored under the record type's key. Every mutation writes the
//! whole list back; there is no partial update.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::RecordError;
use crate::storage::{KeyValueStore, StorageError};

/// An item kept in a [`ListStore`]
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Key the whole list is stored under
    const STORAGE_KEY: &'static str;
    /// Human readable name used in logs and messages
    const KIND: &'static str;

    fn id(&self) -> &str;

    /// Checked before an item is added; stored items are not re-validated
    fn validate(&self) -> Result<(), RecordError> {
        Ok(())
    }
}

/// Where [`ListStore::add`] puts the new item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Front,
    Back,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access '{key}': {source}")]
    Storage {
        key: &'static str,
        #[source]
        source: StorageError,
    },
    #[error("Data stored under '{key}' could not be read: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{key}' did not load; reload it before making changes")]
    NotLoaded { key: &'static str },
    #[error(transparent)]
    Invalid(#[from] RecordError),
}

pub struct ListStore<'a, T: Record> {
    backend: &'a dyn KeyValueStore,
    items: Vec<T>,
    /// Set while the last `load` failed; mutations are refused until one succeeds
    load_failed: bool,
}

impl<'a, T: Record> ListStore<'a, T> {
    /// Create an empty store bound to `backend`; call [`load`](Self::load) to read it
    pub fn new(backend: &'a dyn KeyValueStore) -> Self {
        Self {
            backend,
            items: Vec::new(),
            load_failed: false,
        }
    }

    /// Create a store and load its list
    pub fn open(backend: &'a dyn KeyValueStore) -> Result<Self, StoreError> {
        let mut store = Self::new(backend);
        store.load()?;
        Ok(store)
    }

    pub fn key(&self) -> &'static str {
        T::STORAGE_KEY
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Replace the in-memory list with what is stored.
    ///
    /// A key that was never written loads as an empty list. On error the
    /// in-memory list is left empty and `add`, `remove` and `update` return
    /// [`StoreError::NotLoaded`] until a later `load` succeeds, so the stored
    /// blob is not overwritten.
    pub fn load(&mut self) -> Result<&[T], StoreError> {
        self.items.clear();
        self.load_failed = true;

        let key = T::STORAGE_KEY;
        let blob = self
            .backend
            .get_item(key)
            .map_err(|source| StoreError::Storage { key, source })?;

        if let Some(blob) = blob {
            self.items =
                serde_json::from_str(&blob).map_err(|source| StoreError::Corrupt { key, source })?;
        }
        self.load_failed = false;

        debug!(key, count = self.items.len(), "loaded {} list", T::KIND);
        Ok(&self.items)
    }

    /// Validate `item`, insert it at `placement` and persist the list
    pub fn add(&mut self, item: T, placement: Placement) -> Result<&[T], StoreError> {
        self.ensure_loaded()?;
        item.validate()?;

        let id = item.id().to_string();
        let mut next = Vec::with_capacity(self.items.len() + 1);
        match placement {
            Placement::Front => {
                next.push(item);
                next.extend(self.items.iter().cloned());
            }
            Placement::Back => {
                next.extend(self.items.iter().cloned());
                next.push(item);
            }
        }

        self.commit(next)?;
        info!(key = T::STORAGE_KEY, id = %id, "added {}", T::KIND);
        Ok(&self.items)
    }

    /// Drop every item whose id is `id`. Unknown ids change nothing.
    pub fn remove(&mut self, id: &str) -> Result<&[T], StoreError> {
        self.ensure_loaded()?;
        if self.get(id).is_none() {
            debug!(key = T::STORAGE_KEY, id, "no {} to remove", T::KIND);
            return Ok(&self.items);
        }

        let next: Vec<T> = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();

        self.commit(next)?;
        info!(key = T::STORAGE_KEY, id, "removed {}", T::KIND);
        Ok(&self.items)
    }

    /// Replace the item `id` with `mutator`'s output. Unknown ids change nothing.
    pub fn update<F>(&mut self, id: &str, mutator: F) -> Result<&[T], StoreError>
    where
        F: FnOnce(T) -> T,
    {
        self.ensure_loaded()?;
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            debug!(key = T::STORAGE_KEY, id, "no {} to update", T::KIND);
            return Ok(&self.items);
        };

        let mut next = self.items.clone();
        let current = next[index].clone();
        next[index] = mutator(current);

        self.commit(next)?;
        info!(key = T::STORAGE_KEY, id, "updated {}", T::KIND);
        Ok(&self.items)
    }

    /// Serialize `items` and write them under the store's key, overwriting
    /// whatever was there
    pub fn persist(&self, items: &[T]) -> Result<(), StoreError> {
        let key = T::STORAGE_KEY;
        let blob =
            serde_json::to_string(items).map_err(|source| StoreError::Serialize { key, source })?;
        self.backend
            .set_item(key, &blob)
            .map_err(|source| StoreError::Storage { key, source })?;
        debug!(key, count = items.len(), bytes = blob.len(), "persisted {} list", T::KIND);
        Ok(())
    }

    fn ensure_loaded(&self) -> Result<(), StoreError> {
        if self.load_failed {
            warn!(key = T::STORAGE_KEY, "refusing to change {} list after failed load", T::KIND);
            return Err(StoreError::NotLoaded { key: T::STORAGE_KEY });
        }
        Ok(())
    }

    /// Persist `next` and only then make it the in-memory list
    fn commit(&mut self, next: Vec<T>) -> Result<(), StoreError> {
        self.persist(&next)?;
        self.items = next;
        Ok(())
    }
}
