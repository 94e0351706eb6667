use contracts::shared::error::ApiError;
use contracts::shared::resource::{
    confirm, optimistic_insert, optimistic_remove, optimistic_update, Resource, TempIds,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

use super::service;

/// Cached copy of one CRUD collection.
///
/// Mutations are optimistic: the local list changes first and the request
/// follows. When the request fails the list is re-fetched from the server
/// and the error is kept in `error` for the page to show.
pub struct Collection<R: Send + Sync + 'static> {
    pub items: RwSignal<Vec<R>>,
    pub loading: RwSignal<bool>,
    pub loaded: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    source: RwSignal<String>,
    temp_ids: StoredValue<TempIds>,
    generation: StoredValue<u64>,
}

impl<R: Send + Sync + 'static> Clone for Collection<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Send + Sync + 'static> Copy for Collection<R> {}

impl<R> Collection<R>
where
    R: Resource + Send + Sync,
    R::Draft: Send + Sync,
{
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            loaded: RwSignal::new(false),
            error: RwSignal::new(None),
            source: RwSignal::new(R::ENDPOINT.to_string()),
            temp_ids: StoredValue::new(TempIds::new()),
            generation: StoredValue::new(0),
        }
    }

    /// Read the list from another endpoint (e.g. `/tareas/mensajero/7`).
    pub fn set_source(self, path: String) {
        self.source.set(path);
    }

    /// Forget everything; in-flight loads are ignored when they land.
    pub fn clear(self) {
        self.generation.update_value(|g| *g += 1);
        self.items.set(Vec::new());
        self.loaded.set(false);
        self.loading.set(false);
        self.error.set(None);
        self.source.set(R::ENDPOINT.to_string());
    }

    pub fn load(self) {
        spawn_local(async move {
            let _ = self.refetch().await;
        });
    }

    pub fn ensure_loaded(self) {
        if !self.loaded.get_untracked() && !self.loading.get_untracked() {
            self.load();
        }
    }

    pub async fn refetch(self) -> Result<(), ApiError> {
        let generation = self.generation.get_value();
        let path = self.source.get_untracked();
        self.loading.set(true);

        let result = service::fetch_list::<R>(&path).await;
        if self.generation.get_value() != generation {
            log::debug!("Dropping stale {} list", R::LABEL);
            return Ok(());
        }
        self.loading.set(false);

        match result {
            Ok(rows) => {
                log::debug!("Loaded {} {} rows from {}", rows.len(), R::LABEL, path);
                self.items.set(rows);
                self.loaded.set(true);
                self.error.set(None);
                Ok(())
            }
            Err(e) => {
                log::warn!("Loading {} failed: {}", path, e);
                self.error.set(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Row by id, tracked.
    pub fn find(self, id: i64) -> Option<R> {
        self.items
            .with(|items| items.iter().find(|item| item.id() == id).cloned())
    }

    pub async fn create(self, draft: R::Draft) -> Result<(), ApiError> {
        R::validate(&draft).map_err(ApiError::Validation)?;

        let mut local_id = 0;
        self.items.update(|items| {
            self.temp_ids
                .update_value(|ids| local_id = optimistic_insert(items, ids, &draft));
        });

        match service::create::<R>(&draft).await {
            Ok(Some(row)) => {
                self.items.update(|items| confirm(items, local_id, row));
                self.error.set(None);
                Ok(())
            }
            Ok(None) => {
                // No row echoed back, so the real id is unknown until a reload.
                self.load();
                Ok(())
            }
            Err(e) => Err(self.revert(e)),
        }
    }

    pub async fn update(self, id: i64, draft: R::Draft) -> Result<(), ApiError> {
        R::validate(&draft).map_err(ApiError::Validation)?;

        self.items.update(|items| {
            optimistic_update(items, id, &draft);
        });

        match service::update::<R>(id, &draft).await {
            Ok(Some(row)) => {
                self.items.update(|items| confirm(items, id, row));
                self.error.set(None);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => Err(self.revert(e)),
        }
    }

    pub async fn remove(self, id: i64) -> Result<(), ApiError> {
        self.items.update(|items| {
            optimistic_remove(items, id);
        });

        match service::remove::<R>(id).await {
            Ok(()) => {
                self.error.set(None);
                Ok(())
            }
            Err(e) => Err(self.revert(e)),
        }
    }

    /// Replace one row with a server copy obtained elsewhere.
    pub fn replace(self, row: R) {
        let id = row.id();
        self.items.update(|items| confirm(items, id, row));
    }

    fn revert(self, e: ApiError) -> ApiError {
        log::warn!("{} change rejected, reloading: {}", R::LABEL, e);
        self.error.set(Some(e.to_string()));
        if !e.is_unauthorized() {
            self.load();
        }
        e
    }
}

impl<R> Default for Collection<R>
where
    R: Resource + Send + Sync,
    R::Draft: Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only lookup list (roles, task statuses).
pub struct Catalog<T: Send + Sync + 'static> {
    pub items: RwSignal<Vec<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    path: &'static str,
}

impl<T: Send + Sync + 'static> Clone for Catalog<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Catalog<T> {}

impl<T> Catalog<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn new(path: &'static str) -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            path,
        }
    }

    pub fn load(self) {
        spawn_local(async move {
            self.loading.set(true);
            let result = service::fetch_list::<T>(self.path).await;
            self.loading.set(false);
            match result {
                Ok(rows) => {
                    self.items.set(rows);
                    self.error.set(None);
                }
                Err(e) => {
                    log::warn!("Loading {} failed: {}", self.path, e);
                    self.error.set(Some(e.to_string()));
                }
            }
        });
    }

    pub fn clear(self) {
        self.items.set(Vec::new());
        self.error.set(None);
    }
}
