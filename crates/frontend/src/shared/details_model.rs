//! ViewModel shared by the create/edit modals.

use contracts::shared::resource::Resource;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::data::Collection;

/// Form state for one [`Resource`] draft plus the save command.
pub struct DetailsViewModel<R>
where
    R: Resource + Send + Sync,
    R::Draft: Send + Sync,
{
    pub form: RwSignal<R::Draft>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    editing_id: Option<i64>,
    collection: Collection<R>,
}

impl<R> Clone for DetailsViewModel<R>
where
    R: Resource + Send + Sync,
    R::Draft: Send + Sync,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for DetailsViewModel<R>
where
    R: Resource + Send + Sync,
    R::Draft: Send + Sync,
{
}

impl<R> DetailsViewModel<R>
where
    R: Resource + Send + Sync,
    R::Draft: Send + Sync + Default + for<'a> From<&'a R>,
{
    pub fn new(collection: Collection<R>, initial: Option<&R>) -> Self {
        Self {
            form: RwSignal::new(initial.map(|r| R::Draft::from(r)).unwrap_or_default()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            editing_id: initial.map(R::id),
            collection,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn title(&self) -> String {
        if self.is_edit_mode() {
            format!("Editar {}", R::LABEL)
        } else {
            format!("Nuevo registro: {}", R::LABEL)
        }
    }

    /// Validate, then create or update through the collection.
    /// `on_saved` runs once the server accepted the change.
    pub fn save_command(&self, on_saved: Callback<()>) {
        let draft = self.form.get_untracked();
        if let Err(msg) = R::validate(&draft) {
            self.error.set(Some(msg));
            return;
        }

        let this = *self;
        this.error.set(None);
        this.saving.set(true);
        spawn_local(async move {
            let result = match this.editing_id {
                Some(id) => this.collection.update(id, draft).await,
                None => this.collection.create(draft).await,
            };
            this.saving.set(false);
            match result {
                Ok(()) => on_saved.run(()),
                Err(e) => this.error.set(Some(e.to_string())),
            }
        });
    }
}
