use crate::{
    assets::image::Background,
    catalog::template::TemplateCatalog,
    config,
    design::{
        state::{DesignState, Field},
        storage::SlotStorage,
    },
    foundation::error::{PosterError, PosterResult},
};

/// Result of [`DesignStore::load`] when no error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The persisted record replaced the live state.
    Loaded,
    /// No record has been saved yet; the live state is untouched.
    NotFound,
}

/// Blocking yes/no confirmation asked before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Owner of the live [`DesignState`] and its persisted checkpoint.
///
/// Saving and loading are explicit: edits never reach storage until [`DesignStore::save`] is
/// called, and a stored design never overwrites edits until [`DesignStore::load`] is called.
#[derive(Debug)]
pub struct DesignStore<S> {
    state: DesignState,
    storage: S,
}

impl<S: SlotStorage> DesignStore<S> {
    /// Start a session with a default design.
    pub fn new(storage: S) -> Self {
        Self {
            state: DesignState::default(),
            storage,
        }
    }

    pub fn state(&self) -> &DesignState {
        &self.state
    }

    /// Mutable access for collaborators that own fields outside [`Field`] (positions).
    pub fn state_mut(&mut self) -> &mut DesignState {
        &mut self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Set one field from raw UI input. See [`DesignState::update`].
    pub fn update(&mut self, field: Field, value: &str) -> bool {
        let changed = self.state.update(field, value);
        tracing::trace!(field = field.name(), changed, "field update");
        changed
    }

    /// Write the whole design to the persisted slot, replacing the previous checkpoint.
    #[tracing::instrument(skip(self))]
    pub fn save(&mut self) -> PosterResult<()> {
        let json = serde_json::to_string(&self.state)
            .map_err(|e| PosterError::storage(format!("serialize design: {e}")))?;
        self.storage.set(config::STORAGE_KEY, &json)?;
        tracing::debug!(bytes = json.len(), "design saved");
        Ok(())
    }

    /// Replace the live design with the persisted one.
    ///
    /// The live state changes only on [`LoadOutcome::Loaded`].
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self) -> PosterResult<LoadOutcome> {
        let Some(raw) = self.storage.get(config::STORAGE_KEY)? else {
            return Ok(LoadOutcome::NotFound);
        };

        let mut state: DesignState = serde_json::from_str(&raw).map_err(|e| {
            tracing::warn!(error = %e, "persisted design is unreadable");
            PosterError::malformed_state(e.to_string())
        })?;
        state.drop_stored_tint();
        self.state = state;
        Ok(LoadOutcome::Loaded)
    }

    /// Reset every field to its default after the user confirms. Storage is left alone, so the
    /// last saved design stays loadable.
    pub fn clear(&mut self, confirm: &mut dyn Confirm) -> bool {
        if !confirm.confirm(config::CLEAR_PROMPT) {
            return false;
        }
        self.state = DesignState::default();
        true
    }

    /// Overwrite the fields a template defines. Unknown ids change nothing.
    #[tracing::instrument(skip(self, catalog))]
    pub fn apply_template(&mut self, catalog: &TemplateCatalog, id: &str) -> bool {
        let Some(t) = catalog.find(id) else {
            tracing::debug!("unknown template");
            return false;
        };

        fn set_if_defined(slot: &mut String, v: Option<&String>) {
            if let Some(v) = v.filter(|v| !v.is_empty()) {
                slot.clone_from(v);
            }
        }

        let s = &mut self.state;
        s.template = t.id.clone();
        set_if_defined(&mut s.title, t.title.as_ref());
        set_if_defined(&mut s.subtitle, t.subtitle.as_ref());
        set_if_defined(&mut s.body, t.body.as_ref());
        s.color = t.color.clone();
        if let Some(px) = t.title_size.filter(|px| *px > 0) {
            s.title_size = px;
        }
        if !t.sample.as_str().is_empty() {
            s.background = Some(Background::Image(t.sample.clone()));
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/design/store.rs"]
mod tests;
