use crate::clipboard::ClipboardSink;
use crate::entry::{Entry, EntryId, EntryStore, is_valid_title};
use crate::error::Error;
use tracing::{debug, info, warn};

/// Applies user actions to the entry store.
///
/// Nothing else mutates the store in response to input. Saving and menu
/// rebuilds are not done here: they hang off the store's subscribers, so
/// every path that changes an entry gets them for free.
pub struct Controller {
    store: EntryStore,
    selected: Option<EntryId>,
    clipboard: Box<dyn ClipboardSink>,
}

impl Controller {
    pub fn new(store: EntryStore, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self {
            store,
            selected: None,
            clipboard,
        }
    }

    /// Add an entry with empty content. Blank and already-used titles are
    /// ignored and yield `None`.
    pub fn add_entry(&mut self, title: &str) -> Option<EntryId> {
        if !is_valid_title(title) {
            debug!("Ignoring entry with blank title");
            return None;
        }

        match self.store.add(Entry::new(title)) {
            Ok(id) => {
                info!(title = %title, "Entry added");
                Some(id)
            }
            Err(Error::DuplicateTitle(title)) => {
                debug!(title = %title, "Ignoring duplicate entry title");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to add entry");
                None
            }
        }
    }

    pub fn remove_entry(&mut self, id: EntryId) -> bool {
        match self.store.remove(id) {
            Ok(entry) => {
                if self.selected == Some(id) {
                    self.selected = None;
                }
                info!(title = %entry.title, "Entry removed");
                true
            }
            Err(e) => {
                debug!(error = %e, "Nothing to remove");
                false
            }
        }
    }

    /// Returns `true` only when the selection actually changed.
    pub fn select_entry(&mut self, id: EntryId) -> bool {
        if self.selected == Some(id) || self.store.get(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Returns `true` when the content changed.
    pub fn edit_content(&mut self, id: EntryId, content: impl Into<String>) -> bool {
        match self.store.update_content(id, content) {
            Ok(changed) => changed,
            Err(e) => {
                warn!(error = %e, "Failed to edit entry");
                false
            }
        }
    }

    /// Copy the content of the entry behind a menu row. A key that no longer
    /// resolves (the menu can briefly trail a removal) is ignored.
    pub fn activate_menu_item(&mut self, activation_key: &str) -> bool {
        let Some(entry) = self.store.find(activation_key) else {
            debug!(key = %activation_key, "Menu item has no matching entry");
            return false;
        };

        if let Err(e) = self.clipboard.set_text(&entry.content) {
            warn!(error = %e, title = %entry.title, "Clipboard write failed");
            return false;
        }
        info!(title = %entry.title, "Copied entry to clipboard");
        true
    }

    pub fn entries(&self) -> &[Entry] {
        self.store.entries()
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn selected(&self) -> Option<EntryId> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.selected.and_then(|id| self.store.get(id))
    }
}
