use super::item::{Entry, EntryId};
use crate::error::Error;

/// Change notification delivered to every subscriber after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Inserted { id: EntryId, index: usize },
    Removed { id: EntryId, index: usize },
    ContentChanged { id: EntryId },
}

impl StoreEvent {
    /// Inserts and removes change the set of titles; content edits do not.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Inserted { .. } | Self::Removed { .. })
    }

    pub fn id(&self) -> EntryId {
        match self {
            Self::Inserted { id, .. } | Self::Removed { id, .. } | Self::ContentChanged { id } => *id,
        }
    }
}

/// Subscriber to store changes.
///
/// Observers see the entries through a shared slice only, so a callback can
/// never mutate the store it is being notified by.
pub trait StoreObserver {
    fn on_change(&mut self, event: &StoreEvent, entries: &[Entry]);
}

impl<F> StoreObserver for F
where
    F: FnMut(&StoreEvent, &[Entry]),
{
    fn on_change(&mut self, event: &StoreEvent, entries: &[Entry]) {
        self(event, entries)
    }
}

/// Materialized copy of the store's titles and contents, detached from the
/// live entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub records: Vec<(String, String)>,
}

impl Snapshot {
    pub fn from_entries(entries: &[Entry]) -> Self {
        Self {
            records: entries
                .iter()
                .map(|entry| (entry.title.clone(), entry.content.clone()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded records. Nothing is emitted: a fresh store
    /// has no subscribers yet.
    pub fn from_records<I>(records: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut store = Self::new();
        for (title, content) in records {
            if store.contains_title(&title) {
                return Err(Error::DuplicateTitle(title));
            }
            store.entries.push(Entry::with_content(title, content));
        }
        Ok(store)
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    pub fn add(&mut self, entry: Entry) -> Result<EntryId, Error> {
        if self.contains_title(&entry.title) {
            return Err(Error::DuplicateTitle(entry.title));
        }

        let id = entry.id;
        let index = self.entries.len();
        self.entries.push(entry);
        self.notify(StoreEvent::Inserted { id, index });
        Ok(id)
    }

    pub fn remove(&mut self, id: EntryId) -> Result<Entry, Error> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let removed = self.entries.remove(index);
        self.notify(StoreEvent::Removed { id, index });
        Ok(removed)
    }

    pub fn find(&self, title: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.title == title)
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Replace an entry's content. Returns `Ok(false)` without notifying when
    /// the content is already equal.
    pub fn update_content(&mut self, id: EntryId, content: impl Into<String>) -> Result<bool, Error> {
        let content = content.into();
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        if entry.content == content {
            return Ok(false);
        }

        entry.content = content;
        self.notify(StoreEvent::ContentChanged { id });
        Ok(true)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.find(title).is_some()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_entries(&self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn notify(&mut self, event: StoreEvent) {
        let entries = &self.entries;
        for observer in &mut self.observers {
            observer.on_change(&event, entries);
        }
    }
}

impl std::fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStore")
            .field("entries", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}
