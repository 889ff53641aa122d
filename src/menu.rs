//! Tray menu projection.
//!
//! The menu is never patched in place: every structural change to the store
//! recomputes it from the entries and replaces the previous rows wholesale.

use crate::entry::{Entry, StoreEvent, StoreObserver};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub activation_key: String,
}

pub fn project(entries: &[Entry]) -> Vec<MenuItem> {
    entries
        .iter()
        .map(|entry| MenuItem {
            label: entry.title.clone(),
            activation_key: entry.title.clone(),
        })
        .collect()
}

/// A native menu that can have its rows replaced.
pub trait TrayMenu {
    fn replace_items(&mut self, items: Vec<MenuItem>);
}

/// In-process menu shared between the store subscriber and the UI that
/// renders it. Single-threaded.
#[derive(Debug, Clone, Default)]
pub struct MenuHandle {
    items: Rc<RefCell<Vec<MenuItem>>>,
}

impl MenuHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Ref<'_, Vec<MenuItem>> {
        self.items.borrow()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn activation_key(&self, index: usize) -> Option<String> {
        self.items
            .borrow()
            .get(index)
            .map(|item| item.activation_key.clone())
    }
}

impl TrayMenu for MenuHandle {
    fn replace_items(&mut self, items: Vec<MenuItem>) {
        *self.items.borrow_mut() = items;
    }
}

/// Store subscriber keeping a [`TrayMenu`] in step with the entry titles.
pub struct MenuRefresh<M: TrayMenu> {
    menu: M,
}

impl<M: TrayMenu> MenuRefresh<M> {
    /// Projects the current entries immediately so the menu is populated
    /// before the first change arrives.
    pub fn new(mut menu: M, entries: &[Entry]) -> Self {
        menu.replace_items(project(entries));
        Self { menu }
    }
}

impl<M: TrayMenu> StoreObserver for MenuRefresh<M> {
    fn on_change(&mut self, event: &StoreEvent, entries: &[Entry]) {
        if !event.is_structural() {
            return;
        }
        let items = project(entries);
        debug!(rows = items.len(), "Rebuilding tray menu");
        self.menu.replace_items(items);
    }
}
