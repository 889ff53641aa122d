use super::controller::Controller;
use crate::clipboard::ClipboardSink;
use crate::entry::EntryStore;
use crate::error::Error;
use crate::menu::{MenuHandle, MenuRefresh};
use crate::storage::{AutoSave, PersistenceWriter, SaveMode, load_entries, preserve_corrupt_file};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Everything that lives from startup to shutdown: the controller with its
/// store, the tray menu it keeps up to date, and the persistence writer.
pub struct AppContext {
    controller: Controller,
    menu: MenuHandle,
    writer: PersistenceWriter,
    startup_notice: Option<String>,
}

impl AppContext {
    /// Load the entries file and wire up saving and the menu.
    ///
    /// Loading is synchronous and finishes before this returns, so callers
    /// never observe a half-loaded store. A corrupt file does not fail
    /// startup: the store starts empty and [`AppContext::startup_notice`]
    /// explains what happened.
    pub fn init(
        entries_path: PathBuf,
        save_mode: SaveMode,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Result<Self> {
        let (records, startup_notice) = match load_entries(&entries_path) {
            Ok(records) => (records, None),
            Err(e) if e.is_corrupt() => {
                error!(error = %e, "Entries file is corrupt, starting empty");
                (Vec::new(), Some(corrupt_notice(&entries_path, &e)))
            }
            Err(e) => {
                warn!(error = %e, "Could not read entries file, starting empty");
                (Vec::new(), None)
            }
        };

        let mut store = EntryStore::from_records(records).context("Failed to build entry store")?;
        info!(entries = store.len(), path = %entries_path.display(), "Entries loaded");

        let writer = PersistenceWriter::spawn(entries_path, save_mode)
            .context("Failed to start persistence writer")?;
        let menu = MenuHandle::new();

        let refresh = MenuRefresh::new(menu.clone(), store.entries());
        store.subscribe(Box::new(refresh));
        store.subscribe(Box::new(AutoSave::new(writer.queue())));

        Ok(Self {
            controller: Controller::new(store, clipboard),
            menu,
            writer,
            startup_notice,
        })
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn menu(&self) -> &MenuHandle {
        &self.menu
    }

    pub fn entries_path(&self) -> &Path {
        self.writer.path()
    }

    pub fn startup_notice(&self) -> Option<&str> {
        self.startup_notice.as_deref()
    }

    pub fn take_startup_notice(&mut self) -> Option<String> {
        self.startup_notice.take()
    }

    pub fn drain_save_errors(&self) -> Vec<Error> {
        self.writer.drain_errors()
    }

    /// Flush pending saves and stop the writer. Returns save errors nobody
    /// has drained yet.
    pub fn shutdown(self) -> Vec<Error> {
        let Self {
            controller, writer, ..
        } = self;
        drop(controller);
        let errors = writer.shutdown();
        info!(errors = errors.len(), "Shut down");
        errors
    }
}

fn corrupt_notice(path: &Path, err: &Error) -> String {
    match preserve_corrupt_file(path) {
        Ok(backup) => format!(
            "{err}\n\nStarting with an empty list. The unreadable file was copied to {}.",
            backup.display()
        ),
        Err(copy_err) => {
            error!(error = %copy_err, "Could not preserve corrupt entries file");
            format!(
                "{err}\n\nStarting with an empty list. The file could not be backed up ({copy_err}); \
                 adding or editing entries will overwrite it."
            )
        }
    }
}
