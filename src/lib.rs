//! tray-clip: named text snippets, copied to the clipboard from a tray-style
//! menu.
//!
//! The entry store is the single source of truth. Everything derived from it
//! hangs off its change notifications: the background writer persists a
//! snapshot after every change, and the tray menu is re-projected whenever an
//! entry is added or removed.

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod entry;
pub mod error;
pub mod logging;
pub mod menu;
pub mod storage;
pub mod ui;
pub mod utils;
