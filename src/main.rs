use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tray_clip::app::{AppContext, AppState};
use tray_clip::cli::{Cli, Commands};
use tray_clip::clipboard::{SELECTION_NEEDS_OWNER, SystemClipboard};
use tray_clip::config::Config;
use tray_clip::entry::is_valid_title;
use tray_clip::error::Error;
use tray_clip::logging::{init_file_logging, init_stderr_logging};
use tray_clip::ui::{self, theme::Theme};
use tray_clip::utils::paths::get_log_path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let entries_path = match cli.file {
        Some(path) => path,
        None => config.entries_path()?,
    };

    match cli.command {
        None => run_interactive(&config, entries_path),
        Some(Commands::Path) => {
            println!("{}", entries_path.display());
            Ok(())
        }
        Some(command) => {
            init_stderr_logging();
            run_command(command, &config, entries_path)
        }
    }
}

fn run_interactive(config: &Config, entries_path: PathBuf) -> Result<()> {
    match get_log_path().and_then(|path| init_file_logging(&path)) {
        Ok(()) => {}
        Err(e) => eprintln!("warning: logging disabled: {e:#}"),
    }

    // Loads synchronously; the UI only starts once the store is complete.
    let ctx = AppContext::init(entries_path, config.save_mode(), Box::new(SystemClipboard::new()))?;
    let mut state = AppState::new(ctx, Theme::from_config(config), config.status_timeout());

    let result = ui::run_tui(&mut state);

    let errors = state.ctx.shutdown();
    for e in &errors {
        eprintln!("error: {e}");
    }

    result
}

fn run_command(command: Commands, config: &Config, entries_path: PathBuf) -> Result<()> {
    // The process exits right after a copy, so the clipboard has to be held.
    let clipboard = match command {
        Commands::Copy { .. } => SystemClipboard::holding(config.copy_hold()),
        _ => SystemClipboard::new(),
    };
    let mut ctx = AppContext::init(entries_path, config.save_mode(), Box::new(clipboard))?;

    if let Some(notice) = ctx.take_startup_notice() {
        eprintln!("warning: {notice}\n");
    }

    let controller = ctx.controller_mut();

    match command {
        Commands::Add { title, content } => {
            if !is_valid_title(&title) {
                bail!("Title must not be empty");
            }
            let Some(id) = controller.add_entry(&title) else {
                bail!("An entry titled '{title}' already exists");
            };
            if let Some(content) = content {
                controller.edit_content(id, content);
            }
            println!("✓ Added '{title}'");
        }
        Commands::List => {
            if controller.entries().is_empty() {
                println!("No entries yet.");
            }
            for entry in controller.entries() {
                let more = if entry.is_multiline() { " ↵" } else { "" };
                println!("{:<24} {}{more}", entry.title, entry.preview());
            }
        }
        Commands::Show { title } => {
            let entry = controller.store().find(&title).ok_or_else(|| not_found(&title))?;
            println!("{}", entry.content);
        }
        Commands::Copy { title } => {
            if controller.store().find(&title).is_none() {
                return Err(not_found(&title));
            }
            if SELECTION_NEEDS_OWNER {
                eprintln!(
                    "Keeping '{title}' on the clipboard for up to {}s, or until something else is copied...",
                    config.copy_hold().as_secs()
                );
            }
            if !controller.activate_menu_item(&title) {
                bail!("Failed to copy '{title}' to the clipboard");
            }
            println!("✓ Copied '{title}'");
        }
        Commands::Set { title, content } => {
            let id = controller
                .store()
                .find(&title)
                .map(|entry| entry.id)
                .ok_or_else(|| not_found(&title))?;
            if controller.edit_content(id, content) {
                println!("✓ Updated '{title}'");
            } else {
                println!("'{title}' is unchanged");
            }
        }
        Commands::Remove { title } => {
            let id = controller
                .store()
                .find(&title)
                .map(|entry| entry.id)
                .ok_or_else(|| not_found(&title))?;
            controller.remove_entry(id);
            println!("✓ Removed '{title}'");
        }
        Commands::Path => unreachable!("handled before the store is opened"),
    }

    // Saves run in the background; wait for them before exiting.
    if let Some(e) = ctx.shutdown().into_iter().next() {
        return Err(e).context("Failed to save entries");
    }

    Ok(())
}

fn not_found(title: &str) -> anyhow::Error {
    Error::NotFound(title.to_string()).into()
}
