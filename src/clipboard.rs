use anyhow::{Context, Result};
use arboard::Clipboard;
use std::time::Duration;

/// Whether copied text vanishes when the process that copied it exits.
/// True on X11 and Wayland, where the owning process serves the selection.
pub const SELECTION_NEEDS_OWNER: bool = cfg!(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
));

/// Destination for copied entry content.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The OS clipboard.
///
/// The `arboard::Clipboard` is opened on first use and kept for the lifetime
/// of the sink. On Linux the copied text is only served while that handle is
/// alive, so dropping it after every copy would empty the clipboard.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
    hold: Option<Duration>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink for short-lived processes. On Linux each copy blocks until
    /// another program takes the clipboard or `hold` runs out, so the text
    /// is still there after the process exits. Elsewhere it behaves like
    /// [`SystemClipboard::new`].
    pub fn holding(hold: Duration) -> Self {
        Self {
            clipboard: None,
            hold: Some(hold),
        }
    }

    pub fn hold(&self) -> Option<Duration> {
        self.hold
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.clipboard.is_none() {
            self.clipboard = Some(Clipboard::new().context("Failed to access system clipboard")?);
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            let copied = match self.hold {
                Some(hold) => set_and_hold(clipboard, text, hold),
                None => clipboard.set_text(text),
            };
            copied.context("Failed to copy text to clipboard")?;
        }
        Ok(())
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set_and_hold(clipboard: &mut Clipboard, text: &str, hold: Duration) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;
    use std::time::Instant;

    clipboard.set().wait_until(Instant::now() + hold).text(text)
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set_and_hold(clipboard: &mut Clipboard, text: &str, _hold: Duration) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}
