use crate::errors::DirClipError;
use arboard::Clipboard;
use tracing::{debug, trace};

/// A system clipboard the sink can write to.
pub trait ClipboardBackend {
    /// Whether an interactive display, and therefore a clipboard, exists.
    fn is_available(&self) -> bool;

    fn set_text(&mut self, text: &str) -> Result<(), DirClipError>;
}

/// Clipboard backed by `arboard`. The handle is kept open for the life of the
/// value, since on X11 the owning process has to stay around to serve the
/// selection.
#[derive(Default)]
pub struct ArboardClipboard {
    clipboard: Option<Clipboard>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        ArboardClipboard { clipboard: None }
    }
}

impl ClipboardBackend for ArboardClipboard {
    fn is_available(&self) -> bool {
        display_available()
    }

    fn set_text(&mut self, text: &str) -> Result<(), DirClipError> {
        let clipboard = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard,
            None => {
                debug!("Initializing clipboard");
                let clipboard = Clipboard::new()
                    .map_err(|e| DirClipError::ClipboardInitError(e.to_string()))?;
                self.clipboard.insert(clipboard)
            }
        };

        trace!("Setting {} bytes of clipboard text", text.len());
        clipboard
            .set_text(text)
            .map_err(|e| DirClipError::ClipboardWriteError(e.to_string()))
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
pub fn display_available() -> bool {
    env_is_set("DISPLAY") || env_is_set("WAYLAND_DISPLAY")
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
pub fn display_available() -> bool {
    true
}

#[cfg(all(unix, not(target_os = "macos")))]
pub(crate) fn env_is_set(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|value| !value.is_empty())
}
