//! Write-only clipboard access.

/// Destination for copied drawing text.
///
/// Writes are fire-and-forget: failures are logged by the implementation
/// and never block further input.
pub trait Clipboard {
    fn set_text(&mut self, text: &str);
}

/// Clipboard that keeps the last written text in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last text written, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
}

/// The operating system clipboard.
#[cfg(feature = "native")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

#[cfg(feature = "native")]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text.to_string()) {
                    log::error!("Failed to copy text to clipboard: {}", e);
                } else {
                    log::info!("Copied {} bytes to clipboard", text.len());
                }
            }
            Err(e) => log::error!("Failed to access clipboard: {}", e),
        }
    }
}
