use servo_unity_common::PlatformError;

/// System clipboard access for the engine's clipboard callbacks.
///
/// Opens a fresh `arboard` handle per call, so it can be used from any
/// engine thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostClipboard;

impl HostClipboard {
    /// Reads text from the system clipboard.
    pub fn read_text(&self) -> Result<String, PlatformError> {
        let mut inner = open()?;
        inner
            .get_text()
            .map_err(|e| PlatformError::ClipboardError(e.to_string()))
    }

    /// Writes text to the system clipboard.
    pub fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        let mut inner = open()?;
        inner
            .set_text(text.to_owned())
            .map_err(|e| PlatformError::ClipboardError(e.to_string()))
    }
}

fn open() -> Result<arboard::Clipboard, PlatformError> {
    arboard::Clipboard::new().map_err(|e| PlatformError::ClipboardError(e.to_string()))
}
