use anyhow::Context;
use arboard::Clipboard as SystemHandle;
use twinlens_core::Clipboard;

/// Writes through the OS clipboard, opening a fresh handle per write
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write(&self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = SystemHandle::new().context("Failed to open clipboard")?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to write clipboard")?;
        tracing::debug!("Copied {} chars to clipboard", text.len());
        Ok(())
    }
}
