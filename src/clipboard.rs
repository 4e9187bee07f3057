use anyhow::{Result, anyhow};
use arboard::Clipboard;

/// Put `text` on the system clipboard
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| anyhow!("Clipboard unavailable: {}", e))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| anyhow!("Failed to copy to clipboard: {}", e))?;
    Ok(())
}
