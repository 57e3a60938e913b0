//! Copying text out of the app, for pasting summaries into invoices or sheets

use anyhow::{Context, Result};
use tracing::debug;

/// Somewhere text can be copied to
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard, opened on first use
///
/// The handle is kept for the life of the app: on X11 the copied text is only
/// served while it exists.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
            debug!("Opened system clipboard");
            self.inner = Some(clipboard);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard
                .set_text(text.to_owned())
                .context("Could not set clipboard text")?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use super::ClipboardSink;
    use anyhow::{bail, Result};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Remembers copied text; clones share the same log
    #[derive(Debug, Clone, Default)]
    pub struct RecordingClipboard {
        pub copied: Rc<RefCell<Vec<String>>>,
        pub fail: Rc<Cell<bool>>,
    }

    impl ClipboardSink for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.fail.get() {
                bail!("no display");
            }
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }
}
