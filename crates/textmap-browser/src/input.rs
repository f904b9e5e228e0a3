//! Keystroke simulation through `document.execCommand`.
//!
//! `execCommand` is deprecated but it is still the only way to edit at the
//! caret that goes through the browser's own editing path: it fires
//! `beforeinput`/`input` and lands on the native undo stack, for rich
//! regions and form fields alike.

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use textmap_core::{InputSimulator, PlatformError};

use crate::document;

#[derive(Debug, Clone)]
pub struct DomInput {
    document: HtmlDocument,
}

impl DomInput {
    pub fn new() -> Result<Self, PlatformError> {
        let document = document()?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| "document is not an HtmlDocument")?;
        Ok(Self { document })
    }

    fn exec(&self, command: &str, value: Option<&str>) -> Result<(), PlatformError> {
        let handled = match value {
            Some(value) => self
                .document
                .exec_command_with_show_ui_and_value(command, false, value),
            None => self.document.exec_command(command),
        }
        .map_err(|e| format!("execCommand({}) failed: {:?}", command, e))?;

        if handled {
            Ok(())
        } else {
            tracing::warn!(target: "textmap::input", command, "execCommand not handled");
            Err(format!("execCommand({}) was not handled", command).into())
        }
    }
}

impl InputSimulator for DomInput {
    fn insert_text(&mut self, text: &str) -> Result<(), PlatformError> {
        self.exec("insertText", Some(text))
    }

    fn delete_backward(&mut self, count: usize) -> Result<(), PlatformError> {
        for _ in 0..count {
            self.exec("delete", None)?;
        }
        Ok(())
    }
}
