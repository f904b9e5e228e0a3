//! The browser-side entry point the controller calls into.
//!
//! Figures out what has focus, then either maps through the document tree
//! (rich editable regions) or talks to the field directly (inputs and
//! textareas). Compound edits on both paths go through `DomInput`.

use web_sys::Node;

use textmap_core::{
    EditAction, EditOutcome, InputSimulator, LinearRange, MapperConfig, PlatformError,
    SelectionPort, TextMapper, execute_edit, utf16_len,
};

use crate::dom::DomTree;
use crate::field::FieldElement;
use crate::input::DomInput;
use crate::selection::DomSelection;

/// What an operation ends up acting on.
#[derive(Debug, Clone)]
pub enum EditTarget {
    /// A form field, mapped through its value.
    Field(FieldElement),
    /// The editable anchor of a rich region.
    Rich(Node),
}

pub struct BrowserController {
    mapper: TextMapper<DomTree, DomSelection>,
}

impl Default for BrowserController {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserController {
    pub fn new() -> Self {
        Self::with_config(&MapperConfig::default())
    }

    pub fn with_config(config: &MapperConfig) -> Self {
        Self {
            mapper: TextMapper::with_config(DomTree, DomSelection, config),
        }
    }

    pub fn mapper(&self) -> &TextMapper<DomTree, DomSelection> {
        &self.mapper
    }

    /// Resolve `node` (or the focused element) to something editable.
    pub fn target(&self, node: Option<&Node>) -> Option<EditTarget> {
        let node = match node {
            Some(node) => node.clone(),
            None => self.mapper.selection().focused_node()?,
        };
        if let Some(field) = FieldElement::from_node(&node) {
            return Some(EditTarget::Field(field));
        }
        self.mapper.find_editable_anchor(&node).map(EditTarget::Rich)
    }

    /// Perceived text of `node`'s editable region, or of the focused one.
    pub fn source(&self, node: Option<&Node>) -> Option<String> {
        match self.target(node)? {
            EditTarget::Field(field) => Some(field.value()),
            EditTarget::Rich(anchor) => Some(self.mapper.extract_text(&anchor, None)),
        }
    }

    /// Caret offset in the focused region, 0 when there is none.
    pub fn cursor(&self) -> usize {
        match self.target(None) {
            Some(EditTarget::Field(field)) => field.selection_start().unwrap_or(0),
            Some(EditTarget::Rich(_)) => self.mapper.cursor(),
            None => {
                tracing::debug!(target: "textmap::controller", "nothing editable focused");
                0
            }
        }
    }

    pub fn set_cursor(&mut self, offset: usize, end: Option<usize>) -> Result<(), PlatformError> {
        match self.target(None) {
            Some(EditTarget::Field(field)) => field.set_selection(offset, end).map(|_| ()),
            Some(EditTarget::Rich(anchor)) => {
                self.mapper.set_cursor_in(&anchor, offset, end).map(|_| ())
            }
            None => {
                tracing::debug!(target: "textmap::controller", offset, "nothing editable focused, ignoring");
                Ok(())
            }
        }
    }

    pub fn insert_text(
        &mut self,
        offset: usize,
        text: &str,
    ) -> Result<Option<EditOutcome>, PlatformError> {
        self.edit(&EditAction::Insert {
            offset,
            text: text.to_string(),
        })
    }

    pub fn delete_range(
        &mut self,
        start: usize,
        end: usize,
    ) -> Result<Option<EditOutcome>, PlatformError> {
        self.edit(&EditAction::Delete {
            range: LinearRange::new(start, end),
        })
    }

    pub fn replace_range(
        &mut self,
        start: usize,
        end: usize,
        text: &str,
    ) -> Result<Option<EditOutcome>, PlatformError> {
        self.edit(&EditAction::Replace {
            range: LinearRange::new(start, end),
            text: text.to_string(),
        })
    }

    /// Run an edit against whatever has focus.
    pub fn edit(&mut self, action: &EditAction) -> Result<Option<EditOutcome>, PlatformError> {
        let mut input = DomInput::new()?;
        match self.target(None) {
            Some(EditTarget::Field(field)) => edit_field(&field, &mut input, action).map(Some),
            Some(EditTarget::Rich(_)) => execute_edit(&mut self.mapper, &mut input, action),
            None => {
                tracing::debug!(target: "textmap::controller", ?action, "nothing editable focused");
                Ok(None)
            }
        }
    }
}

/// The same caret-then-type sequence as `execute_edit`, over a field's own
/// selection.
fn edit_field<I: InputSimulator>(
    field: &FieldElement,
    input: &mut I,
    action: &EditAction,
) -> Result<EditOutcome, PlatformError> {
    let insert = |input: &mut I, offset: usize, text: &str| {
        let (start, _) = field.set_selection(offset, None)?;
        if !text.is_empty() {
            input.insert_text(text)?;
        }
        Ok::<_, PlatformError>(EditOutcome {
            cursor_before: start,
            cursor_after: start + utf16_len(text),
        })
    };
    let delete = |input: &mut I, range: LinearRange| {
        let range = range.normalize();
        let (end, _) = field.set_selection(range.end, None)?;
        let start = range.start.min(end);
        if end > start {
            input.delete_backward(end - start)?;
        }
        Ok::<_, PlatformError>(EditOutcome {
            cursor_before: end,
            cursor_after: start,
        })
    };

    match action {
        EditAction::Insert { offset, text } => insert(input, *offset, text),
        EditAction::Delete { range } => delete(input, *range),
        EditAction::Replace { range, text } => {
            let deleted = delete(input, *range)?;
            let inserted = insert(input, deleted.cursor_after, text)?;
            Ok(EditOutcome {
                cursor_before: deleted.cursor_before,
                cursor_after: inserted.cursor_after,
            })
        }
    }
}
