//! Compound edits built from cursor placement plus simulated input.
//!
//! The mapper only decides where the caret goes before and after. Typing and
//! deleting are requested from an `InputSimulator` so the host's own editing
//! machinery (undo stack, input events, framework state) sees a normal
//! keystroke.

use serde::{Deserialize, Serialize};

use crate::mapper::TextMapper;
use crate::platform::{InputSimulator, PlatformError, SelectionPort};
use crate::text::utf16_len;
use crate::tree::DocumentTree;
use crate::types::LinearRange;

/// An edit expressed in linear offsets of the focused editable region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditAction {
    /// Type `text` at `offset`.
    Insert { offset: usize, text: String },
    /// Remove the text in `range`.
    Delete { range: LinearRange },
    /// Remove `range`, then type `text` where it started.
    Replace { range: LinearRange, text: String },
}

/// Where an edit put the caret, and where the caret should be once the host
/// has applied the simulated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOutcome {
    pub cursor_before: usize,
    pub cursor_after: usize,
}

/// Run an edit against the focused editable region.
///
/// Returns `Ok(None)` when nothing editable has focus.
pub fn execute_edit<T, S, I>(
    mapper: &mut TextMapper<T, S>,
    input: &mut I,
    action: &EditAction,
) -> Result<Option<EditOutcome>, PlatformError>
where
    T: DocumentTree,
    S: SelectionPort<T::Node>,
    I: InputSimulator,
{
    let Some(anchor) = mapper.focused_anchor() else {
        tracing::debug!(target: "textmap::edit", ?action, "no focused editable region");
        return Ok(None);
    };

    let outcome = match action {
        EditAction::Insert { offset, text } => execute_insert(mapper, input, &anchor, *offset, text)?,
        EditAction::Delete { range } => execute_delete(mapper, input, &anchor, *range)?,
        EditAction::Replace { range, text } => {
            let deleted = execute_delete(mapper, input, &anchor, *range)?;
            let inserted = execute_insert(mapper, input, &anchor, deleted.cursor_after, text)?;
            EditOutcome {
                cursor_before: deleted.cursor_before,
                cursor_after: inserted.cursor_after,
            }
        }
    };

    tracing::trace!(
        target: "textmap::edit",
        ?action,
        before = outcome.cursor_before,
        after = outcome.cursor_after,
        "edit requested"
    );
    Ok(Some(outcome))
}

fn execute_insert<T, S, I>(
    mapper: &mut TextMapper<T, S>,
    input: &mut I,
    anchor: &T::Node,
    offset: usize,
    text: &str,
) -> Result<EditOutcome, PlatformError>
where
    T: DocumentTree,
    S: SelectionPort<T::Node>,
    I: InputSimulator,
{
    let located = mapper.set_cursor_in(anchor, offset, None)?;
    let start = located.range.start;
    if !text.is_empty() {
        input.insert_text(text)?;
    }
    Ok(EditOutcome {
        cursor_before: start,
        cursor_after: start + utf16_len(text),
    })
}

fn execute_delete<T, S, I>(
    mapper: &mut TextMapper<T, S>,
    input: &mut I,
    anchor: &T::Node,
    range: LinearRange,
) -> Result<EditOutcome, PlatformError>
where
    T: DocumentTree,
    S: SelectionPort<T::Node>,
    I: InputSimulator,
{
    let range = range.normalize();
    // Backspacing from the end removes exactly the range, so the caret goes
    // there first.
    let located = mapper.set_cursor_in(anchor, range.end, None)?;
    let end = located.range.end;
    let start = range.start.min(end);
    let count = end - start;
    if count > 0 {
        input.delete_backward(count)?;
    }
    Ok(EditOutcome {
        cursor_before: end,
        cursor_after: start,
    })
}

impl<T, S> TextMapper<T, S>
where
    T: DocumentTree,
    S: SelectionPort<T::Node>,
{
    /// Type `text` at `offset` in the focused region.
    pub fn insert_text<I: InputSimulator>(
        &mut self,
        input: &mut I,
        offset: usize,
        text: &str,
    ) -> Result<Option<EditOutcome>, PlatformError> {
        let action = EditAction::Insert {
            offset,
            text: text.to_string(),
        };
        execute_edit(self, input, &action)
    }

    /// Delete `start..end` in the focused region.
    pub fn delete_range<I: InputSimulator>(
        &mut self,
        input: &mut I,
        start: usize,
        end: usize,
    ) -> Result<Option<EditOutcome>, PlatformError> {
        let action = EditAction::Delete {
            range: LinearRange::new(start, end),
        };
        execute_edit(self, input, &action)
    }

    /// Replace `start..end` in the focused region with `text`.
    pub fn replace_range<I: InputSimulator>(
        &mut self,
        input: &mut I,
        start: usize,
        end: usize,
        text: &str,
    ) -> Result<Option<EditOutcome>, PlatformError> {
        let action = EditAction::Replace {
            range: LinearRange::new(start, end),
            text: text.to_string(),
        };
        execute_edit(self, input, &action)
    }
}
