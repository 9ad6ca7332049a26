use crate::blocks::BlockId;
use crate::blocks::parser::FENCE;
use crate::editing::{Document, LineBlock, Patch};

/// Commands that can be applied to the document.
///
/// Each corresponds to one discrete editor event: Enter splits, Backspace at
/// the start of a row merges or unmarks, Up/Down at a row edge move focus,
/// a checkbox click toggles. Commands against an id not in the sequence, or
/// at a sequence boundary, apply as no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Enter pressed with the cursor between `before` and `after`.
    SplitBlock {
        id: BlockId,
        before: String,
        after: String,
    },
    /// Backspace with the cursor at the start of a plain row.
    MergeWithPrevious { id: BlockId },
    /// Up at the first line of a row; `column` is the cursor byte offset.
    MoveFocusUp { id: BlockId, column: usize },
    /// Down at the last line of a row.
    MoveFocusDown { id: BlockId, column: usize },
    /// Checkbox clicked on a task row.
    ToggleTask { id: BlockId },
    /// Backspace at offset 0: unmark a task first, merge otherwise.
    BackspaceAtStart { id: BlockId },
}

pub(crate) fn apply_command(doc: &mut Document, cmd: Cmd) -> Patch {
    match cmd {
        Cmd::SplitBlock { id, before, after } => split_block(doc, id, before, after),
        Cmd::MergeWithPrevious { id } => merge_with_previous(doc, id),
        Cmd::MoveFocusUp { id, column } => move_focus(doc, id, column, -1),
        Cmd::MoveFocusDown { id, column } => move_focus(doc, id, column, 1),
        Cmd::ToggleTask { id } => toggle_task(doc, id),
        Cmd::BackspaceAtStart { id } => backspace_at_start(doc, id),
    }
}

fn split_block(doc: &mut Document, id: BlockId, before: String, after: String) -> Patch {
    let Some(idx) = doc.index_of(id) else {
        return doc.unchanged();
    };

    let block = &mut doc.blocks[idx];
    if block.is_code_block() && !block.is_code_block_closed() {
        // Splitting inside an in-progress fence would fragment it. Unless the
        // cursor sits at the very end of a completed fence pair, the newline
        // goes into the block itself and the fence keeps growing.
        let cursor_at_end = after.trim().is_empty();
        if !cursor_at_end || !fence_pair_complete(&format!("{before}{after}")) {
            block.content = format!("{before}\n{after}");
            let cursor = before.len() + 1;
            doc.set_focus(id, cursor);
            return doc.changed();
        }
    }

    block.content = before;
    let new_block = LineBlock::new(after);
    let new_id = new_block.id;
    doc.blocks.insert(idx + 1, new_block);
    doc.set_focus(new_id, 0);
    doc.changed()
}

/// Whether a single-row fence region reads as complete.
///
/// Deliberately a heuristic, not a fence grammar: six backticks total with a
/// fence marker at both trimmed ends counts as closed. A four-backtick opener
/// is not distinguished.
fn fence_pair_complete(content: &str) -> bool {
    let trimmed = content.trim();
    content.matches('`').count() >= 6 && trimmed.starts_with(FENCE) && trimmed.ends_with(FENCE)
}

fn merge_with_previous(doc: &mut Document, id: BlockId) -> Patch {
    let Some(idx) = doc.index_of(id) else {
        return doc.unchanged();
    };
    if idx == 0 {
        return doc.unchanged();
    }

    let removed = doc.blocks.remove(idx);
    let previous = &mut doc.blocks[idx - 1];
    let junction = previous.content.len();
    previous.content.push_str(&removed.content);

    let focus = previous.id;
    doc.set_focus(focus, junction);
    doc.changed()
}

fn move_focus(doc: &mut Document, id: BlockId, column: usize, step: isize) -> Patch {
    let Some(idx) = doc.index_of(id) else {
        return doc.unchanged();
    };
    let Some(target) = idx
        .checked_add_signed(step)
        .filter(|&t| t < doc.blocks.len())
    else {
        return doc.unchanged();
    };

    let block = &doc.blocks[target];
    let focus = block.id;
    let cursor = column.min(block.content.len());
    doc.set_focus(focus, cursor);
    doc.changed()
}

fn toggle_task(doc: &mut Document, id: BlockId) -> Patch {
    let Some(idx) = doc.index_of(id) else {
        return doc.unchanged();
    };
    if !doc.blocks[idx].is_task() {
        return doc.unchanged();
    }
    doc.blocks[idx].toggle_task();
    doc.changed()
}

fn backspace_at_start(doc: &mut Document, id: BlockId) -> Patch {
    let Some(idx) = doc.index_of(id) else {
        return doc.unchanged();
    };

    let block = &mut doc.blocks[idx];
    if block.is_task() {
        let stripped = block.task_text().to_string();
        // An indented marker never strips, so fall through to the merge
        // instead of unmarking forever.
        if stripped != block.content {
            block.content = stripped;
            doc.set_focus(id, 0);
            return doc.changed();
        }
    }

    merge_with_previous(doc, id)
}
