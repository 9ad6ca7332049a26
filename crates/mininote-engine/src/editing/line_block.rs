use crate::blocks::BlockId;
use crate::blocks::parser::FENCE;

const UNCHECKED: &str = "- [ ]";
const CHECKED: &str = "- [x]";
const CHECKED_UPPER: &str = "- [X]";

/// One editable row of the note.
///
/// Usually a single source line; for a fenced code region the whole region
/// (fences included) lives in one block's `content`. Everything about the
/// block — task state, code-fence state — is derived from `content` on each
/// read, so predicates stay correct after any content change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBlock {
    pub id: BlockId,
    pub content: String,
}

impl LineBlock {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: BlockId::new(),
            content: content.into(),
        }
    }

    /// True when the row carries a task checkbox marker.
    pub fn is_task(&self) -> bool {
        let trimmed = self.content.trim();
        trimmed.starts_with(UNCHECKED)
            || trimmed.starts_with(CHECKED)
            || trimmed.starts_with(CHECKED_UPPER)
    }

    pub fn is_task_checked(&self) -> bool {
        let trimmed = self.content.trim();
        trimmed.starts_with(CHECKED) || trimmed.starts_with(CHECKED_UPPER)
    }

    /// Content with the leading checkbox marker stripped.
    ///
    /// Works on the untrimmed content and keeps trailing whitespace, since
    /// the row may be mid-edit. Content without a marker at the very start
    /// comes back unchanged.
    pub fn task_text(&self) -> &str {
        for marker in ["- [ ] ", "- [x] ", "- [X] "] {
            if let Some(rest) = self.content.strip_prefix(marker) {
                return rest;
            }
        }
        // marker with no following space yet
        for marker in [UNCHECKED, CHECKED, CHECKED_UPPER] {
            if let Some(rest) = self.content.strip_prefix(marker) {
                return rest;
            }
        }
        &self.content
    }

    /// True when the row opens a fenced code region.
    pub fn is_code_block(&self) -> bool {
        self.content.trim().starts_with(FENCE)
    }

    /// True when the grouped fence region has its closing fence: at least
    /// two lines, with the last line being or ending with a fence marker.
    pub fn is_code_block_closed(&self) -> bool {
        if !self.is_code_block() {
            return false;
        }
        let lines: Vec<&str> = self.content.split('\n').collect();
        if lines.len() < 2 {
            return false;
        }
        let last = lines[lines.len() - 1].trim();
        last == FENCE || last.ends_with(FENCE)
    }

    /// Flip the checkbox marker in place. The one in-place mutation a block
    /// supports; every occurrence of the marker text is rewritten.
    pub fn toggle_task(&mut self) {
        let trimmed = self.content.trim();
        if trimmed.starts_with(UNCHECKED) {
            self.content = self.content.replace(UNCHECKED, CHECKED);
        } else if trimmed.starts_with(CHECKED) || trimmed.starts_with(CHECKED_UPPER) {
            self.content = self
                .content
                .replace(CHECKED, UNCHECKED)
                .replace(CHECKED_UPPER, UNCHECKED);
        }
    }
}
