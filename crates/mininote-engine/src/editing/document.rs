use crate::blocks::BlockId;
use crate::blocks::parser::FENCE;
use crate::editing::commands::apply_command;
use crate::editing::{Cmd, LineBlock, Patch};

/// The owned editing session: an ordered line-block sequence plus the focus
/// and cursor state the host UI renders from.
///
/// All mutation happens through [`Document::apply`]; each applied command is
/// atomic and its focus/cursor effects are visible as soon as it returns.
/// The version counter bumps on every state change for cheap change
/// detection by the host.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) blocks: Vec<LineBlock>,
    pub(crate) focused: Option<BlockId>,
    pub(crate) cursor: usize,
    pub(crate) version: u64,
}

impl Document {
    /// Build a document from note text, one block per line.
    ///
    /// A line whose trimmed form opens a code fence starts a group running
    /// through the first later line that is, or ends with, a fence marker —
    /// that whole region becomes a single block. Without a closer the group
    /// runs to the last line and stays open.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut blocks = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            if lines[i].trim().starts_with(FENCE) {
                let mut end = i + 1;
                while end < lines.len() {
                    let trimmed = lines[end].trim();
                    if trimmed == FENCE || trimmed.ends_with(FENCE) {
                        break;
                    }
                    end += 1;
                }
                let last = end.min(lines.len() - 1);
                blocks.push(LineBlock::new(lines[i..=last].join("\n")));
                i = last + 1;
            } else {
                blocks.push(LineBlock::new(lines[i]));
                i += 1;
            }
        }

        let focused = blocks.first().map(|b| b.id);
        Self {
            blocks,
            focused,
            cursor: 0,
            version: 0,
        }
    }

    /// Serialize back to note text by joining block contents with newlines.
    pub fn to_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Apply a command and report the resulting focus, cursor and version.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        apply_command(self, cmd)
    }

    pub fn blocks(&self) -> &[LineBlock] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&LineBlock> {
        self.index_of(id).map(|idx| &self.blocks[idx])
    }

    pub fn focused(&self) -> Option<BlockId> {
        self.focused
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub(crate) fn set_focus(&mut self, id: BlockId, cursor: usize) {
        self.focused = Some(id);
        self.cursor = cursor;
    }

    pub(crate) fn changed(&mut self) -> Patch {
        self.version += 1;
        Patch {
            focus: self.focused,
            cursor: self.cursor,
            changed: true,
            version: self.version,
        }
    }

    pub(crate) fn unchanged(&self) -> Patch {
        Patch {
            focus: self.focused,
            cursor: self.cursor,
            changed: false,
            version: self.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn contents(doc: &Document) -> Vec<&str> {
        doc.blocks().iter().map(|b| b.content.as_str()).collect()
    }

    #[test]
    fn splits_one_block_per_line() {
        let doc = Document::from_text("a\nb\n\nc");
        assert_eq!(contents(&doc), vec!["a", "b", "", "c"]);
    }

    #[test]
    fn empty_text_gives_one_empty_block() {
        let doc = Document::from_text("");
        assert_eq!(contents(&doc), vec![""]);
        assert_eq!(doc.focused(), Some(doc.blocks()[0].id));
    }

    #[test]
    fn trailing_newline_keeps_its_empty_line() {
        let doc = Document::from_text("a\n");
        assert_eq!(contents(&doc), vec!["a", ""]);
    }

    #[test]
    fn groups_fenced_region_into_one_block() {
        let doc = Document::from_text("a\n```\nline1\nline2\n```\nb");
        assert_eq!(contents(&doc), vec!["a", "```\nline1\nline2\n```", "b"]);
        let fence = &doc.blocks()[1];
        assert!(fence.is_code_block());
        assert!(fence.is_code_block_closed());
    }

    #[test]
    fn unterminated_fence_groups_to_last_line_and_stays_open() {
        let doc = Document::from_text("a\n```js\nstill typing");
        assert_eq!(contents(&doc), vec!["a", "```js\nstill typing"]);
        let fence = &doc.blocks()[1];
        assert!(fence.is_code_block());
        assert!(!fence.is_code_block_closed());
    }

    #[test]
    fn round_trips_through_to_text() {
        let text = "# head\n- [ ] task\n```rs\nlet a = 1;\n```\ntail\n";
        let doc = Document::from_text(text);
        assert_eq!(doc.to_text(), text);
    }

    #[test]
    fn block_ids_are_unique() {
        let doc = Document::from_text("a\nb\nc\n```\nx\n```");
        let ids: std::collections::HashSet<_> = doc.blocks().iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), doc.blocks().len());
    }
}
