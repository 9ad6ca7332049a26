use crate::blocks::BlockId;

/// Result of applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Block holding focus after the command.
    pub focus: Option<BlockId>,
    /// Cursor byte offset within the focused block's content.
    pub cursor: usize,
    /// False when the command was a no-op (unknown id, sequence boundary).
    pub changed: bool,
    /// Document version after the command; bumped only on change.
    pub version: u64,
}
