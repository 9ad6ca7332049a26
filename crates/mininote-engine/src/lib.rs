pub mod blocks;
pub mod editing;

// Re-export key types for easier usage
pub use blocks::{Block, BlockId, BlockKind, blocks_to_markdown, parse};
pub use editing::{Cmd, Document, LineBlock, Patch};
