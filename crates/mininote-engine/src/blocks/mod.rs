//! Whole-document block model.
//!
//! A note is parsed into an ordered sequence of typed [`Block`]s (headings,
//! tasks, bullet items, fenced code, plain text, empty lines) and serialized
//! back to markdown by joining each block's canonical form with newlines.
//! Detection is line-oriented; nested lists, tables and inline links are not
//! modelled as structure and stay inside block text.

pub mod block;
pub mod parser;

pub use block::{Block, BlockId, BlockKind};
pub use parser::{blocks_to_markdown, parse};
