//! Interactive editing core.
//!
//! The editor works on a flat sequence of [`LineBlock`]s — one per source
//! line, except that a fenced code region is grouped into a single block so
//! it is edited and navigated as one unit. All edits flow through the
//! [`Cmd`] enum: [`Document::apply`] executes a command synchronously and
//! returns a [`Patch`] describing the resulting focus, cursor and version.
//!
//! Unknown ids and sequence boundaries are no-ops, never errors; the caller
//! owns the document and no state is shared behind its back.

pub mod commands;
pub mod document;
pub mod line_block;
pub mod patch;

pub use commands::Cmd;
pub use document::Document;
pub use line_block::LineBlock;
pub use patch::Patch;
