use serde::Serialize;
use uuid::Uuid;

/// Stable identifier for a block within one in-memory sequence.
///
/// Assigned when a block is created; re-parsing the same text assigns fresh
/// ids. Identity is not content-addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BlockId(Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

/// A block of note content with its stable identity.
///
/// The id lives beside the kind rather than inside each enum arm, so callers
/// can read it without destructuring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// The typed content of a block, without its identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockKind {
    Text {
        content: String,
    },
    Heading {
        /// Always in `1..=6`; the parser clamps deeper headings.
        level: u8,
        content: String,
    },
    Task {
        checked: bool,
        content: String,
    },
    BulletList {
        content: String,
    },
    CodeBlock {
        /// Tag following the opening fence, trimmed. `None` when the fence
        /// line is exactly three backticks.
        language: Option<String>,
        content: String,
    },
    Empty,
}

impl Block {
    /// Create a block with a freshly generated id.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: BlockId::new(),
            kind,
        }
    }

    /// Canonical markdown form of this block, marker re-applied.
    pub fn raw_markdown(&self) -> String {
        match &self.kind {
            BlockKind::Text { content } => content.clone(),
            BlockKind::Heading { level, content } => {
                format!("{} {}", "#".repeat(*level as usize), content)
            }
            BlockKind::Task { checked, content } => {
                format!("- [{}] {}", if *checked { 'x' } else { ' ' }, content)
            }
            BlockKind::BulletList { content } => format!("- {content}"),
            BlockKind::CodeBlock { language, content } => {
                format!("```{}\n{content}\n```", language.as_deref().unwrap_or(""))
            }
            BlockKind::Empty => String::new(),
        }
    }

    /// One-line human-readable summary, id omitted so output is stable.
    pub fn describe(&self) -> String {
        match &self.kind {
            BlockKind::Text { content } => format!("text {content:?}"),
            BlockKind::Heading { level, content } => format!("heading({level}) {content:?}"),
            BlockKind::Task { checked, content } => {
                format!("task[{}] {content:?}", if *checked { 'x' } else { ' ' })
            }
            BlockKind::BulletList { content } => format!("bullet {content:?}"),
            BlockKind::CodeBlock { language, content } => {
                let lines = content.split('\n').count();
                match language {
                    Some(lang) => format!("code({lang:?}) {lines} line(s)"),
                    None => format!("code {lines} line(s)"),
                }
            }
            BlockKind::Empty => "empty".to_string(),
        }
    }
}
