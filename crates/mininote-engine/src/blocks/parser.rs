use std::sync::LazyLock;

use regex::Regex;

use crate::blocks::{Block, BlockKind};

/// Opening/closing marker of a fenced code region.
pub(crate) const FENCE: &str = "```";

const TASK_CHECKED: &str = "- [x]";
const TASK_CHECKED_UPPER: &str = "- [X]";

/// Task marker at line start, with the single following space when present.
static TASK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[[ xX]\] ?").expect("task marker regex"));

/// Parse markdown text into an ordered block sequence.
///
/// Single forward scan over lines; the fence rule consumes a whole region,
/// every other rule consumes exactly one line. Arbitrary input is valid — an
/// unterminated fence runs to the end of input and still yields a code block.
pub fn parse(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut blocks = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if line.starts_with(FENCE) {
            let (block, next) = parse_code_block(&lines, i);
            blocks.push(block);
            i = next;
            continue;
        }

        if line.starts_with('#') {
            blocks.push(parse_heading(line));
        } else if is_task_line(line) {
            blocks.push(parse_task(line));
        } else if line.starts_with("- ") || line.starts_with("* ") || line.starts_with("+ ") {
            blocks.push(Block::new(BlockKind::BulletList {
                content: line[2..].to_string(),
            }));
        } else if line.trim().is_empty() {
            blocks.push(Block::new(BlockKind::Empty));
        } else {
            blocks.push(Block::new(BlockKind::Text {
                content: line.to_string(),
            }));
        }
        i += 1;
    }

    blocks
}

/// Serialize blocks back to markdown, the inverse of [`parse`].
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::raw_markdown)
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_task_line(line: &str) -> bool {
    line.starts_with("- [") && TASK_MARKER.is_match(line)
}

fn parse_heading(line: &str) -> Block {
    let marker_len = line.chars().take_while(|&c| c == '#').count();
    Block::new(BlockKind::Heading {
        // deeper headings clamp rather than reject
        level: marker_len.min(6) as u8,
        content: line[marker_len..].trim().to_string(),
    })
}

fn parse_task(line: &str) -> Block {
    let checked = line.starts_with(TASK_CHECKED) || line.starts_with(TASK_CHECKED_UPPER);
    Block::new(BlockKind::Task {
        checked,
        content: TASK_MARKER.replace(line, "").into_owned(),
    })
}

/// Consume a fenced region starting at `start`. Returns the block and the
/// index of the first line after the region (past the end when unterminated).
fn parse_code_block(lines: &[&str], start: usize) -> (Block, usize) {
    let fence_line = lines[start];
    let language = if fence_line.len() > FENCE.len() {
        // a whitespace-only tag survives as Some("")
        Some(fence_line[FENCE.len()..].trim().to_string())
    } else {
        None
    };

    let mut end = start + 1;
    let mut body = Vec::new();
    while end < lines.len() && !lines[end].starts_with(FENCE) {
        body.push(lines[end]);
        end += 1;
    }

    let block = Block::new(BlockKind::CodeBlock {
        language,
        content: body.join("\n"),
    });
    (block, end + 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn kinds(text: &str) -> Vec<BlockKind> {
        parse(text).into_iter().map(|b| b.kind).collect()
    }

    #[test]
    fn parses_mixed_note() {
        let text = "# Title\n\n- [ ] buy milk\n- [x] done\n* item\n```js\nconsole.log(1)\n```";
        assert_eq!(
            kinds(text),
            vec![
                BlockKind::Heading {
                    level: 1,
                    content: "Title".to_string()
                },
                BlockKind::Empty,
                BlockKind::Task {
                    checked: false,
                    content: "buy milk".to_string()
                },
                BlockKind::Task {
                    checked: true,
                    content: "done".to_string()
                },
                BlockKind::BulletList {
                    content: "item".to_string()
                },
                BlockKind::CodeBlock {
                    language: Some("js".to_string()),
                    content: "console.log(1)".to_string()
                },
            ]
        );
    }

    #[rstest]
    #[case("# one", 1, "one")]
    #[case("### three", 3, "three")]
    #[case("###### six", 6, "six")]
    #[case("######## eight", 6, "eight")]
    #[case("#no-space", 1, "no-space")]
    fn heading_levels_clamp_to_six(#[case] line: &str, #[case] level: u8, #[case] content: &str) {
        assert_eq!(
            kinds(line),
            vec![BlockKind::Heading {
                level,
                content: content.to_string()
            }]
        );
    }

    #[rstest]
    #[case("- [ ] open", false, "open")]
    #[case("- [x] closed", true, "closed")]
    #[case("- [X] closed upper", true, "closed upper")]
    fn task_markers(#[case] line: &str, #[case] checked: bool, #[case] content: &str) {
        assert_eq!(
            kinds(line),
            vec![BlockKind::Task {
                checked,
                content: content.to_string()
            }]
        );
    }

    #[test]
    fn task_without_trailing_space_still_strips_marker() {
        assert_eq!(
            kinds("- [ ]tight"),
            vec![BlockKind::Task {
                checked: false,
                content: "tight".to_string()
            }]
        );
    }

    #[rstest]
    #[case("- dash")]
    #[case("* star")]
    #[case("+ plus")]
    fn bullet_markers_strip_two_chars(#[case] line: &str) {
        assert_eq!(
            kinds(line),
            vec![BlockKind::BulletList {
                content: line[2..].to_string()
            }]
        );
    }

    #[test]
    fn bare_fence_has_no_language() {
        assert_eq!(
            kinds("```\ncode\n```"),
            vec![BlockKind::CodeBlock {
                language: None,
                content: "code".to_string()
            }]
        );
    }

    #[test]
    fn whitespace_only_language_tag_is_some_empty() {
        // documented asymmetry: "``` " keeps an empty tag rather than None
        assert_eq!(
            kinds("``` \ncode\n```"),
            vec![BlockKind::CodeBlock {
                language: Some(String::new()),
                content: "code".to_string()
            }]
        );
    }

    #[test]
    fn unterminated_fence_runs_to_end_of_input() {
        assert_eq!(
            kinds("```rust\nlet x = 1;\nlet y = 2;"),
            vec![BlockKind::CodeBlock {
                language: Some("rust".to_string()),
                content: "let x = 1;\nlet y = 2;".to_string()
            }]
        );
    }

    #[test]
    fn code_block_keeps_blank_and_marker_like_lines_verbatim() {
        assert_eq!(
            kinds("```\n# not a heading\n\n- not a bullet\n```"),
            vec![BlockKind::CodeBlock {
                language: None,
                content: "# not a heading\n\n- not a bullet".to_string()
            }]
        );
    }

    #[test]
    fn whitespace_only_line_is_empty_block() {
        assert_eq!(kinds("   "), vec![BlockKind::Empty]);
    }

    #[test]
    fn empty_input_is_one_empty_block() {
        assert_eq!(kinds(""), vec![BlockKind::Empty]);
    }

    #[rstest]
    #[case("# Title\n\nparagraph text")]
    #[case("- [ ] a\n- [x] b\n- plain bullet")]
    #[case("```rust\nfn main() {}\n```")]
    #[case("## Sub\n```\nlet a = 0;\n```\ntail")]
    #[case("one\n\ntwo\n")]
    fn round_trip_recognized_constructs(#[case] text: &str) {
        assert_eq!(blocks_to_markdown(&parse(text)), text);
    }

    #[test]
    fn reparsing_assigns_new_ids() {
        let first = parse("hello");
        let second = parse("hello");
        assert_ne!(first[0].id, second[0].id);
    }
}
