//! Whole-document parse/serialize behavior: round-trip fidelity and a
//! stable outline rendering of the parsed structure.

use mininote_engine::{blocks_to_markdown, parse};
use pretty_assertions::assert_eq;

fn outline(text: &str) -> String {
    parse(text)
        .iter()
        .map(|b| b.describe())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn outline_of_mixed_note() {
    let text = "# Title\n\n- [ ] buy milk\n- [x] done\n* item\n```js\nconsole.log(1)\n```";
    insta::assert_snapshot!(outline(text), @r###"
    heading(1) "Title"
    empty
    task[ ] "buy milk"
    task[x] "done"
    bullet "item"
    code("js") 1 line(s)
    "###);
}

#[test]
fn outline_of_untagged_and_open_fences() {
    let text = "```\na\nb\n```\n```rust\nunfinished";
    insta::assert_snapshot!(outline(text), @r###"
    code 2 line(s)
    code("rust") 1 line(s)
    "###);
}

#[test]
fn round_trip_of_closed_constructs_is_exact() {
    let text = "# Title\n\n- [ ] buy milk\n- [x] done\n* item\n```js\nconsole.log(1)\n```";
    let serialized = blocks_to_markdown(&parse(text));
    // the bullet serializes back with a dash marker
    assert_eq!(serialized, text.replace("* item", "- item"));
}

#[test]
fn round_trip_of_dash_only_note_is_byte_identical() {
    let text = "# Title\n\n- [ ] buy milk\n- [x] done\n- item\n```js\nconsole.log(1)\n```";
    assert_eq!(blocks_to_markdown(&parse(text)), text);
}

#[test]
fn unterminated_fence_gains_a_closing_fence_on_serialize() {
    let text = "```rust\nlet a = 1;";
    assert_eq!(blocks_to_markdown(&parse(text)), "```rust\nlet a = 1;\n```");
}
