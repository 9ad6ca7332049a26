use anyhow::{Context, Result};
use mininote_config::Config;
use mininote_engine::{BlockId, Cmd, Document, blocks_to_markdown, parse};
use std::{env, fs, path::PathBuf, process};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage(&args[0]);
        process::exit(1);
    };

    match command.as_str() {
        "outline" => {
            let json = args[2..].iter().any(|a| a == "--json");
            let file = args[2..].iter().find(|a| *a != "--json");
            let path = resolve_note_path(file.map(String::as_str))?;
            outline(&path, json)
        }
        "check" => {
            let path = resolve_note_path(args.get(2).map(String::as_str))?;
            check(&path)
        }
        "toggle" => {
            let line = match args.get(2).map(|s| s.parse::<usize>()) {
                Some(Ok(line)) if line > 0 => line,
                _ => {
                    eprintln!("Usage: {} toggle <line> [note-file]", args[0]);
                    process::exit(1);
                }
            };
            let path = resolve_note_path(args.get(3).map(String::as_str))?;
            toggle(&path, line)
        }
        _ => {
            print_usage(&args[0]);
            process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {program} <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  outline [--json] [note-file]   print the parsed block structure");
    eprintln!("  check [note-file]              verify parse/serialize round-trip");
    eprintln!("  toggle <line> [note-file]      toggle the task checkbox on a line");
    eprintln!();
    eprintln!(
        "Without a note-file argument the note_path from {} is used",
        Config::config_path().display()
    );
}

/// Explicit path argument, or the configured note path.
fn resolve_note_path(arg: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(PathBuf::from(path));
    }

    match Config::load() {
        Ok(Some(config)) => Ok(config.note_path),
        Ok(None) => {
            eprintln!("Error: No note file given and no config file found");
            eprintln!(
                "Create a config file at {} or pass a path",
                Config::config_path().display()
            );
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    }
}

fn read_note(path: &PathBuf) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn outline(path: &PathBuf, json: bool) -> Result<()> {
    let content = read_note(path)?;
    let blocks = parse(&content);

    if json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
    } else {
        for block in &blocks {
            println!("{}", block.describe());
        }
    }
    Ok(())
}

fn check(path: &PathBuf) -> Result<()> {
    let content = read_note(path)?;
    let blocks = parse(&content);
    let serialized = blocks_to_markdown(&blocks);

    if serialized == content {
        println!("round-trip OK ({} blocks)", blocks.len());
        return Ok(());
    }

    // point at the first line that drifted
    let drift = content
        .split('\n')
        .zip(serialized.split('\n'))
        .position(|(a, b)| a != b)
        .map(|i| i + 1);
    match drift {
        Some(line) => eprintln!("round-trip drift starting at line {line}"),
        None => eprintln!("round-trip drift: serialized length differs"),
    }
    process::exit(1);
}

fn toggle(path: &PathBuf, line: usize) -> Result<()> {
    let content = read_note(path)?;
    let mut doc = Document::from_text(&content);

    let Some(id) = block_at_line(&doc, line) else {
        eprintln!("Error: line {line} is past the end of the note");
        process::exit(1);
    };

    let patch = doc.apply(Cmd::ToggleTask { id });
    if !patch.changed {
        eprintln!("Error: line {line} is not a task");
        process::exit(1);
    }

    fs::write(path, doc.to_text()).with_context(|| format!("failed to write {}", path.display()))?;
    println!(
        "{}",
        doc.block(id).map(|b| b.content.as_str()).unwrap_or_default()
    );
    Ok(())
}

/// Map a 1-based source line to the block containing it. Fenced regions are
/// grouped, so one block may cover several lines.
fn block_at_line(doc: &Document, line: usize) -> Option<BlockId> {
    let mut first = 1;
    for block in doc.blocks() {
        let span = block.content.split('\n').count();
        if line < first + span {
            return Some(block.id);
        }
        first += span;
    }
    None
}
