//! `is-index`: show what the harness recovers from a Rust source file.
//!
//! Useful when a failure message is missing its comment or argument text: run the tool on
//! the test file and check what is recorded on that line.
//!
//! ```text
//! is-index tests/my_test.rs
//! is-index tests/my_test.rs --line 42
//! is-index tests/my_test.rs --json
//! ```

use std::path::PathBuf;

use clap::Parser;
use miette::IntoDiagnostic;
use serde_json::{Value, json};

use is_harness::SourceIndex;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Show the assertion calls and comments indexed from a Rust source file
#[derive(Parser, Debug)]
#[command(name = "is-index")]
#[command(version = VERSION)]
#[command(about = "Show the assertion calls and comments indexed from a Rust source file", long_about = None)]
pub struct Cli {
    /// Rust source file to index
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only show entries for this line
    #[arg(long, value_name = "LINE")]
    pub line: Option<usize>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// CLI entry point.
pub fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    let index = SourceIndex::load(&cli.file)?;
    tracing::debug!(file = %cli.file.display(), "indexed");

    if cli.json {
        let value = render_json(&cli.file, &index, cli.line);
        println!("{}", serde_json::to_string_pretty(&value).into_diagnostic()?);
    } else {
        print!("{}", render_text(&index, cli.line));
    }
    Ok(())
}

fn render_text(index: &SourceIndex, line: Option<usize>) -> String {
    match line {
        None => index.dump(),
        Some(line) => index
            .dump()
            .lines()
            .filter(|entry| entry.split(':').next().and_then(|n| n.trim().parse().ok()) == Some(line))
            .map(|entry| format!("{entry}\n"))
            .collect(),
    }
}

fn render_json(file: &std::path::Path, index: &SourceIndex, line: Option<usize>) -> Value {
    let wanted = |at: usize| line.is_none_or(|line| line == at);
    let calls: Vec<Value> = index
        .calls()
        .filter(|(at, _)| wanted(*at))
        .map(|(at, call)| {
            json!({
                "line": at,
                "method": call.method,
                "args": call.args,
                "declaration": call.declaration,
            })
        })
        .collect();
    let comments: Vec<Value> = index
        .comments()
        .filter(|(at, _)| wanted(*at))
        .map(|(at, text)| json!({ "line": at, "text": text }))
        .collect();

    json!({
        "file": file.display().to_string(),
        "calls": calls,
        "comments": comments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "fn t() {\n    let is = Is::new();\n    is.equal(a, b); // same\n    // alone\n}\n";

    #[test]
    fn test_render_text_filters_by_line() {
        let index = SourceIndex::parse(SOURCE).unwrap();
        assert_eq!(
            render_text(&index, Some(3)),
            "   3: call equal(a, b)\n   3: comment \"same\"\n"
        );
        assert_eq!(render_text(&index, Some(1)), "");
    }

    #[test]
    fn test_render_json() {
        let index = SourceIndex::parse(SOURCE).unwrap();
        let value = render_json(std::path::Path::new("t.rs"), &index, None);
        assert_eq!(value["calls"][0]["method"], "equal");
        assert_eq!(value["calls"][0]["args"][1], "b");
        assert_eq!(value["comments"][1]["text"], "alone");
        assert_eq!(value["comments"][1]["line"], 4);
    }

    #[test]
    fn test_cli_parses_arguments() {
        let cli = Cli::try_parse_from(["is-index", "tests/x.rs", "--line", "7", "--json"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("tests/x.rs"));
        assert_eq!(cli.line, Some(7));
        assert!(cli.json);
    }
}
