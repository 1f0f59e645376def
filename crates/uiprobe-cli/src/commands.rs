//! Subcommand implementations.
//!
//! Every subcommand reads one or two dump files (or stdin via `-`),
//! parses them with the core, and prints the corresponding rendering.
//! Parsing never fails on malformed dumps; the only errors surfaced
//! here are I/O errors and a failed `find`.

use std::fs;
use std::io::Read;

use anyhow::Context;
use tracing::debug;
use uiprobe_core::diff::{diff, format_diff, DiffOptions};
use uiprobe_core::element::UiElement;
use uiprobe_core::error::ApiError;
use uiprobe_core::format::{format_analysis, format_element, format_tree, TreeFormat};
use uiprobe_core::matcher::find_best_match;
use uiprobe_core::parser;
use uiprobe_core::query::{by_criteria, Criteria};
use uiprobe_core::semantics::{analyze, AnalyzerOptions};
use uiprobe_core::suggest::suggest;

use crate::args::{AnalyzeArgs, DiffArgs, FindArgs, InspectArgs, QueryArgs, SuggestArgs};

/// Read a dump from a file path, or from stdin when the path is `-`.
fn read_dump(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read dump from stdin")?;
        Ok(raw)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read dump file '{}'", path))
    }
}

fn load_elements(path: &str) -> anyhow::Result<Vec<UiElement>> {
    let raw = read_dump(path)?;
    let elements = parser::parse(&raw);
    debug!(count = elements.len(), source = path, "parsed dump");
    Ok(elements)
}

pub fn inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let elements = load_elements(&args.dump)?;
    let options = TreeFormat {
        show_all: args.all,
        max_elements: args.max,
    };
    println!("{}", format_tree(&elements, &options));
    Ok(())
}

pub fn analyze_screen(args: &AnalyzeArgs) -> anyhow::Result<()> {
    let elements = load_elements(&args.dump)?;
    let analysis = analyze(
        &elements,
        args.activity.as_deref(),
        &AnalyzerOptions::default(),
    );
    println!("{}", format_analysis(&analysis));
    Ok(())
}

pub fn query(args: &QueryArgs) -> anyhow::Result<()> {
    let elements = load_elements(&args.dump)?;
    let criteria = Criteria {
        text: args.text.clone(),
        resource_id: args.id.clone(),
        class_name: args.class.clone(),
        clickable: args.clickable,
        enabled: args.enabled,
        visible: args.visible,
    };
    let matches = by_criteria(&elements, &criteria);
    if matches.is_empty() {
        println!("No matching elements");
        return Ok(());
    }
    for el in matches {
        println!("{}", format_element(el));
    }
    Ok(())
}

pub fn find(args: &FindArgs) -> anyhow::Result<()> {
    let elements = load_elements(&args.dump)?;
    match find_best_match(&elements, &args.description) {
        Some(result) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", format_element(result.element));
                println!("confidence: {} ({})", result.confidence, result.reason);
            }
            Ok(())
        }
        None => Err(ApiError::no_match(&args.description).into()),
    }
}

pub fn diff_dumps(args: &DiffArgs) -> anyhow::Result<()> {
    let before = load_elements(&args.before)?;
    let after = load_elements(&args.after)?;
    let report = diff(&before, &after, &DiffOptions::default());
    println!("{}", format_diff(&report));
    Ok(())
}

pub fn suggest_actions(args: &SuggestArgs) -> anyhow::Result<()> {
    let elements = load_elements(&args.dump)?;
    let suggestions = suggest(&elements);
    if suggestions.is_empty() {
        println!("No suggestions for this screen");
        return Ok(());
    }
    for suggestion in suggestions {
        println!("- {}", suggestion);
    }
    Ok(())
}
