//! CLI argument parsing with clap derive macros.

use clap::{Parser, Subcommand};

const DUMP_HELP: &str = "Path to a hierarchy dump file, or '-' for stdin";

/// UI hierarchy analysis for AI-driven device automation.
///
/// Parse accessibility dumps (attributed markup or the line-oriented
/// desktop format) into a flat element model, then inspect, query,
/// fuzzy-match, diff, and summarize them. Output is designed for AI
/// agent consumption.
#[derive(Debug, Parser)]
#[command(name = "uiprobe", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the parsed element tree, one element per line
    #[command(after_help = "\
Examples:
  uiprobe inspect dump.xml              # Meaningful elements only
  uiprobe inspect --all dump.xml        # Every parsed element
  uiprobe inspect --max 20 dump.xml     # Cap the listing
  adb exec-out uiautomator dump /dev/tty | uiprobe inspect -")]
    Inspect(InspectArgs),

    /// Summarize screen semantics: title, dialogs, navigation, element groups
    #[command(after_help = "\
Examples:
  uiprobe analyze dump.xml
  uiprobe analyze --activity LoginActivity dump.xml")]
    Analyze(AnalyzeArgs),

    /// Filter elements by attribute criteria
    #[command(after_help = "\
Examples:
  uiprobe query --text login dump.xml         # Substring of text/description
  uiprobe query --class Button dump.xml       # Substring of class name
  uiprobe query --id submit dump.xml          # Substring of resource id
  uiprobe query --clickable true --enabled false dump.xml")]
    Query(QueryArgs),

    /// Resolve a natural-language description to the best-matching element
    #[command(after_help = "\
Examples:
  uiprobe find dump.xml 'submit button'
  uiprobe find --json dump.xml 'OK'     # Machine-readable match")]
    Find(FindArgs),

    /// Compare two dumps and report appeared/disappeared elements
    #[command(after_help = "\
Examples:
  uiprobe diff before.xml after.xml")]
    Diff(DiffArgs),

    /// Suggest plausible next interactions for the screen
    #[command(after_help = "\
Examples:
  uiprobe suggest dump.xml")]
    Suggest(SuggestArgs),
}

#[derive(Debug, clap::Args)]
pub struct InspectArgs {
    #[arg(help = DUMP_HELP)]
    pub dump: String,

    /// Include non-meaningful elements (layout containers, empty nodes)
    #[arg(long)]
    pub all: bool,

    /// Maximum elements to render
    #[arg(long, default_value_t = 100)]
    pub max: usize,
}

#[derive(Debug, clap::Args)]
pub struct AnalyzeArgs {
    #[arg(help = DUMP_HELP)]
    pub dump: String,

    /// Activity or screen name supplied by the platform adapter
    #[arg(long)]
    pub activity: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct QueryArgs {
    #[arg(help = DUMP_HELP)]
    pub dump: String,

    /// Case-insensitive substring of text or content description
    #[arg(long)]
    pub text: Option<String>,

    /// Substring of the resource id
    #[arg(long)]
    pub id: Option<String>,

    /// Substring of the class name
    #[arg(long)]
    pub class: Option<String>,

    /// Filter by clickability
    #[arg(long, value_name = "BOOL")]
    pub clickable: Option<bool>,

    /// Filter by enabled state
    #[arg(long, value_name = "BOOL")]
    pub enabled: Option<bool>,

    /// Filter by visibility (nonzero area)
    #[arg(long, value_name = "BOOL")]
    pub visible: Option<bool>,
}

#[derive(Debug, clap::Args)]
pub struct FindArgs {
    #[arg(help = DUMP_HELP)]
    pub dump: String,

    /// Natural-language element description
    pub description: String,

    /// Emit the match as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct DiffArgs {
    /// Earlier dump file, or '-' for stdin
    pub before: String,

    /// Later dump file
    pub after: String,
}

#[derive(Debug, clap::Args)]
pub struct SuggestArgs {
    #[arg(help = DUMP_HELP)]
    pub dump: String,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_find_parses_description_and_json_flag() {
        let cli = Cli::parse_from(["uiprobe", "find", "--json", "dump.xml", "submit button"]);
        match cli.command {
            Commands::Find(args) => {
                assert_eq!(args.dump, "dump.xml");
                assert_eq!(args.description, "submit button");
                assert!(args.json);
            }
            _ => panic!("Expected find command"),
        }
    }

    #[test]
    fn test_query_bool_filters_take_explicit_values() {
        let cli = Cli::parse_from([
            "uiprobe",
            "query",
            "--clickable",
            "true",
            "--enabled",
            "false",
            "dump.xml",
        ]);
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.clickable, Some(true));
                assert_eq!(args.enabled, Some(false));
                assert_eq!(args.visible, None);
            }
            _ => panic!("Expected query command"),
        }
    }

    #[test]
    fn test_inspect_defaults() {
        let cli = Cli::parse_from(["uiprobe", "inspect", "-"]);
        match cli.command {
            Commands::Inspect(args) => {
                assert_eq!(args.dump, "-");
                assert!(!args.all);
                assert_eq!(args.max, 100);
            }
            _ => panic!("Expected inspect command"),
        }
    }
}
