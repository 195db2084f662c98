use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0 (dev: abc1234 2024-01-15)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev: {} {})", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "filetag",
    bin_name = "filetag",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Tag files with metadata and find them again by query", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (overrides the user config file)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Record store file (overrides configuration)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub store: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Output format for listings
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text, help_heading = "Options")]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show configuration and test the store
    Status,

    /// List tracked files under a path (default: current directory)
    #[command(alias = "ls")]
    List {
        /// Directory or file; a tracked file shows its full record
        path: Option<PathBuf>,
    },

    /// Find files whose metadata matches every condition
    Find {
        /// Conditions: field=value, field!=value, field<value, field<=value,
        /// field>value, field>=value, field~regex, field? (exists), field=a|b
        #[arg(required = true, value_name = "CONDITION")]
        conditions: Vec<String>,
    },

    /// Start tracking files (directories are walked)
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Stop tracking files (the files themselves are left alone)
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Set a metadata field on files
    Tag {
        field: String,
        /// Numbers and true/false are stored typed; quote to force a string
        value: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Remove a metadata field from tracked files
    Untag {
        field: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Report records whose files no longer exist
    Doctor {
        /// Remove the stale records
        #[arg(long)]
        fix: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tag_with_paths() {
        let cli = Cli::try_parse_from(["filetag", "tag", "group", "train", "a.csv", "b.csv"]).unwrap();
        match cli.command {
            Commands::Tag { field, value, paths } => {
                assert_eq!(field, "group");
                assert_eq!(value, "train");
                assert_eq!(paths.len(), 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn find_requires_a_condition() {
        assert!(Cli::try_parse_from(["filetag", "find"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["filetag", "list", "--output", "json", "-vv", "--store", "s.json"])
                .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.store, Some(PathBuf::from("s.json")));
    }
}
