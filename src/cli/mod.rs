//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "nyaya",
    version,
    about = "Statute retrieval for Indian criminal law",
    long_about = "Nyaya finds the sections of the Indian criminal codes (BNS, BNSS, BSA and the IPC, \
                  CrPC and IEA they replaced) that are relevant to a plain-language question, and \
                  builds grounding context for an answer."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/nyaya/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the law datasets (overrides corpus.data_dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub corpus: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the features extracted from a query
    Features {
        /// Query text
        query: String,

        /// Show features in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Rank corpus sections for a query
    Search {
        /// Query text
        query: String,

        /// Maximum number of results (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the grounding prompt built for a query
    Context {
        /// Query text
        query: String,
    },

    /// Answer a question offline from the corpus
    Ask {
        /// Question to ask
        question: String,
    },

    /// Show per-law corpus counts
    Stats,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["nyaya", "--corpus", "/data", "search", "bns 103", "-l", "3"]);
        assert_eq!(cli.corpus, Some(PathBuf::from("/data")));
        match cli.command {
            Commands::Search { query, limit, json } => {
                assert_eq!(query, "bns 103");
                assert_eq!(limit, Some(3));
                assert!(!json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
