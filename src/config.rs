//! Run configuration.

use crate::error::{Error, Result};
use crate::loader::Layout;
use crate::tree::{Expansion, DEFAULT_NODE_LIMIT};
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Compressor that produced a grammar, which determines its file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarFamily {
    Repair,
    RlzRepair,
    BigRepair,
    ReRepair,
}

impl GrammarFamily {
    /// Layout of the rules files this family writes.
    pub fn layout(self) -> Layout {
        match self {
            GrammarFamily::Repair | GrammarFamily::RlzRepair => Layout::CharMap,
            GrammarFamily::BigRepair | GrammarFamily::ReRepair => Layout::Implicit,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GrammarFamily::Repair => "repair",
            GrammarFamily::RlzRepair => "rlz-repair",
            GrammarFamily::BigRepair => "bigrepair",
            GrammarFamily::ReRepair => "rerepair",
        }
    }
}

impl FromStr for GrammarFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "repair" => Ok(GrammarFamily::Repair),
            "rlz-repair" => Ok(GrammarFamily::RlzRepair),
            "bigrepair" => Ok(GrammarFamily::BigRepair),
            "rerepair" => Ok(GrammarFamily::ReRepair),
            other => Err(Error::InvalidConfiguration(format!(
                "`{other}` is not a valid program type \
                 (expected repair, rlz-repair, bigrepair or rerepair)"
            ))),
        }
    }
}

impl fmt::Display for GrammarFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Command-line options of a random-access run.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "repair-access",
    version,
    about = "Random access and depth statistics for RePair grammars"
)]
pub struct Config {
    /// Path to the compressed sequence file
    #[arg(short = 's', long, value_name = "FILE")]
    pub sequence: PathBuf,

    /// Path to the grammar rules file
    #[arg(short = 'r', long, value_name = "FILE")]
    pub rules: PathBuf,

    /// Prefix of the output file
    #[arg(short = 'o', long, default_value = "ra_output")]
    pub output: String,

    /// Number of random positions to query
    #[arg(short = 'i', long = "iteration", default_value_t = 10_000)]
    pub iterations: usize,

    /// Compression program used (repair, rlz-repair, bigrepair, rerepair)
    #[arg(short = 'p', long = "program", default_value = "rlz-repair")]
    pub family: GrammarFamily,

    /// Seed for sampling query positions
    #[arg(long, default_value_t = 100)]
    pub seed: u64,

    /// Compute derivation tree depth statistics
    #[arg(long)]
    pub depth: bool,

    /// Skip the random access queries
    #[arg(long = "no-ra")]
    pub no_ra: bool,

    /// Print the parsed grammar rules
    #[arg(long)]
    pub print_grammar: bool,

    /// Print the compressed sequence
    #[arg(long)]
    pub print_sequence: bool,

    /// Write the derivation tree as Graphviz DOT to this file
    #[arg(long, value_name = "FILE")]
    pub dot: Option<PathBuf>,

    /// Tree drawing mode: full or shared
    #[arg(long, default_value = "full")]
    pub tree: Expansion,

    /// Maximum number of nodes in the derivation tree
    #[arg(long, default_value_t = DEFAULT_NODE_LIMIT)]
    pub tree_node_limit: usize,
}

impl Config {
    /// Rejects option combinations that cannot run.
    pub fn validate(&self) -> Result<()> {
        if !self.no_ra && self.iterations == 0 {
            return Err(Error::InvalidConfiguration(
                "at least one query is needed unless --no-ra is given".to_string(),
            ));
        }
        if self.tree_node_limit == 0 {
            return Err(Error::InvalidConfiguration(
                "tree node limit must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// File the query results are written to.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.txt", self.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["repair-access", "-s", "text.C", "-r", "text.R"]).unwrap();
        assert_eq!(config.sequence, PathBuf::from("text.C"));
        assert_eq!(config.rules, PathBuf::from("text.R"));
        assert_eq!(config.iterations, 10_000);
        assert_eq!(config.family, GrammarFamily::RlzRepair);
        assert_eq!(config.seed, 100);
        assert!(!config.depth);
        assert!(!config.no_ra);
        assert_eq!(config.tree, Expansion::Full);
        assert_eq!(config.output_path(), PathBuf::from("ra_output.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_all_options() {
        let config = Config::try_parse_from([
            "repair-access",
            "--sequence",
            "a.C",
            "--rules",
            "a.R",
            "-o",
            "out/run",
            "-i",
            "5",
            "-p",
            "bigrepair",
            "--seed",
            "7",
            "--depth",
            "--no-ra",
            "--dot",
            "tree.dot",
            "--tree",
            "shared",
        ])
        .unwrap();
        assert_eq!(config.iterations, 5);
        assert_eq!(config.family.layout(), Layout::Implicit);
        assert_eq!(config.seed, 7);
        assert!(config.depth && config.no_ra);
        assert_eq!(config.dot, Some(PathBuf::from("tree.dot")));
        assert_eq!(config.tree, Expansion::Shared);
        assert_eq!(config.output_path(), PathBuf::from("out/run.txt"));
    }

    #[test]
    fn test_unknown_family_rejected_at_parse() {
        let result = Config::try_parse_from(["repair-access", "-s", "a", "-r", "b", "-p", "lz77"]);
        assert!(result.is_err());
        assert!(matches!(
            "lz77".parse::<GrammarFamily>(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_family_layouts() {
        for (name, layout) in [
            ("repair", Layout::CharMap),
            ("rlz-repair", Layout::CharMap),
            ("bigrepair", Layout::Implicit),
            ("rerepair", Layout::Implicit),
        ] {
            let family: GrammarFamily = name.parse().unwrap();
            assert_eq!(family.layout(), layout);
            assert_eq!(family.to_string(), name);
        }
    }

    #[test]
    fn test_zero_queries_rejected() {
        let config =
            Config::try_parse_from(["repair-access", "-s", "a", "-r", "b", "-i", "0"]).unwrap();
        assert!(config.validate().is_err());

        let config = Config::try_parse_from(["repair-access", "-s", "a", "-r", "b", "-i", "0", "--no-ra"])
            .unwrap();
        assert!(config.validate().is_ok());
    }
}
