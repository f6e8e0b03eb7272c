use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commitlens")]
#[command(about = "Commit and pull-request analysis for repository dashboards")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Repository name (owner/repo)")]
    pub repo: String,

    #[arg(long, help = "GitHub API token; selects the remote source")]
    pub token: Option<String>,

    #[arg(long, help = "Path to a pre-populated SQLite database; selects the database source")]
    pub db: Option<PathBuf>,

    #[arg(long, help = "Document store directory to persist fetched records into")]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and classify commits, with type-by-author counts
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Fetch pull requests, with author/state/commit-count distributions
    Pulls {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Export normalized records as canonical JSON
    Export {
        #[arg(value_enum, help = "Record set to export")]
        target: ExportTarget,

        #[arg(long, help = "Write to a file instead of stdout")]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy)]
pub enum ExportTarget {
    Commits,
    Pulls,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Commits { json, ndjson } => crate::commits::exec(self.common, json, ndjson),
            Commands::Pulls { json, ndjson } => crate::pulls::exec(self.common, json, ndjson),
            Commands::Export { target, out } => {
                crate::export::exec(self.common, target, out.as_deref())
            }
        }
    }
}
