pub mod db;
pub mod github;

pub use db::DbSource;
pub use github::GithubSource;

use crate::cli::CommonArgs;
use crate::error::Result;
use crate::model::{CommitRecord, PullRequestRecord};
use anyhow::bail;

/// Ingestion adapter over the two supported backends. Both are read-only
/// with respect to their source and produce the same normalized records.
pub enum Source {
    Github(GithubSource),
    Db(DbSource),
}

impl Source {
    pub fn from_args(common: &CommonArgs) -> anyhow::Result<Self> {
        match (&common.token, &common.db) {
            (Some(token), None) => Ok(Source::Github(GithubSource::new(token.clone()))),
            (None, Some(path)) => Ok(Source::Db(DbSource::open(path)?)),
            (Some(_), Some(_)) => bail!("--token and --db are mutually exclusive"),
            (None, None) => bail!("one of --token or --db is required"),
        }
    }

    pub fn fetch_commits(&self, repo_name: &str) -> Result<Vec<CommitRecord>> {
        match self {
            Source::Github(source) => source.fetch_commits(repo_name),
            Source::Db(source) => source.fetch_commits(repo_name),
        }
    }

    pub fn fetch_pulls(&self, repo_name: &str) -> Result<Vec<PullRequestRecord>> {
        match self {
            Source::Github(source) => source.fetch_pulls(repo_name),
            Source::Db(source) => source.fetch_pulls(repo_name),
        }
    }
}
