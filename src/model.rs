use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::CommitType;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub url: String,
    pub repo_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub state: PrState,
    pub comments: u64,
    pub review_comments: u64,
    #[serde(rename = "commits")]
    pub commit_shas: Vec<String>,
    pub url: String,
    pub repo_name: String,
}

/// Lifecycle state of a pull request. Sources report this as free text,
/// so anything outside the known set round-trips as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PrState {
    Open,
    Closed,
    Merged,
    Unknown(String),
}

impl PrState {
    pub fn as_str(&self) -> &str {
        match self {
            PrState::Open => "open",
            PrState::Closed => "closed",
            PrState::Merged => "merged",
            PrState::Unknown(s) => s.as_str(),
        }
    }
}

impl From<String> for PrState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "open" => PrState::Open,
            "closed" => PrState::Closed,
            "merged" => PrState::Merged,
            _ => PrState::Unknown(s),
        }
    }
}

impl From<PrState> for String {
    fn from(state: PrState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedCommit {
    #[serde(flatten)]
    pub commit: CommitRecord,
    #[serde(rename = "type")]
    pub commit_type: CommitType,
}

/// One row of the type-by-author table. All six type columns are always
/// present, zero-filled, because downstream charting assumes they exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorTypeRow {
    pub author: String,
    pub docs: u64,
    pub feat: u64,
    pub fix: u64,
    pub merge: u64,
    pub tests: u64,
    pub other: u64,
}

impl AuthorTypeRow {
    pub fn new(author: String) -> Self {
        Self {
            author,
            docs: 0,
            feat: 0,
            fix: 0,
            merge: 0,
            tests: 0,
            other: 0,
        }
    }

    pub fn bump(&mut self, commit_type: CommitType) {
        match commit_type {
            CommitType::Docs => self.docs += 1,
            CommitType::Feat => self.feat += 1,
            CommitType::Fix => self.fix += 1,
            CommitType::Merge => self.merge += 1,
            CommitType::Tests => self.tests += 1,
            CommitType::Other => self.other += 1,
        }
    }

    pub fn count(&self, commit_type: CommitType) -> u64 {
        match commit_type {
            CommitType::Docs => self.docs,
            CommitType::Feat => self.feat,
            CommitType::Fix => self.fix,
            CommitType::Merge => self.merge,
            CommitType::Tests => self.tests,
            CommitType::Other => self.other,
        }
    }

    pub fn total(&self) -> u64 {
        self.docs + self.feat + self.fix + self.merge + self.tests + self.other
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub start: u64,
    pub end: u64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repo_name: String,
    pub commits: Vec<ClassifiedCommit>,
    pub type_counts: Vec<AuthorTypeRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repo_name: String,
    pub pulls: Vec<PullRequestRecord>,
    pub author_counts: Vec<AuthorCount>,
    pub state_counts: Vec<StateCount>,
    pub commits_per_pr: Vec<HistogramBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorCount {
    pub author: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateCount {
    pub state: String,
    pub count: u64,
}
