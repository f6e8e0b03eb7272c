use serde::{Deserialize, Serialize};

/// Closed set of commit categories derived from the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Docs,
    Feat,
    Fix,
    Merge,
    Tests,
    Other,
}

impl CommitType {
    /// Column order of the type-by-author table.
    pub const ALL: [CommitType; 6] = [
        CommitType::Docs,
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Merge,
        CommitType::Tests,
        CommitType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Docs => "docs",
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Merge => "merge",
            CommitType::Tests => "tests",
            CommitType::Other => "other",
        }
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assigns exactly one type per message, first match wins.
///
/// Matching is literal substring matching, not tokenization: "fixtures"
/// matches "fix", "prefeature" matches "feat". This mirrors how the
/// existing dashboards bucket commits, so results stay comparable with
/// them. "Merge" is matched case-sensitively because that is the exact
/// casing git writes into merge commit subjects; the other keywords
/// follow conventional-commit prefixes which are lowercase as authored.
pub fn classify(message: &str) -> CommitType {
    if message.contains("docs") {
        CommitType::Docs
    } else if message.contains("feat") {
        CommitType::Feat
    } else if message.contains("fix") {
        CommitType::Fix
    } else if message.contains("Merge") {
        CommitType::Merge
    } else if message.contains("tests") {
        CommitType::Tests
    } else {
        CommitType::Other
    }
}
