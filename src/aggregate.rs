use crate::classify::{classify, CommitType};
use crate::model::{
    AuthorCount, AuthorTypeRow, ClassifiedCommit, CommitRecord, HistogramBucket,
    PullRequestRecord, StateCount,
};
use std::collections::HashMap;

/// Attaches a derived type to each commit. Pure and idempotent: the type
/// depends only on the message text.
pub fn classify_commits(commits: Vec<CommitRecord>) -> Vec<ClassifiedCommit> {
    commits
        .into_iter()
        .map(|commit| {
            let commit_type = classify(&commit.message);
            ClassifiedCommit {
                commit,
                commit_type,
            }
        })
        .collect()
}

/// Count of classified commits grouped by (author, type), one zero-filled
/// row per author, sorted by author name. Empty input yields an empty
/// table, not an error.
pub fn type_by_author(commits: &[ClassifiedCommit]) -> Vec<AuthorTypeRow> {
    let mut rows: HashMap<&str, AuthorTypeRow> = HashMap::new();

    for classified in commits {
        let author = classified.commit.author.as_str();
        rows.entry(author)
            .or_insert_with(|| AuthorTypeRow::new(author.to_string()))
            .bump(classified.commit_type);
    }

    let mut table: Vec<AuthorTypeRow> = rows.into_values().collect();
    table.sort_by(|a, b| a.author.cmp(&b.author));
    table
}

/// Count of pull requests grouped by author, descending by count, ties
/// broken by author name for stable output.
pub fn pr_author_counts(pulls: &[PullRequestRecord]) -> Vec<AuthorCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for pull in pulls {
        *counts.entry(pull.author.as_str()).or_insert(0) += 1;
    }

    let mut result: Vec<AuthorCount> = counts
        .into_iter()
        .map(|(author, count)| AuthorCount {
            author: author.to_string(),
            count,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.author.cmp(&b.author)));
    result
}

/// Count of pull requests grouped by state label. States with no pull
/// requests are simply absent from the result.
pub fn pr_state_counts(pulls: &[PullRequestRecord]) -> Vec<StateCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for pull in pulls {
        *counts.entry(pull.state.as_str()).or_insert(0) += 1;
    }

    let mut result: Vec<StateCount> = counts
        .into_iter()
        .map(|(state, count)| StateCount {
            state: state.to_string(),
            count,
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.state.cmp(&b.state)));
    result
}

/// Number of commits on each pull request. An empty sha list counts as 0.
pub fn commits_per_pr(pulls: &[PullRequestRecord]) -> Vec<u64> {
    pulls.iter().map(|p| p.commit_shas.len() as u64).collect()
}

/// Fixed-width histogram over non-negative values. Zero values land in the
/// first bucket; an empty input yields an empty histogram.
pub fn histogram(values: &[u64], nbins: usize) -> Vec<HistogramBucket> {
    if values.is_empty() || nbins == 0 {
        return Vec::new();
    }

    let max = values.iter().copied().max().unwrap_or(0);
    let width = (max / nbins as u64) + 1;

    let mut buckets: Vec<HistogramBucket> = (0..nbins as u64)
        .map(|i| HistogramBucket {
            start: i * width,
            end: (i + 1) * width - 1,
            count: 0,
        })
        .collect();

    for &value in values {
        let idx = ((value / width) as usize).min(nbins - 1);
        buckets[idx].count += 1;
    }

    buckets
}

/// Trims trailing empty buckets so summaries stop at the last populated one.
pub fn trim_histogram(mut buckets: Vec<HistogramBucket>) -> Vec<HistogramBucket> {
    while buckets.last().is_some_and(|b| b.count == 0) {
        buckets.pop();
    }
    buckets
}

/// Per-type totals across all authors, in table column order.
pub fn type_totals(table: &[AuthorTypeRow]) -> Vec<(CommitType, u64)> {
    CommitType::ALL
        .iter()
        .map(|&t| (t, table.iter().map(|row| row.count(t)).sum()))
        .collect()
}
