use chrono::{TimeZone, Utc};
use commitlens::aggregate::{
    classify_commits, commits_per_pr, histogram, pr_author_counts, pr_state_counts, type_by_author,
};
use commitlens::classify::{classify, CommitType};
use commitlens::export::to_json_pretty;
use commitlens::model::{ClassifiedCommit, CommitRecord, PrState, PullRequestRecord};
use pretty_assertions::assert_eq;

fn commit(author: &str, message: &str) -> CommitRecord {
    CommitRecord {
        sha: format!("{:040x}", message.len()),
        message: message.to_string(),
        author: author.to_string(),
        date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        url: "https://example.com/commit".to_string(),
        repo_name: "octo/demo".to_string(),
    }
}

fn pull(author: &str, state: &str, shas: &[&str]) -> PullRequestRecord {
    PullRequestRecord {
        number: 1,
        title: "change".to_string(),
        author: author.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 2, 8, 30, 0).unwrap(),
        state: state.to_string().into(),
        comments: 2,
        review_comments: 1,
        commit_shas: shas.iter().map(|s| s.to_string()).collect(),
        url: "https://example.com/pull/1".to_string(),
        repo_name: "octo/demo".to_string(),
    }
}

#[test]
fn classification_is_first_match_wins() {
    assert_eq!(classify("docs: update readme"), CommitType::Docs);
    // docs wins even when a higher-sounding keyword appears first in text
    assert_eq!(classify("fix: typo in docs"), CommitType::Docs);
    assert_eq!(classify("feat: add parser"), CommitType::Feat);
    assert_eq!(classify("fix crash on empty input"), CommitType::Fix);
    assert_eq!(classify("Merge branch 'main'"), CommitType::Merge);
    assert_eq!(classify("add tests for parser"), CommitType::Tests);
    assert_eq!(classify("bump version"), CommitType::Other);
}

#[test]
fn classification_is_literal_substring_matching() {
    // known imprecision, preserved for parity with existing dashboards
    assert_eq!(classify("update fixtures"), CommitType::Fix);
    assert_eq!(classify("defeat the boss"), CommitType::Feat);
}

#[test]
fn merge_keyword_is_case_sensitive() {
    assert_eq!(classify("Merge pull request #5"), CommitType::Merge);
    assert_eq!(classify("merge pull request #5"), CommitType::Other);
}

#[test]
fn classification_is_idempotent() {
    let classified = classify_commits(vec![commit("A", "feat: x"), commit("B", "fix: y")]);
    let reclassified: Vec<CommitType> = classified
        .iter()
        .map(|c| classify(&c.commit.message))
        .collect();
    let original: Vec<CommitType> = classified.iter().map(|c| c.commit_type).collect();
    assert_eq!(original, reclassified);
}

#[test]
fn type_table_zero_fills_all_six_columns() {
    let classified = classify_commits(vec![commit("A", "feat: x")]);
    let table = type_by_author(&classified);

    assert_eq!(table.len(), 1);
    let row = &table[0];
    assert_eq!(row.author, "A");
    assert_eq!(
        (row.docs, row.feat, row.fix, row.merge, row.tests, row.other),
        (0, 1, 0, 0, 0, 0)
    );
}

#[test]
fn type_table_is_empty_for_no_commits() {
    assert_eq!(type_by_author(&[]), vec![]);
}

#[test]
fn pr_author_counts_sorted_descending() {
    let pulls = vec![
        pull("bob", "open", &[]),
        pull("alice", "closed", &[]),
        pull("bob", "merged", &[]),
    ];
    let counts = pr_author_counts(&pulls);
    assert_eq!(counts[0].author, "bob");
    assert_eq!(counts[0].count, 2);
    assert_eq!(counts[1].author, "alice");
    assert_eq!(counts[1].count, 1);
}

#[test]
fn absent_states_are_absent_not_errors() {
    let pulls = vec![pull("alice", "open", &[]), pull("bob", "open", &[])];
    let counts = pr_state_counts(&pulls);
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].state, "open");
    assert_eq!(counts[0].count, 2);
}

#[test]
fn unknown_state_round_trips() {
    let state = PrState::from("draft".to_string());
    assert_eq!(state.as_str(), "draft");
    let json = serde_json::to_string(&state).unwrap();
    assert_eq!(json, "\"draft\"");
    assert_eq!(serde_json::from_str::<PrState>(&json).unwrap(), state);
}

#[test]
fn empty_commit_list_lands_in_zero_bucket() {
    let pulls = vec![pull("alice", "open", &[]), pull("bob", "open", &["a", "b"])];
    let counts = commits_per_pr(&pulls);
    assert_eq!(counts, vec![0, 2]);

    let buckets = histogram(&counts, 10);
    assert_eq!(buckets.len(), 10);
    assert_eq!(buckets[0].start, 0);
    assert_eq!(buckets[0].count, 1);
    assert_eq!(buckets.iter().map(|b| b.count).sum::<u64>(), 2);
}

#[test]
fn histogram_of_nothing_is_empty() {
    assert_eq!(histogram(&[], 10), vec![]);
}

#[test]
fn histogram_buckets_are_fixed_width() {
    let values: Vec<u64> = (0..=25).collect();
    let buckets = histogram(&values, 10);
    assert_eq!(buckets.len(), 10);
    let width = buckets[0].end - buckets[0].start + 1;
    for bucket in &buckets {
        assert_eq!(bucket.end - bucket.start + 1, width);
    }
    assert_eq!(buckets.iter().map(|b| b.count).sum::<u64>(), 26);
}

#[test]
fn export_round_trips_classified_commits() {
    let classified = classify_commits(vec![
        commit("A", "feat: add ingestion"),
        commit("B", "docs: describe the store"),
    ]);

    let json = to_json_pretty(&classified).unwrap();
    let reparsed: Vec<ClassifiedCommit> = serde_json::from_str(&json).unwrap();
    assert_eq!(classified, reparsed);
}

#[test]
fn export_uses_four_space_indentation_and_iso_dates() {
    let classified = classify_commits(vec![commit("A", "feat: x")]);
    let json = to_json_pretty(&classified).unwrap();

    assert!(json.starts_with("[\n    {\n        \""));
    assert!(json.contains("\"date\": \"2024-03-01T12:00:00Z\""));
    assert!(json.contains("\"type\": \"feat\""));
}

#[test]
fn pull_record_serializes_sha_list_as_commits() {
    let record = pull("alice", "merged", &["abc"]);
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["commits"], serde_json::json!(["abc"]));
    assert_eq!(value["state"], "merged");

    let reparsed: PullRequestRecord = serde_json::from_value(value).unwrap();
    assert_eq!(record, reparsed);
}
