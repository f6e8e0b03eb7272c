use crate::aggregate::{commits_per_pr, histogram, pr_author_counts, pr_state_counts, trim_histogram};
use crate::cli::CommonArgs;
use crate::model::{PullRequestRecord, PullsOutput, SCHEMA_VERSION};
use crate::source::Source;
use crate::store::DocStore;
use crate::util::{bar, fetch_spinner};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub const HISTOGRAM_BUCKETS: usize = 10;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let source = Source::from_args(&common).context("Failed to select ingestion source")?;

    let spinner = fetch_spinner("Fetching pull requests...", json || ndjson);
    let pulls = source
        .fetch_pulls(&common.repo)
        .context("Failed to fetch pull requests")?;
    spinner.finish_and_clear();

    if let Some(store_dir) = &common.store {
        persist(&DocStore::new(store_dir), &common.repo, &pulls);
    }

    if json {
        output_json(&pulls, &common)?;
    } else if ndjson {
        output_ndjson(&pulls)?;
    } else {
        output_summary(&pulls, &common.repo);
    }

    Ok(())
}

fn persist(store: &DocStore, repo_name: &str, pulls: &[PullRequestRecord]) {
    let result = store
        .ping()
        .and_then(|_| store.insert_document("pull-requests", repo_name, pulls));
    match result {
        Ok(path) => eprintln!(
            "{} {}",
            style("Persisted pull requests to").dim(),
            path.display()
        ),
        Err(e) => eprintln!(
            "{} {e}",
            style("Warning: pull requests not persisted:").yellow()
        ),
    }
}

fn output_json(pulls: &[PullRequestRecord], common: &CommonArgs) -> anyhow::Result<()> {
    let output = PullsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repo_name: common.repo.clone(),
        author_counts: pr_author_counts(pulls),
        state_counts: pr_state_counts(pulls),
        commits_per_pr: histogram(&commits_per_pr(pulls), HISTOGRAM_BUCKETS),
        pulls: pulls.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(pulls: &[PullRequestRecord]) -> anyhow::Result<()> {
    for pull in pulls {
        println!("{}", serde_json::to_string(pull)?);
    }
    Ok(())
}

fn output_summary(pulls: &[PullRequestRecord], repo_name: &str) {
    if pulls.is_empty() {
        println!("No pull requests found.");
        return;
    }

    println!(
        "Found {} pull requests in {}.",
        style(pulls.len()).cyan(),
        style(repo_name).bold()
    );

    let author_counts = pr_author_counts(pulls);
    let max_by_author = author_counts.iter().map(|a| a.count).max().unwrap_or(0);
    println!();
    println!("{}", style("Pull Requests by Author").bold());
    println!("{}", "─".repeat(70));
    for entry in &author_counts {
        println!(
            "{:<24} {:>5} {}",
            entry.author,
            entry.count,
            bar(entry.count, max_by_author, 40)
        );
    }

    let state_counts = pr_state_counts(pulls);
    println!();
    println!("{}", style("Pull Requests by State").bold());
    println!("{}", "─".repeat(70));
    for entry in &state_counts {
        let share = entry.count as f64 / pulls.len() as f64 * 100.0;
        println!("{:<10} {:>5}  ({share:.1}%)", entry.state, entry.count);
    }

    let buckets = trim_histogram(histogram(&commits_per_pr(pulls), HISTOGRAM_BUCKETS));
    let max_bucket = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    println!();
    println!("{}", style("Commits per Pull Request").bold());
    println!("{}", "─".repeat(70));
    for bucket in &buckets {
        let range = if bucket.start == bucket.end {
            format!("{}", bucket.start)
        } else {
            format!("{}-{}", bucket.start, bucket.end)
        };
        println!(
            "{:<10} {:>5} {}",
            range,
            bucket.count,
            bar(bucket.count, max_bucket, 40)
        );
    }

    println!("\nUse --json or --ndjson flags to export the raw data.");
}
