use crate::aggregate::{classify_commits, type_by_author, type_totals};
use crate::classify::CommitType;
use crate::cli::CommonArgs;
use crate::model::{ClassifiedCommit, CommitsOutput, SCHEMA_VERSION};
use crate::source::Source;
use crate::store::DocStore;
use crate::util::{bar, fetch_spinner};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let source = Source::from_args(&common).context("Failed to select ingestion source")?;

    let spinner = fetch_spinner("Fetching commits...", json || ndjson);
    let commits = source
        .fetch_commits(&common.repo)
        .context("Failed to fetch commits")?;
    spinner.finish_and_clear();

    let classified = classify_commits(commits);

    // Persistence is fire-and-forget: a dead store warns, never aborts.
    if let Some(store_dir) = &common.store {
        persist(&DocStore::new(store_dir), &common.repo, &classified);
    }

    if json {
        output_json(&classified, &common)?;
    } else if ndjson {
        output_ndjson(&classified)?;
    } else {
        output_summary(&classified, &common.repo);
    }

    Ok(())
}

fn persist(store: &DocStore, repo_name: &str, classified: &[ClassifiedCommit]) {
    let result = store
        .ping()
        .and_then(|_| store.insert_document("commits", repo_name, classified));
    match result {
        Ok(path) => eprintln!(
            "{} {}",
            style("Persisted commits to").dim(),
            path.display()
        ),
        Err(e) => eprintln!("{} {e}", style("Warning: commits not persisted:").yellow()),
    }
}

fn output_json(classified: &[ClassifiedCommit], common: &CommonArgs) -> anyhow::Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repo_name: common.repo.clone(),
        type_counts: type_by_author(classified),
        commits: classified.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(classified: &[ClassifiedCommit]) -> anyhow::Result<()> {
    for commit in classified {
        println!("{}", serde_json::to_string(commit)?);
    }
    Ok(())
}

fn output_summary(classified: &[ClassifiedCommit], repo_name: &str) {
    if classified.is_empty() {
        println!("No commits found.");
        return;
    }

    println!(
        "Found {} commits in {}.",
        style(classified.len()).cyan(),
        style(repo_name).bold()
    );
    println!();

    let table = type_by_author(classified);

    println!("{}", style("Commit Types by Author").bold());
    println!("{}", "─".repeat(70));
    println!(
        "{:<24} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "Author", "docs", "feat", "fix", "merge", "tests", "other"
    );
    for row in &table {
        println!(
            "{:<24} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
            row.author, row.docs, row.feat, row.fix, row.merge, row.tests, row.other
        );
    }

    println!();
    println!("{}", style("Totals").bold());
    println!("{}", "─".repeat(70));
    let totals = type_totals(&table);
    let max = totals.iter().map(|(_, n)| *n).max().unwrap_or(0);
    for (commit_type, count) in totals {
        let label = format!("{:<8}", commit_type.as_str());
        let colored = match commit_type {
            CommitType::Docs => style(label).blue(),
            CommitType::Feat => style(label).green(),
            CommitType::Fix => style(label).red(),
            CommitType::Merge => style(label).magenta(),
            CommitType::Tests => style(label).yellow(),
            CommitType::Other => style(label).dim(),
        };
        println!("{} {:>6} {}", colored, count, bar(count, max, 40));
    }

    println!("\nUse --json or --ndjson flags to export the raw data.");
}
