use crate::aggregate::classify_commits;
use crate::cli::{CommonArgs, ExportTarget};
use crate::error::Result;
use crate::source::Source;
use crate::util::fetch_spinner;
use anyhow::Context;
use console::style;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Canonical JSON serialization: UTF-8, 4-space indentation, ISO-8601
/// timestamps. Decoding an export reproduces every field losslessly.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| crate::error::LensError::Parse(e.to_string()))
}

pub fn exec(common: CommonArgs, target: ExportTarget, out: Option<&Path>) -> anyhow::Result<()> {
    let source = Source::from_args(&common).context("Failed to select ingestion source")?;

    let json = match target {
        ExportTarget::Commits => {
            let spinner = fetch_spinner("Fetching commits...", out.is_none());
            let commits = source
                .fetch_commits(&common.repo)
                .context("Failed to fetch commits")?;
            spinner.finish_and_clear();
            to_json_pretty(&classify_commits(commits))?
        }
        ExportTarget::Pulls => {
            let spinner = fetch_spinner("Fetching pull requests...", out.is_none());
            let pulls = source
                .fetch_pulls(&common.repo)
                .context("Failed to fetch pull requests")?;
            spinner.finish_and_clear();
            to_json_pretty(&pulls)?
        }
    };

    match out {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            eprintln!("{} {}", style("Exported to").green(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
