use crate::error::{LensError, Result};
use crate::model::{CommitRecord, PullRequestRecord};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("commitlens/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: usize = 100;

/// Read-only client for the GitHub REST API. Pages through the full commit
/// and pull-request history of a repository; any transport or decode
/// failure surfaces as a single `Fetch` error carrying the cause.
pub struct GithubSource {
    agent: ureq::Agent,
    token: String,
}

#[derive(Debug, Deserialize)]
struct CommitItem {
    sha: String,
    commit: CommitDetail,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
    author: CommitAuthor,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    name: String,
    date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct PullItem {
    number: u64,
    title: String,
    user: PullUser,
    created_at: DateTime<Utc>,
    state: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct PullUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct PullDetail {
    comments: u64,
    review_comments: u64,
}

#[derive(Debug, Deserialize)]
struct PullCommit {
    sha: String,
}

impl GithubSource {
    pub fn new(token: String) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            token,
        }
    }

    pub fn fetch_commits(&self, repo_name: &str) -> Result<Vec<CommitRecord>> {
        let mut records = Vec::new();

        for items in Paginated::<CommitItem>::new(self, format!("repos/{repo_name}/commits")) {
            let items = items?;
            records.extend(items.into_iter().map(|item| CommitRecord {
                sha: item.sha,
                message: item.commit.message,
                author: item.commit.author.name,
                date: item.commit.author.date,
                url: item.html_url,
                repo_name: repo_name.to_string(),
            }));
        }

        Ok(records)
    }

    pub fn fetch_pulls(&self, repo_name: &str) -> Result<Vec<PullRequestRecord>> {
        let mut records = Vec::new();

        let pages = Paginated::<PullItem>::new(
            self,
            format!("repos/{repo_name}/pulls?state=all&sort=created&direction=desc"),
        );
        for items in pages {
            for item in items? {
                // The list endpoint omits review activity and commits, so
                // each pull request costs two extra calls.
                let detail: PullDetail =
                    self.get_json(&format!("repos/{}/pulls/{}", repo_name, item.number))?;
                let commit_shas = self.fetch_pull_commits(repo_name, item.number)?;

                records.push(PullRequestRecord {
                    number: item.number,
                    title: item.title,
                    author: item.user.login,
                    created_at: item.created_at,
                    state: item.state.into(),
                    comments: detail.comments,
                    review_comments: detail.review_comments,
                    commit_shas,
                    url: item.html_url,
                    repo_name: repo_name.to_string(),
                });
            }
        }

        Ok(records)
    }

    fn fetch_pull_commits(&self, repo_name: &str, number: u64) -> Result<Vec<String>> {
        let mut shas = Vec::new();
        let pages =
            Paginated::<PullCommit>::new(self, format!("repos/{repo_name}/pulls/{number}/commits"));
        for items in pages {
            shas.extend(items?.into_iter().map(|c| c.sha));
        }
        Ok(shas)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{API_ROOT}/{path}");
        let response = self
            .agent
            .get(&url)
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT)
            .set("Authorization", &format!("Bearer {}", self.token))
            .call()?;
        response
            .into_json::<T>()
            .map_err(|e| LensError::Fetch(format!("invalid response from {url}: {e}")))
    }
}

/// Walks a list endpoint page by page until a short page signals the end
/// of the history. An empty first page is a valid empty history.
struct Paginated<'a, T> {
    source: &'a GithubSource,
    path: String,
    page: usize,
    done: bool,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T> Paginated<'a, T> {
    fn new(source: &'a GithubSource, path: String) -> Self {
        Self {
            source,
            path,
            page: 1,
            done: false,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<'a, T: serde::de::DeserializeOwned> Iterator for Paginated<'a, T> {
    type Item = Result<Vec<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let separator = if self.path.contains('?') { '&' } else { '?' };
        let url = format!(
            "{}{}per_page={}&page={}",
            self.path, separator, PER_PAGE, self.page
        );
        self.page += 1;

        match self.source.get_json::<Vec<T>>(&url) {
            Ok(items) => {
                if items.len() < PER_PAGE {
                    self.done = true;
                }
                if items.is_empty() {
                    None
                } else {
                    Some(Ok(items))
                }
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
