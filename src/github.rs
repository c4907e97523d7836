use anyhow::{Context, Result};
use reqwest::Client;

use crate::models::{RawCommit, UserRepo};

const API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("commitlens/", env!("CARGO_PKG_VERSION"));
// Single page only; no pagination follow-through.
const PER_PAGE: u32 = 100;

pub const ERR_INVALID_REPO: &str = "Invalid repository format. Use \"owner/repo\".";
pub const ERR_FETCH_COMMITS: &str =
    "Failed to fetch commits. Check the token, repository name, and permissions.";
pub const ERR_FETCH_REPOS: &str =
    "Failed to fetch repositories. The token is invalid or lacks permission.";

/// Splits an `owner/repo` identifier. Valid only with exactly one separator
/// and two non-empty parts; checked before any network call.
pub fn split_repo_path(path: &str) -> Option<(&str, &str)> {
    let mut parts = path.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Some((owner, repo))
        }
        _ => None,
    }
}

pub async fn fetch_commits(
    client: &Client,
    owner: &str,
    repo: &str,
    token: Option<&str>,
) -> Result<Vec<RawCommit>> {
    let url = format!("{API_URL}/repos/{owner}/{repo}/commits?per_page={PER_PAGE}");
    let mut request = client
        .get(&url)
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", USER_AGENT);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let commits = request
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("GET {url}"))?
        .json::<Vec<RawCommit>>()
        .await
        .context("decoding commit list")?;
    Ok(commits)
}

pub async fn fetch_user_repos(client: &Client, token: &str) -> Result<Vec<UserRepo>> {
    let url = format!("{API_URL}/user/repos?per_page={PER_PAGE}&sort=updated&type=all");
    let repos = client
        .get(&url)
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", USER_AGENT)
        .bearer_auth(token)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("GET {url}"))?
        .json::<Vec<UserRepo>>()
        .await
        .context("decoding repository list")?;
    Ok(repos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_owner_slash_repo() {
        assert_eq!(split_repo_path("acme/widget"), Some(("acme", "widget")));
    }

    #[test]
    fn rejects_malformed_paths() {
        assert_eq!(split_repo_path(""), None);
        assert_eq!(split_repo_path("acme"), None);
        assert_eq!(split_repo_path("acme/"), None);
        assert_eq!(split_repo_path("/widget"), None);
        assert_eq!(split_repo_path("acme/widget/extra"), None);
        assert_eq!(split_repo_path("/"), None);
    }
}
