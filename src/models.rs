use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parser;

/// Display length of a commit id. Not collision-free, good enough in practice.
pub const SHORT_ID_LEN: usize = 7;

// --- GitHub wire shapes ---

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommit {
    pub sha: String,
    pub commit: RawCommitData,
    pub html_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitData {
    pub author: RawCommitAuthor,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitAuthor {
    pub name: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRepo {
    pub full_name: String,
}

// --- Normalized model ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedMessage {
    pub commit_type: Option<String>,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    pub is_breaking: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    pub short_id: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub message: String,
    pub html_url: String,
    pub commit_type: Option<String>,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    pub is_breaking: bool,
}

impl Commit {
    /// Normalizes a raw GitHub commit: truncated id, parsed message, merged
    /// author/date/permalink.
    pub fn from_raw(raw: RawCommit) -> Self {
        let parsed = parser::parse(&raw.commit.message);
        Self {
            short_id: raw.sha.chars().take(SHORT_ID_LEN).collect(),
            author: raw.commit.author.name,
            date: raw.commit.author.date,
            message: raw.commit.message,
            html_url: raw.html_url,
            commit_type: parsed.commit_type,
            scope: parsed.scope,
            subject: parsed.subject,
            body: parsed.body,
            is_breaking: parsed.is_breaking,
        }
    }
}

// --- Query layer ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    #[value(name = "date-desc")]
    DateDesc,
    #[value(name = "date-asc")]
    DateAsc,
    #[value(name = "author-asc")]
    AuthorAsc,
    #[value(name = "type-asc")]
    TypeAsc,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::DateDesc => "date ↓",
            SortKey::DateAsc => "date ↑",
            SortKey::AuthorAsc => "author ↑",
            SortKey::TypeAsc => "type ↑",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortKey::DateDesc => SortKey::DateAsc,
            SortKey::DateAsc => SortKey::AuthorAsc,
            SortKey::AuthorAsc => SortKey::TypeAsc,
            SortKey::TypeAsc => SortKey::DateDesc,
        }
    }
}

/// Active filter set. `None` on the exact-match fields means "all";
/// empty date strings mean "unbounded".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub text: String,
    pub author: Option<String>,
    pub commit_type: Option<String>,
    pub scope: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub sort: SortKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    pub commit_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub displayed: usize,
    pub total: usize,
    pub authors: usize,
    pub types: usize,
    pub distribution: Vec<TypeCount>,
    /// Largest distribution count, floored at 1 so bar widths never divide by zero.
    pub max_count: usize,
}

// --- TUI state ---

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    CommitList,
    RepoPicker,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditQuery,
    EditRepo,
    EditStartDate,
    EditEndDate,
}

pub struct App {
    pub repo_input: String,
    pub token: Option<String>,
    pub all_commits: Vec<Commit>,
    pub filters: FilterSpec,
    pub user_repos: Vec<UserRepo>,
    pub repo_picker_index: usize,
    pub error_msg: Option<String>,
    pub has_connected: bool,
    pub focus: FocusArea,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub selected_commit: Option<usize>,
    pub show_details: bool,
    pub status: Option<String>,
}

impl App {
    pub fn new(repo_input: String, token: Option<String>) -> Self {
        Self {
            repo_input,
            token,
            all_commits: Vec::new(),
            filters: FilterSpec::default(),
            user_repos: Vec::new(),
            repo_picker_index: 0,
            error_msg: None,
            has_connected: false,
            focus: FocusArea::CommitList,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            selected_commit: None,
            show_details: false,
            status: None,
        }
    }

    pub fn clear_commits(&mut self) {
        self.all_commits.clear();
        self.selected_commit = None;
        self.show_details = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(sha: &str, message: &str) -> RawCommit {
        RawCommit {
            sha: sha.to_string(),
            commit: RawCommitData {
                author: RawCommitAuthor {
                    name: "Ada".to_string(),
                    date: "2024-03-01T12:00:00Z".parse().unwrap(),
                },
                message: message.to_string(),
            },
            html_url: "https://github.com/acme/widget/commit/abc".to_string(),
        }
    }

    #[test]
    fn from_raw_truncates_id_and_merges_parse() {
        let commit = Commit::from_raw(raw("0123456789abcdef", "feat(core): wire it up"));
        assert_eq!(commit.short_id, "0123456");
        assert_eq!(commit.author, "Ada");
        assert_eq!(commit.commit_type.as_deref(), Some("feat"));
        assert_eq!(commit.scope.as_deref(), Some("core"));
        assert_eq!(commit.subject, "wire it up");
        assert_eq!(commit.message, "feat(core): wire it up");
    }

    #[test]
    fn from_raw_keeps_short_shas_whole() {
        let commit = Commit::from_raw(raw("ab12", "fix: x"));
        assert_eq!(commit.short_id, "ab12");
    }

    #[test]
    fn raw_commit_deserializes_github_shape() {
        let json = r#"{
            "sha": "4a5b6c7d8e9f0a1b2c3d4e5f6a7b8c9d0e1f2a3b",
            "html_url": "https://github.com/acme/widget/commit/4a5b6c7",
            "commit": {
                "message": "fix(api): handle timeout",
                "author": { "name": "Ada", "date": "2024-03-01T12:00:00Z" }
            }
        }"#;
        let raw: RawCommit = serde_json::from_str(json).unwrap();
        let commit = Commit::from_raw(raw);
        assert_eq!(commit.short_id, "4a5b6c7");
        assert_eq!(commit.commit_type.as_deref(), Some("fix"));
        assert_eq!(commit.date.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }
}
