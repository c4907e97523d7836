use anyhow::Result;
use arboard::Clipboard;
use crossterm::event::KeyCode;
use reqwest::Client;
use tokio::runtime::Runtime;

use crate::github::{self, ERR_FETCH_COMMITS, ERR_FETCH_REPOS, ERR_INVALID_REPO};
use crate::models::{App, Commit, FilterSpec, FocusArea, InputMode};
use crate::query;
use crate::utils::cycle_filter_value;

/// Validates the repo input, fetches one page of commits and swaps the
/// working set wholesale. On failure the set is cleared so stale data is
/// never shown next to an error.
pub fn connect(app: &mut App, rt: &Runtime, client: &Client) {
    app.error_msg = None;
    app.status = None;

    let Some((owner, repo)) = github::split_repo_path(&app.repo_input) else {
        app.error_msg = Some(ERR_INVALID_REPO.to_string());
        return;
    };

    app.has_connected = true;
    match rt.block_on(github::fetch_commits(client, owner, repo, app.token.as_deref())) {
        Ok(raw) => {
            app.all_commits = raw.into_iter().map(Commit::from_raw).collect();
            app.selected_commit = None;
        }
        Err(_) => {
            app.error_msg = Some(ERR_FETCH_COMMITS.to_string());
            app.clear_commits();
        }
    }
}

/// Fetches the authenticated user's repositories for the picker.
pub fn load_user_repos(app: &mut App, rt: &Runtime, client: &Client) {
    let Some(token) = app.token.clone() else {
        app.error_msg = Some(ERR_FETCH_REPOS.to_string());
        return;
    };
    match rt.block_on(github::fetch_user_repos(client, &token)) {
        Ok(repos) => {
            app.user_repos = repos;
            app.repo_picker_index = 0;
            if app.repo_input.is_empty() {
                if let Some(first) = app.user_repos.first() {
                    app.repo_input = first.full_name.clone();
                }
            }
        }
        Err(_) => {
            app.user_repos.clear();
            app.error_msg = Some(ERR_FETCH_REPOS.to_string());
        }
    }
}

pub fn handle_key(app: &mut App, key: KeyCode, rt: &Runtime, client: &Client) -> Result<bool> {
    if app.input_mode != InputMode::Normal {
        handle_edit_key(app, key, rt, client);
        return Ok(false);
    }

    if app.focus == FocusArea::RepoPicker {
        handle_picker_key(app, key, rt, client);
        return Ok(false);
    }

    match key {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('/') => enter_edit(app, InputMode::EditQuery),
        KeyCode::Char('R') => enter_edit(app, InputMode::EditRepo),
        KeyCode::Char('[') => enter_edit(app, InputMode::EditStartDate),
        KeyCode::Char(']') => enter_edit(app, InputMode::EditEndDate),
        KeyCode::Char('t') => {
            let values = query::distinct_values(&app.all_commits, |c| c.commit_type.as_deref());
            app.filters.commit_type =
                cycle_filter_value(app.filters.commit_type.as_deref(), &values);
            app.selected_commit = None;
        }
        KeyCode::Char('a') => {
            let values = query::distinct_values(&app.all_commits, |c| Some(c.author.as_str()));
            app.filters.author = cycle_filter_value(app.filters.author.as_deref(), &values);
            app.selected_commit = None;
        }
        KeyCode::Char('s') => {
            let values = query::distinct_values(&app.all_commits, |c| c.scope.as_deref());
            app.filters.scope = cycle_filter_value(app.filters.scope.as_deref(), &values);
            app.selected_commit = None;
        }
        KeyCode::Char('o') => {
            app.filters.sort = app.filters.sort.next();
        }
        KeyCode::Char('x') => {
            app.filters = FilterSpec::default();
            app.selected_commit = None;
        }
        KeyCode::Char('r') => {
            load_user_repos(app, rt, client);
            if !app.user_repos.is_empty() {
                app.focus = FocusArea::RepoPicker;
            }
        }
        KeyCode::Char('g') => connect(app, rt, client),
        KeyCode::Char('y') => copy_permalink(app),
        KeyCode::Char('d') | KeyCode::Char(' ') | KeyCode::Enter => {
            if app.selected_commit.is_some() {
                app.show_details = !app.show_details;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => move_selection(app, 1),
        KeyCode::Up | KeyCode::Char('k') => move_selection(app, -1),
        KeyCode::Esc => {
            app.error_msg = None;
            app.status = None;
        }
        _ => {}
    }
    Ok(false)
}

fn handle_edit_key(app: &mut App, key: KeyCode, rt: &Runtime, client: &Client) {
    match key {
        KeyCode::Char(c) => app.input_buffer.push(c),
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Esc => {
            app.input_buffer.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            let value = std::mem::take(&mut app.input_buffer);
            let mode = app.input_mode;
            app.input_mode = InputMode::Normal;
            match mode {
                InputMode::EditQuery => {
                    app.filters.text = value;
                    app.selected_commit = None;
                }
                InputMode::EditRepo => {
                    app.repo_input = value;
                    connect(app, rt, client);
                }
                InputMode::EditStartDate => {
                    app.filters.start_date = value;
                    app.selected_commit = None;
                }
                InputMode::EditEndDate => {
                    app.filters.end_date = value;
                    app.selected_commit = None;
                }
                InputMode::Normal => {}
            }
        }
        _ => {}
    }
}

fn handle_picker_key(app: &mut App, key: KeyCode, rt: &Runtime, client: &Client) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            if app.repo_picker_index + 1 < app.user_repos.len() {
                app.repo_picker_index += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.repo_picker_index = app.repo_picker_index.saturating_sub(1);
        }
        KeyCode::Enter => {
            if let Some(repo) = app.user_repos.get(app.repo_picker_index) {
                app.repo_input = repo.full_name.clone();
                app.focus = FocusArea::CommitList;
                connect(app, rt, client);
            }
        }
        KeyCode::Esc | KeyCode::Char('q') => app.focus = FocusArea::CommitList,
        _ => {}
    }
}

fn enter_edit(app: &mut App, mode: InputMode) {
    app.input_mode = mode;
    app.input_buffer = match mode {
        InputMode::EditQuery => app.filters.text.clone(),
        InputMode::EditRepo => app.repo_input.clone(),
        InputMode::EditStartDate => app.filters.start_date.clone(),
        InputMode::EditEndDate => app.filters.end_date.clone(),
        InputMode::Normal => String::new(),
    };
}

fn move_selection(app: &mut App, delta: i64) {
    let visible = query::apply(&app.all_commits, &app.filters).len();
    if visible == 0 {
        app.selected_commit = None;
        return;
    }
    let current = app.selected_commit.map(|i| i as i64).unwrap_or(-1);
    let next = (current + delta).clamp(0, visible as i64 - 1);
    app.selected_commit = Some(next as usize);
}

fn copy_permalink(app: &mut App) {
    let filtered = query::apply(&app.all_commits, &app.filters);
    let Some(commit) = app.selected_commit.and_then(|i| filtered.get(i)) else {
        return;
    };
    match Clipboard::new().and_then(|mut cb| cb.set_text(commit.html_url.clone())) {
        Ok(()) => app.status = Some(format!("Copied link for {}", commit.short_id)),
        Err(_) => app.status = Some("Clipboard unavailable".to_string()),
    }
}
