// src/main.rs
use anyhow::bail;
use clap::Parser;
use crossterm::{event::{self, Event}, terminal};
use ratatui::prelude::*;
use tokio::runtime::Runtime;

mod config;
mod github;
mod input;
mod models;
mod parser;
mod query;
mod theme;
mod ui;
mod utils;

use models::{App, Commit, SortKey};
use theme::Theme;

#[derive(Parser)]
#[command(name = "commitlens", version)]
#[command(about = "Browse, filter and aggregate conventional commits from GitHub")]
struct Cli {
    /// Repository to open, as owner/name
    repo: Option<String>,

    /// GitHub token (falls back to GITHUB_TOKEN, then the config file)
    #[arg(long)]
    token: Option<String>,

    /// Initial text query (subject, author or short-id prefix)
    #[arg(long)]
    query: Option<String>,

    #[arg(long, value_enum, default_value = "date-desc")]
    sort: SortKey,

    /// Print the filtered commits as JSON instead of starting the TUI
    #[arg(long)]
    json: bool,

    /// Store the resolved token in the user config file
    #[arg(long)]
    save_token: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = config::Settings::new().unwrap_or_default();

    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()))
        .or_else(|| settings.resolve_token());

    if cli.save_token {
        match &token {
            Some(token) => config::save_token(token)?,
            None => bail!("no token to save; pass --token or set GITHUB_TOKEN"),
        }
    }

    let repo = cli
        .repo
        .clone()
        .or(settings.default_repo)
        .unwrap_or_default();

    let rt = Runtime::new()?;
    let client = reqwest::Client::new();

    let mut app = App::new(repo, token);
    if let Some(query) = cli.query {
        app.filters.text = query;
    }
    app.filters.sort = cli.sort;

    if cli.json {
        return dump_json(&app, &rt, &client);
    }

    if !app.repo_input.is_empty() {
        input::connect(&mut app, &rt, &client);
    }

    terminal::enable_raw_mode()?;
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let theme = Theme::default();
    loop {
        // Filtered view and stats are pure projections, recomputed per frame.
        let filtered = query::apply(&app.all_commits, &app.filters);
        let stats = query::summarize(&app.all_commits, &filtered);
        terminal.draw(|f| {
            ui::render_app(f, &app, &theme, &filtered, &stats);
        })?;

        if event::poll(std::time::Duration::from_millis(200))? {
            if let Event::Key(key_event) = event::read()? {
                if input::handle_key(&mut app, key_event.code, &rt, &client)? {
                    break;
                }
            }
        }
    }

    terminal::disable_raw_mode()?;
    Ok(())
}

/// Non-interactive mode: fetch, filter, print, exit.
fn dump_json(app: &App, rt: &Runtime, client: &reqwest::Client) -> anyhow::Result<()> {
    let Some((owner, repo)) = github::split_repo_path(&app.repo_input) else {
        bail!("{}", github::ERR_INVALID_REPO);
    };
    let raw = rt.block_on(github::fetch_commits(client, owner, repo, app.token.as_deref()))?;
    let commits: Vec<Commit> = raw.into_iter().map(Commit::from_raw).collect();
    let filtered = query::apply(&commits, &app.filters);
    println!("{}", serde_json::to_string_pretty(&filtered)?);
    Ok(())
}
