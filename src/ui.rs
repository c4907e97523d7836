use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::models::{App, Commit, FocusArea, InputMode, Stats};
use crate::theme::Theme;
use crate::utils::{distribution_bar, format_date};

const BAR_WIDTH: usize = 12;

/// Renders the whole frame: filter bar, stats sidebar, commit list,
/// optional detail pane, footer, repo-picker popup.
pub fn render_app(f: &mut Frame, app: &App, theme: &Theme, filtered: &[Commit], stats: &Stats) {
    let area = f.area();
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    render_filter_bar(f, app, theme, vertical_chunks[0]);

    // Main layout: stats sidebar, commits, optional detail
    let show_detail = app.show_details && app.selected_commit.is_some();
    let columns = if show_detail {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(34),     // stats sidebar
                Constraint::Percentage(60), // commit list
                Constraint::Percentage(40), // detail view
            ])
            .split(vertical_chunks[1])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(34), // stats sidebar
                Constraint::Min(1),     // commit list only
            ])
            .split(vertical_chunks[1])
    };

    render_stats(f, theme, stats, columns[0]);
    render_commit_list(f, app, theme, filtered, columns[1]);
    if show_detail {
        if let Some(commit) = app.selected_commit.and_then(|i| filtered.get(i)) {
            render_detail(f, theme, commit, columns[2]);
        }
    }

    render_footer(f, app, theme, vertical_chunks[2]);

    if app.focus == FocusArea::RepoPicker {
        render_repo_picker(f, app, theme);
    }
}

fn render_filter_bar(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let filters = &app.filters;
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "all".to_string());
    let date = |v: &str| if v.is_empty() { "-".to_string() } else { v.to_string() };

    let repo_line = Line::from(vec![
        Span::styled("Repo: ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            if app.repo_input.is_empty() { "<none>" } else { app.repo_input.as_str() },
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Sort: ", Style::default().fg(theme.text_secondary)),
        Span::styled(filters.sort.label(), Style::default().fg(theme.selection_fg)),
    ]);

    let filter_line = match app.input_mode {
        InputMode::Normal => Line::from(vec![
            Span::styled("Query: ", Style::default().fg(theme.text_secondary)),
            Span::raw(if filters.text.is_empty() { "-".to_string() } else { format!("'{}'", filters.text) }),
            Span::styled("  Author: ", Style::default().fg(theme.text_secondary)),
            Span::raw(opt(&filters.author)),
            Span::styled("  Type: ", Style::default().fg(theme.text_secondary)),
            Span::raw(opt(&filters.commit_type)),
            Span::styled("  Scope: ", Style::default().fg(theme.text_secondary)),
            Span::raw(opt(&filters.scope)),
            Span::styled("  From: ", Style::default().fg(theme.text_secondary)),
            Span::raw(date(&filters.start_date)),
            Span::styled("  To: ", Style::default().fg(theme.text_secondary)),
            Span::raw(date(&filters.end_date)),
        ]),
        mode => {
            let label = match mode {
                InputMode::EditQuery => "query",
                InputMode::EditRepo => "repo (owner/name)",
                InputMode::EditStartDate => "start date (YYYY-MM-DD)",
                InputMode::EditEndDate => "end date (YYYY-MM-DD)",
                InputMode::Normal => unreachable!(),
            };
            Line::from(vec![
                Span::styled(format!("Edit {label}: "), theme.popup_title),
                Span::raw(app.input_buffer.clone()),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ])
        }
    };

    let block = Block::default()
        .title("Filters")
        .borders(Borders::ALL)
        .style(Style::default().fg(theme.focus_border));
    let para = Paragraph::new(vec![repo_line, filter_line]).block(block);
    f.render_widget(para, area);
}

fn render_stats(f: &mut Frame, theme: &Theme, stats: &Stats, area: Rect) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Commits: ", Style::default().fg(theme.text_secondary)),
            Span::styled(
                format!("{} / {}", stats.displayed, stats.total),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Authors: ", Style::default().fg(theme.text_secondary)),
            Span::raw(stats.authors.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Types: ", Style::default().fg(theme.text_secondary)),
            Span::raw(stats.types.to_string()),
        ]),
        Line::from(""),
    ];

    for entry in &stats.distribution {
        let bar = distribution_bar(entry.count, stats.max_count, BAR_WIDTH);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<9}", entry.commit_type),
                theme.type_style(Some(entry.commit_type.as_str())),
            ),
            Span::styled(
                format!("{:<width$} ", bar, width = BAR_WIDTH),
                Style::default().fg(theme.focus_border),
            ),
            Span::raw(entry.count.to_string()),
        ]));
    }

    let block = Block::default()
        .title("Stats")
        .borders(Borders::ALL)
        .style(Style::default().fg(theme.blurred_border));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn commit_line(commit: &Commit, theme: &Theme, selected: bool) -> Line<'static> {
    let mut spans = vec![
        Span::raw(if selected { "→ " } else { "  " }),
        Span::styled(commit.short_id.clone(), theme.commit_hash),
        Span::raw(" "),
        Span::styled(format_date(&commit.date), theme.commit_datetime),
        Span::raw(" "),
        Span::styled(commit.author.clone(), theme.commit_author),
        Span::raw(" "),
    ];
    if let Some(commit_type) = &commit.commit_type {
        let tag = match &commit.scope {
            Some(scope) => format!("[{commit_type}({scope})]"),
            None => format!("[{commit_type}]"),
        };
        spans.push(Span::styled(tag, theme.type_style(Some(commit_type.as_str()))));
        spans.push(Span::raw(" "));
    }
    if commit.is_breaking {
        spans.push(Span::styled("!", theme.breaking_badge));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(commit.subject.clone()));
    Line::from(spans)
}

fn render_commit_list(f: &mut Frame, app: &App, theme: &Theme, filtered: &[Commit], area: Rect) {
    let block = Block::default()
        .title("Commits")
        .borders(Borders::ALL)
        .style(if app.focus == FocusArea::CommitList {
            Style::default().fg(theme.focus_border).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.focus_border)
        });

    if !app.has_connected {
        let welcome = Paragraph::new(
            "Not connected. Press R to enter a repository (owner/name),\n\
             or r to pick one of your repositories (token required).",
        )
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.text_secondary));
        f.render_widget(welcome, area);
        return;
    }

    if filtered.is_empty() {
        let empty = Paragraph::new("No commits match the current filters.")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text_secondary));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = filtered
        .iter()
        .enumerate()
        .map(|(i, commit)| {
            let selected = Some(i) == app.selected_commit;
            let style = if selected {
                Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(commit_line(commit, theme, selected)).style(style)
        })
        .collect();

    let mut state = ListState::default();
    state.select(app.selected_commit);
    f.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn render_detail(f: &mut Frame, theme: &Theme, commit: &Commit, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            commit.subject.clone(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Hash:   ", Style::default().fg(theme.text_secondary)),
            Span::styled(commit.short_id.clone(), theme.commit_hash),
        ]),
        Line::from(vec![
            Span::styled("Author: ", Style::default().fg(theme.text_secondary)),
            Span::styled(commit.author.clone(), theme.commit_author),
        ]),
        Line::from(vec![
            Span::styled("Date:   ", Style::default().fg(theme.text_secondary)),
            Span::styled(format_date(&commit.date), theme.commit_datetime),
        ]),
    ];
    if let Some(commit_type) = &commit.commit_type {
        lines.push(Line::from(vec![
            Span::styled("Type:   ", Style::default().fg(theme.text_secondary)),
            Span::styled(commit_type.clone(), theme.type_style(Some(commit_type.as_str()))),
        ]));
    }
    if let Some(scope) = &commit.scope {
        lines.push(Line::from(vec![
            Span::styled("Scope:  ", Style::default().fg(theme.text_secondary)),
            Span::raw(scope.clone()),
        ]));
    }
    if commit.is_breaking {
        lines.push(Line::from(Span::styled("BREAKING CHANGE", theme.breaking_badge)));
    }
    lines.push(Line::from(vec![
        Span::styled("Link:   ", Style::default().fg(theme.text_secondary)),
        Span::raw(commit.html_url.clone()),
    ]));
    if let Some(body) = &commit.body {
        lines.push(Line::from(""));
        for body_line in body.lines() {
            lines.push(Line::from(body_line.to_string()));
        }
    }

    let block = Block::default()
        .title("Details")
        .borders(Borders::ALL)
        .style(theme.popup_border);
    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn render_footer(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let content = if let Some(err) = &app.error_msg {
        Line::from(Span::styled(err.clone(), theme.error_text))
    } else if let Some(status) = &app.status {
        Line::from(Span::styled(status.clone(), Style::default().fg(theme.selection_fg)))
    } else {
        Line::from(
            "R Repo | r Pick repo | / Query | t Type | a Author | s Scope | [ ] Dates | o Sort | x Reset | ↑/↓ Navigate | ⏎ Details | y Copy link | g Refresh | q Quit",
        )
    };
    let footer = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL))
        .style(theme.footer);
    f.render_widget(footer, area);
}

fn render_repo_picker(f: &mut Frame, app: &App, theme: &Theme) {
    let popup_area = centered_rect(50, 60, f.area());
    f.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = app
        .user_repos
        .iter()
        .enumerate()
        .map(|(i, repo)| {
            let style = if i == app.repo_picker_index {
                Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Span::styled(repo.full_name.clone(), style))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.repo_picker_index));
    let block = Block::default()
        .title("Your repositories (⏎ connect, Esc close)")
        .borders(Borders::ALL)
        .style(theme.popup_border);
    f.render_stateful_widget(List::new(items).block(block), popup_area, &mut state);
}

/// Centers a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Percentage((100-percent_y)/2), Constraint::Percentage(percent_y), Constraint::Percentage((100-percent_y)/2)]).split(r)[1];
    Layout::default().direction(Direction::Horizontal)
        .constraints([Constraint::Percentage((100-percent_x)/2), Constraint::Percentage(percent_x), Constraint::Percentage((100-percent_x)/2)]).split(vertical)[1]
}
