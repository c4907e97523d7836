use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub focus_border: Color,
    pub blurred_border: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub selection_fg: Color,

    // Specific components
    pub commit_hash: Style,
    pub commit_datetime: Style,
    pub commit_author: Style,
    pub breaking_badge: Style,
    pub error_text: Style,
    pub footer: Style,
    pub popup_title: Style,
    pub popup_border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focus_border: Color::Cyan,
            blurred_border: Color::DarkGray,
            text: Color::White,
            text_secondary: Color::Gray,
            selection_fg: Color::Yellow,

            commit_hash: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            commit_datetime: Style::default().fg(Color::Magenta),
            commit_author: Style::default().fg(Color::Green),
            breaking_badge: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            error_text: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            popup_title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            popup_border: Style::default().fg(Color::Magenta),
        }
    }
}

impl Theme {
    /// Per-commit-type accent: feat green, fix red, docs purple,
    /// refactor cyan, everything else gray.
    pub fn type_style(&self, commit_type: Option<&str>) -> Style {
        let color = match commit_type {
            Some("feat") => Color::Green,
            Some("fix") => Color::Red,
            Some("docs") => Color::Magenta,
            Some("refactor") => Color::Cyan,
            _ => Color::Gray,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
