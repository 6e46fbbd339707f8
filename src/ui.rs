use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::session::{Phase, Session};

const HORIZONTAL_MARGIN: u16 = 5;

/// Color scheme. Pure presentation; toggling never touches the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    fn base_style(self) -> Style {
        match self {
            Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
            Theme::Dark => Style::default().fg(Color::White).bg(Color::Black),
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.base_style());

        if self.loading {
            render_loading(area, buf);
        } else if self.session.has_finished() {
            render_results(&self.session, area, buf);
        } else {
            render_typing(&self.session, area, buf);
        }
    }
}

fn render_loading(area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let message = Paragraph::new(Span::styled(
        "fetching paragraph...",
        Style::default().add_modifier(Modifier::BOLD | Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    message.render(chunks[1], buf);
}

fn render_typing(session: &Session, area: Rect, buf: &mut Buffer) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let green_bold = bold.fg(Color::Green);
    let red_bold = bold.fg(Color::Red);
    let dim_bold = bold.add_modifier(Modifier::DIM);
    let underlined_dim_bold = dim_bold.add_modifier(Modifier::UNDERLINED);
    let italic_dim = Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let mut prompt_occupied_lines =
        ((session.reference.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;

    if session.reference.width() <= max_chars_per_line as usize {
        prompt_occupied_lines = 1;
    }

    let hint_lines = if session.phase == Phase::Idle { 2 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(
                ((area.height.saturating_sub(prompt_occupied_lines)) as f64 / 2.0) as u16,
            ),
            Constraint::Length(2),
            Constraint::Length(prompt_occupied_lines),
            Constraint::Length(hint_lines),
            Constraint::Min(0),
        ])
        .split(area);

    let timer = Paragraph::new(Span::styled(
        format!("{}s", session.remaining_secs),
        dim_bold,
    ))
    .alignment(Alignment::Center);
    timer.render(chunks[1], buf);

    let reference: Vec<char> = session.reference.chars().collect();
    let typed: Vec<char> = session.typed.chars().collect();

    let mut spans = Vec::with_capacity(reference.len());
    for (idx, &expected) in reference.iter().enumerate() {
        let span = match typed.get(idx) {
            Some(&got) if got == expected => Span::styled(expected.to_string(), green_bold),
            Some(&got) => Span::styled(
                match got {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold,
            ),
            None if idx == typed.len() => Span::styled(expected.to_string(), underlined_dim_bold),
            None => Span::styled(expected.to_string(), dim_bold),
        };
        spans.push(span);
    }

    let prompt = Paragraph::new(Line::from(spans))
        .alignment(if prompt_occupied_lines == 1 {
            // a single centered line reads nicer than a left-justified one
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    prompt.render(chunks[2], buf);

    if session.phase == Phase::Idle {
        let hint = Paragraph::new(Span::styled(
            format!(
                "{}s test · ↑/↓ time · ctrl+n new paragraph · ctrl+t theme · esc quit",
                session.duration_secs
            ),
            italic_dim,
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        hint.render(chunks[3], buf);
    }
}

fn render_results(session: &Session, area: Rect, buf: &mut Buffer) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let italic_dim = Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let wpm = Paragraph::new(Span::styled(
        format!("{:.2} wpm", session.score.wpm),
        bold,
    ))
    .alignment(Alignment::Center);
    wpm.render(chunks[1], buf);

    let accuracy = Paragraph::new(Span::styled(
        format!("{:.2}% acc", session.score.accuracy),
        bold,
    ))
    .alignment(Alignment::Center);
    accuracy.render(chunks[2], buf);

    let legend = Paragraph::new(Span::styled("(r)etry (n)ew paragraph (esc)ape", italic_dim))
        .alignment(Alignment::Center);
    legend.render(chunks[4], buf);
}
