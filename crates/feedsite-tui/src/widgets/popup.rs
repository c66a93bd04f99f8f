use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;
use crate::widgets::centered_rect;

pub struct PopupWidget;

impl PopupWidget {
    /// Render a confirmation popup dialog
    pub fn render_confirm(frame: &mut Frame, title: &str, message: &str, theme: &Theme) {
        let area = frame.area();

        let popup_width = 50u16.min(area.width.saturating_sub(4));
        let popup_height = 7u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .style(Style::default().bg(theme.bg1));

        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Message
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        let message_paragraph = Paragraph::new(Line::from(vec![Span::styled(
            message,
            Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
        )]))
        .alignment(Alignment::Center);

        frame.render_widget(message_paragraph, chunks[0]);

        let hint_paragraph = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(theme.grey1)),
            Span::styled("y", Style::default().fg(theme.green).add_modifier(Modifier::BOLD)),
            Span::styled("]es  [", Style::default().fg(theme.grey1)),
            Span::styled("n", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::styled("]o", Style::default().fg(theme.grey1)),
        ]))
        .alignment(Alignment::Center);

        frame.render_widget(hint_paragraph, chunks[2]);
    }

    /// Confirm deleting one news item
    pub fn render_delete_confirm(frame: &mut Frame, news_title: &str, theme: &Theme) {
        let message = format!("Delete \"{}\"?", truncate_str(news_title, 30));
        Self::render_confirm(frame, "Confirm Delete", &message, theme);
    }

    /// Key reference
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let popup_area = centered_rect(56, HELP.len() as u16 + 4, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let mut lines = vec![Line::default()];
        lines.extend(HELP.iter().map(|(keys, what)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>16}  ", keys),
                    Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*what, Style::default().fg(theme.fg0)),
            ])
        }));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

const HELP: &[(&str, &str)] = &[
    ("wheel / drag", "advance captions, then change page"),
    ("PgDn / PgUp / ↓↑", "same as the wheel"),
    ("Enter", "continue to news / open image"),
    ("1 / 2", "jump to introduction / news"),
    ("j / k", "select news item"),
    ("m", "load more news"),
    ("o", "open image in browser"),
    ("L / X", "log in / log out"),
    ("M", "manage news"),
    ("Ctrl+R", "switch login / register"),
    ("Esc", "back"),
    ("q", "quit"),
];

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
