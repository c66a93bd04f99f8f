use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::form::Form;
use crate::theme::Theme;

const LABEL_WIDTH: usize = 18;

pub struct FormWidget;

impl FormWidget {
    /// Render `form` inside a bordered box filling `area`
    pub fn render(frame: &mut Frame, area: Rect, form: &Form, hint: &str, focused: bool, theme: &Theme) {
        let border = if focused { theme.accent } else { theme.grey0 };
        let block = Block::default()
            .title(format!(" {} ", form.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::default()];
        for (index, field) in form.fields.iter().enumerate() {
            let active = focused && index == form.focused;
            let label_style = if active {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.grey1)
            };
            let mut spans = vec![
                Span::styled(format!("{:>width$} ", field.label, width = LABEL_WIDTH), label_style),
                Span::styled(field.display_value(), Style::default().fg(theme.fg1)),
            ];
            if active {
                spans.push(Span::styled("▏", Style::default().fg(theme.accent)));
            }
            lines.push(Line::from(spans));
            lines.push(Line::default());
        }

        if form.submitting {
            lines.push(Line::from(Span::styled("Submitting...", Style::default().fg(theme.info))));
        } else if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(theme.error))));
        } else {
            lines.push(Line::default());
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(hint.to_string(), Style::default().fg(theme.grey0))));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    /// Rows a form needs, borders included
    pub fn height(form: &Form) -> u16 {
        form.fields.len() as u16 * 2 + 6
    }
}

/// Rect of `width` x `height` centered in `area`, clipped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
