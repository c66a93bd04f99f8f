use feedsite_core::stage::{Caption, LineStyle, Stage};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

/// Terminal rows between neighbouring caption lines
const ROWS_PER_LINE: f64 = 2.0;

/// Caption crawl of the introduction page
pub struct CaptionsWidget;

impl CaptionsWidget {
    pub fn render(frame: &mut Frame, area: Rect, stage: &Stage, theme: &Theme) {
        if area.height == 0 {
            return;
        }
        let text = stage.text();
        let hint_rows = if stage.pager().text_completed() { 2 } else { 0 };
        let crawl = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(hint_rows));

        for (caption, style) in text.captions().iter().zip(text.line_styles()) {
            let Some(row) = caption_row(crawl, style.distance) else {
                continue;
            };
            let line = caption_line(caption, &style, theme);
            let rect = Rect::new(crawl.x, row, crawl.width, 1);
            frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), rect);
        }

        if hint_rows > 0 && area.height > hint_rows {
            let rect = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            let hint = Line::from(vec![
                Span::styled("▼ ", Style::default().fg(theme.accent)),
                Span::styled(
                    "scroll down or press Enter for news",
                    Style::default().fg(theme.grey1),
                ),
            ]);
            frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), rect);
        }
    }
}

/// Screen row of a caption `distance` lines away from the focus line
pub fn caption_row(area: Rect, distance: f64) -> Option<u16> {
    let center = area.y as f64 + area.height as f64 / 2.0;
    let row = (center + distance * ROWS_PER_LINE).floor();
    if row < area.y as f64 || row >= area.bottom() as f64 {
        return None;
    }
    Some(row as u16)
}

fn caption_line(caption: &Caption, style: &LineStyle, theme: &Theme) -> Line<'static> {
    let color = theme.fade(theme.fg1, style.opacity);
    let mut text_style = Style::default().fg(color);
    // No font sizes in a terminal; scale picks the weight instead
    if style.scale >= 0.9 {
        text_style = text_style.add_modifier(Modifier::BOLD);
    } else if style.scale < 0.6 {
        text_style = text_style.add_modifier(Modifier::DIM);
    }

    if caption.attribution {
        Line::from(Span::styled(
            format!("- {}", caption.text),
            text_style.add_modifier(Modifier::ITALIC).fg(theme.fade(theme.accent, style.opacity)),
        ))
    } else {
        Line::from(Span::styled(caption.text.clone(), text_style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_line_is_centered() {
        let area = Rect::new(0, 2, 80, 20);
        assert_eq!(caption_row(area, 0.0), Some(12));
        assert_eq!(caption_row(area, 1.0), Some(14));
        assert_eq!(caption_row(area, -2.5), Some(7));
    }

    #[test]
    fn test_far_lines_are_clipped() {
        let area = Rect::new(0, 2, 80, 20);
        assert_eq!(caption_row(area, -6.0), None);
        assert_eq!(caption_row(area, 5.0), None);
        assert_eq!(caption_row(area, 4.5), Some(21));
    }

    #[test]
    fn test_focus_caption_is_bold() {
        let theme = Theme::default();
        let line = caption_line(&Caption::line("hello"), &LineStyle::at_distance(0.0), &theme);
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));

        let far = caption_line(&Caption::line("hello"), &LineStyle::at_distance(4.0), &theme);
        assert!(far.spans[0].style.add_modifier.contains(Modifier::DIM));
    }
}
