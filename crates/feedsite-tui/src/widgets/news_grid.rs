use feedsite_core::api::NewsItem;
use feedsite_core::news::{image_label, truncate_description};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

const CARD_WIDTH: u16 = 34;
const CARD_HEIGHT: u16 = 7;
const MAX_COLUMNS: usize = 3;
const DESCRIPTION_LINES: usize = 2;

pub struct NewsGridWidget;

impl NewsGridWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        if area.height < 2 {
            return;
        }

        let header = Rect::new(area.x, area.y, area.width, 1);
        let footer = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        let body = Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(2));

        let title = Line::from(vec![
            Span::styled(
                " Latest news ",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} total", app.feed.total()),
                Style::default().fg(theme.grey1),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), header);

        let items = app.feed.items();
        if items.is_empty() {
            let message = if app.feed.is_loaded() { "No news yet" } else { "Loading news..." };
            let rect = Rect::new(body.x, body.y + body.height / 2, body.width, 1.min(body.height));
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(theme.grey1)))
                    .alignment(Alignment::Center),
                rect,
            );
        } else {
            Self::render_cards(frame, body, items, app.selected_news, theme);
        }

        frame.render_widget(Paragraph::new(footer_line(app, theme)).alignment(Alignment::Center), footer);
    }

    fn render_cards(frame: &mut Frame, body: Rect, items: &[NewsItem], selected: usize, theme: &Theme) {
        let columns = grid_columns(body.width);
        let visible_rows = (body.height / CARD_HEIGHT).max(1) as usize;
        let first_row = first_visible_row(selected / columns, visible_rows);
        let card_width = body.width / columns as u16;

        for (index, item) in items.iter().enumerate().skip(first_row * columns) {
            let row = index / columns - first_row;
            if row >= visible_rows {
                break;
            }
            let col = index % columns;
            let y = body.y + row as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(body.bottom().saturating_sub(y));
            if height < 3 {
                break;
            }
            let rect = Rect::new(body.x + col as u16 * card_width, y, card_width, height);
            render_card(frame, rect, item, index == selected, theme);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, item: &NewsItem, selected: bool, theme: &Theme) {
    let border = if selected { theme.accent } else { theme.grey0 };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(if selected { theme.bg1 } else { theme.bg0 }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            item.title.clone(),
            Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(byline(item), Style::default().fg(theme.grey1))),
    ];
    for text in truncate_description(&item.description, DESCRIPTION_LINES) {
        lines.push(Line::from(Span::styled(text, Style::default().fg(theme.fg0))));
    }
    lines.push(Line::from(Span::styled(
        image_label(item.image_url.as_deref()),
        Style::default().fg(theme.blue).add_modifier(Modifier::ITALIC),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn byline(item: &NewsItem) -> String {
    match item.created_at {
        Some(at) => format!("{} · {}", item.author(), at.format("%Y-%m-%d")),
        None => item.author().to_string(),
    }
}

fn footer_line(app: &App, theme: &Theme) -> Line<'static> {
    let feed = &app.feed;
    if !feed.is_loaded() {
        return Line::default();
    }
    let page = format!("page {}/{}", feed.page(), feed.total_pages().max(1));
    if feed.is_loading() {
        Line::from(Span::styled("Loading...", Style::default().fg(theme.info)))
    } else if feed.has_more() {
        Line::from(vec![
            Span::styled("m", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" load more ({})", page), Style::default().fg(theme.grey1)),
        ])
    } else {
        Line::from(Span::styled(
            format!("All news loaded ({})", page),
            Style::default().fg(theme.grey0),
        ))
    }
}

/// Cards per row for a body `width` columns wide
pub fn grid_columns(width: u16) -> usize {
    ((width / CARD_WIDTH) as usize).clamp(1, MAX_COLUMNS)
}

/// First card row to draw so that `selected_row` stays on screen
pub fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    (selected_row + 1).saturating_sub(visible_rows.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(20), 1);
        assert_eq!(grid_columns(70), 2);
        assert_eq!(grid_columns(102), 3);
        assert_eq!(grid_columns(300), 3);
    }

    #[test]
    fn test_first_visible_row_follows_selection() {
        assert_eq!(first_visible_row(0, 3), 0);
        assert_eq!(first_visible_row(2, 3), 0);
        assert_eq!(first_visible_row(3, 3), 1);
        assert_eq!(first_visible_row(5, 1), 5);
    }

    #[test]
    fn test_byline_without_date() {
        let item = NewsItem {
            id: 1,
            title: "t".to_string(),
            description: "d".to_string(),
            image_url: None,
            creator_id: None,
            created_at: None,
            updated_at: None,
            creator: None,
        };
        assert_eq!(byline(&item), "unknown");
    }
}
