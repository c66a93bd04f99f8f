use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, ManageFocus};
use crate::widgets::FormWidget;

/// News management console: item list on the left, editor on the right
pub struct ManageWidget;

impl ManageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        Self::render_list(frame, chunks[0], app);

        let hint = "Enter:save  Tab:next field  Esc:cancel";
        FormWidget::render(
            frame,
            chunks[1],
            &app.editor,
            hint,
            app.manage_focus == ManageFocus::Editor,
            &app.theme,
        );
    }

    fn render_list(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.manage_focus == ManageFocus::List;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let title = if app.manage_loading {
            " News (loading...) ".to_string()
        } else {
            format!(" News ({}) ", app.manage_items.len())
        };

        let block = Block::default()
            .title(title)
            .title_bottom(Line::from(" n:new  e:edit  d:delete  o:image ").style(Style::default().fg(theme.grey0)))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));

        if app.manage_items.is_empty() {
            let empty = if app.manage_loading { "" } else { "Nothing published yet, press n to write" };
            let list = List::new(vec![ListItem::new(Span::styled(empty, Style::default().fg(theme.grey1)))])
                .block(block);
            frame.render_widget(list, area);
            return;
        }

        let items: Vec<ListItem> = app
            .manage_items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let editing = app.editing == Some(item.id);
                let marker = if editing { "✎" } else { " " };

                let style = if i == app.selected_manage && is_focused {
                    Style::default().fg(theme.fg1).bg(theme.selection).add_modifier(Modifier::BOLD)
                } else if editing {
                    Style::default().fg(theme.warning)
                } else {
                    Style::default().fg(theme.fg0)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.warning)),
                    Span::raw(" "),
                    Span::styled(format!("#{:<4}", item.id), Style::default().fg(theme.grey1)),
                    Span::styled(item.title.clone(), style),
                    Span::styled(format!("  {}", item.author()), Style::default().fg(theme.grey0)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.selection));

        let mut state = ListState::default();
        state.select(Some(app.selected_manage));

        frame.render_stateful_widget(list, area, &mut state);
    }
}
