use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode, NoticeKind, Route};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match &app.mode {
            Mode::Normal => app.route.title().to_uppercase(),
            Mode::DeleteConfirm(_) => "DELETE?".to_string(),
            Mode::Help => "HELP".to_string(),
        };

        let (status_text, fg) = match &app.notice {
            Some(notice) => {
                let color = match notice.kind {
                    NoticeKind::Info => theme.info,
                    NoticeKind::Success => theme.success,
                    NoticeKind::Error => theme.error,
                };
                (format!(" {}", notice.text), color)
            }
            None => {
                let user = app
                    .user
                    .as_ref()
                    .map(|u| u.username.as_str())
                    .unwrap_or("anonymous");
                let location = match (app.route, app.current_section()) {
                    (Route::Home, Some(section)) => format!(" | {}", section.title()),
                    _ => String::new(),
                };
                (format!(" {}{} | {}", mode_str, location, user), theme.fg0)
            }
        };

        let help_hint = match app.route {
            Route::Home => " q:quit 1/2:pages j/k:move M:manage ?:help ",
            Route::Login | Route::Register => " Enter:submit Ctrl+R:switch Esc:back ",
            Route::Manage => " n:new e:edit d:delete Esc:home ",
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(fg).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
