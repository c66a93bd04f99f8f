use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use feedsite_core::{api::NewsQuery, AppConfig};
use feedsite_tui::{
    app::{App, Command, Mode, Route},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    load_theme,
    widgets::{
        centered_rect, FormWidget, HomeWidget, ManageWidget, NavbarWidget, PopupWidget, StatusBarWidget,
    },
};

use super::Backend;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

const FORM_WIDTH: u16 = 64;

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);

    // Resume the session before taking over the screen
    let mut backend = Backend::new(&config)?;
    let restored = backend.session.restore().await?.cloned();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Feed"))?;

    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), theme);
    app.on_session_restored(restored);

    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    let result = event_loop(&mut terminal, &mut app, &mut backend, &keymap, &event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    backend: &mut Backend,
    keymap: &Keymap,
    events: &EventHandler,
) -> Result<()> {
    let mut pending = vec![Command::LoadNews];

    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| draw(frame, app, now))?;

        // Run queued work after drawing so the screen reflects the request
        if !pending.is_empty() {
            for command in std::mem::take(&mut pending) {
                let follow_up = execute_command(command, app, backend).await;
                pending.extend(follow_up);
            }
            continue;
        }

        let event = if app.is_animating() {
            events.next_animation()?
        } else {
            events.next()?
        };

        if let Some(event) = event {
            let now = Instant::now();
            let commands = match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.handle_action(action, now)
                }
                AppEvent::Pointer(pointer) => app.pointer(pointer, now),
                AppEvent::Resize(_, _) | AppEvent::Tick => Vec::new(),
            };
            pending.extend(commands);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(frame: &mut Frame, app: &mut App, now: Instant) {
    let size = frame.area();
    app.viewport = size;

    // Navbar, content, status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    NavbarWidget::render(frame, main_layout[0], app);

    let body = main_layout[1];
    match app.route {
        Route::Home => HomeWidget::render(frame, body, app, now),
        Route::Login => {
            let area = centered_rect(FORM_WIDTH, FormWidget::height(&app.login_form), body);
            let hint = "Enter:login  Tab:next field  Ctrl+R:register  Esc:back";
            FormWidget::render(frame, area, &app.login_form, hint, true, &app.theme);
        }
        Route::Register => {
            let area = centered_rect(FORM_WIDTH, FormWidget::height(&app.register_form), body);
            let hint = "Enter:register  Tab:next field  Ctrl+R:login  Esc:back";
            FormWidget::render(frame, area, &app.register_form, hint, true, &app.theme);
        }
        Route::Manage => ManageWidget::render(frame, body, app),
    }

    StatusBarWidget::render(frame, main_layout[2], app);

    // Popups on top
    match app.mode {
        Mode::DeleteConfirm(id) => {
            let title = app
                .manage_items
                .iter()
                .find(|item| item.id == id)
                .map(|item| item.title.as_str())
                .unwrap_or("this item");
            PopupWidget::render_delete_confirm(frame, title, &app.theme);
        }
        Mode::Help => PopupWidget::render_help(frame, &app.theme),
        Mode::Normal => {}
    }
}

/// Carry out one network command and feed the result back into the app
async fn execute_command(command: Command, app: &mut App, backend: &mut Backend) -> Vec<Command> {
    match command {
        Command::LoadNews => match app.feed.load_first(&backend.news).await {
            Ok(_) => {
                app.selected_news = 0;
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load news");
                app.on_request_failed(&e)
            }
        },
        Command::LoadMoreNews => match app.feed.load_more(&backend.news).await {
            Ok(_) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, page = ?app.feed.next_page(), "Failed to load more news");
                app.on_request_failed(&e)
            }
        },
        Command::LoadManage => {
            let query = NewsQuery::new(1, app.config.news.manage_page_size);
            match backend.news.list(query).await {
                Ok(page) => {
                    app.on_manage_loaded(page.items);
                    Vec::new()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load news for management");
                    app.on_request_failed(&e)
                }
            }
        }
        Command::Login { username, password } => {
            match backend.session.login(&username, &password).await {
                Ok(user) => app.on_logged_in(user.clone()),
                Err(e) => {
                    app.on_login_failed(&e);
                    Vec::new()
                }
            }
        }
        Command::Register(request) => match backend.session.register(&request).await {
            Ok(user) => app.on_registered(user, Instant::now()),
            Err(e) => {
                app.on_register_failed(&e);
                Vec::new()
            }
        },
        Command::Logout => match backend.session.logout().await {
            Ok(()) => app.on_logged_out(),
            Err(e) => app.on_request_failed(&e),
        },
        Command::ClearSession => {
            if let Err(e) = backend.session.expire() {
                tracing::warn!(error = %e, "Failed to clear stored session");
            }
            Vec::new()
        }
        Command::CreateNews(draft) => match backend.news.create(&draft).await {
            Ok(_) => app.on_news_saved(),
            Err(e) => app.on_request_failed(&e),
        },
        Command::UpdateNews { id, patch } => match backend.news.update(id, &patch).await {
            Ok(_) => app.on_news_saved(),
            Err(e) => app.on_request_failed(&e),
        },
        Command::DeleteNews(id) => match backend.news.delete(id).await {
            Ok(()) => app.on_news_deleted(),
            Err(e) => app.on_request_failed(&e),
        },
        Command::OpenUrl(url) => {
            if let Err(e) = open::that(&url) {
                tracing::warn!(error = %e, %url, "Failed to open image");
                app.set_error(format!("Could not open image: {}", e));
            }
            Vec::new()
        }
    }
}
