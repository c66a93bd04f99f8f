use std::sync::Arc;
use std::time::{Duration, Instant};

use feedsite_core::api::{NewsDraft, NewsItem, NewsPatch, RegisterRequest, User};
use feedsite_core::news::NewsFeed;
use feedsite_core::stage::{
    introduction_captions, NavClick, Navbar, PageKey, Section, Stage, StageInput, StageObserver,
};
use feedsite_core::{AppConfig, Error};
use ratatui::layout::Rect;

use crate::event::Pointer;
use crate::form::Form;
use crate::input::Action;
use crate::motion::Slide;
use crate::theme::Theme;
use crate::widgets::{nav_target_at, NavTarget};

/// How long the post-registration notice stays up
const REGISTERED_NOTICE: Duration = Duration::from_secs(5);

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Full-page stage: introduction and news
    Home,
    Login,
    Register,
    /// News management console, requires a session
    Manage,
}

impl Route {
    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Manage => "Manage",
        }
    }
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
    /// Waiting for y/n before deleting the news item with this id
    DeleteConfirm(i64),
}

/// Which pane of the management console has the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageFocus {
    List,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Status-line message, optionally self-expiring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    expires_at: Option<Instant>,
}

/// Network work requested by the UI; the run loop carries it out and
/// reports back through the `on_*` methods
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadNews,
    LoadMoreNews,
    LoadManage,
    Login { username: String, password: String },
    Register(RegisterRequest),
    Logout,
    /// Forget a session the server rejected
    ClearSession,
    CreateNews(NewsDraft),
    UpdateNews { id: i64, patch: NewsPatch },
    DeleteNews(i64),
    OpenUrl(String),
}

/// Feeds stage notifications to the navbar and notes page changes
struct StageSink<'a> {
    navbar: &'a mut Navbar,
    entered: Option<Section>,
}

impl StageObserver for StageSink<'_> {
    fn on_page_changed(&mut self, section: Section, page_index: usize) {
        self.navbar.on_page_changed(section, page_index);
        self.entered = Some(section);
    }

    fn on_text_progress(&mut self, progress: f64) {
        self.navbar.on_text_progress(progress);
    }

    fn on_text_complete(&mut self) {
        tracing::debug!("Introduction captions finished");
    }
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub route: Route,
    pub mode: Mode,
    /// Mounted only while the home route is showing
    pub stage: Option<Stage>,
    pub navbar: Navbar,
    /// Slide animation of the current page transition
    pub slide: Option<Slide>,
    pub feed: NewsFeed,
    pub selected_news: usize,
    pub user: Option<User>,
    pub login_form: Form,
    pub register_form: Form,
    pub editor: Form,
    /// Id of the item loaded into the editor, None when creating
    pub editing: Option<i64>,
    pub manage_items: Vec<NewsItem>,
    pub selected_manage: usize,
    pub manage_focus: ManageFocus,
    pub manage_loading: bool,
    pub notice: Option<Notice>,
    /// Terminal area of the last frame, for pointer hit testing
    pub viewport: Rect,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        let navbar = Navbar::new(&config.stage);
        let feed = NewsFeed::new(config.news.page_size);
        let mut app = Self {
            config,
            theme,
            route: Route::Home,
            mode: Mode::Normal,
            stage: None,
            navbar,
            slide: None,
            feed,
            selected_news: 0,
            user: None,
            login_form: Form::login(),
            register_form: Form::register(),
            editor: Form::news_editor(),
            editing: None,
            manage_items: Vec::new(),
            selected_manage: 0,
            manage_focus: ManageFocus::List,
            manage_loading: false,
            notice: None,
            viewport: Rect::default(),
            should_quit: false,
        };
        app.mount_stage();
        app
    }

    /// True while a form owns the keyboard
    pub fn is_input_mode(&self) -> bool {
        match self.route {
            Route::Login | Route::Register => true,
            Route::Manage => self.manage_focus == ManageFocus::Editor,
            Route::Home => false,
        }
    }

    /// True while something on screen moves or a timer is pending
    pub fn is_animating(&self) -> bool {
        self.slide.is_some()
            || self.navbar.has_deferred()
            || self
                .stage
                .as_ref()
                .map(|stage| stage.is_locked() || stage.text().is_settling())
                .unwrap_or(false)
    }

    pub fn current_section(&self) -> Option<Section> {
        self.stage.as_ref().map(Stage::current_section)
    }

    pub fn selected_news_item(&self) -> Option<&NewsItem> {
        self.feed.items().get(self.selected_news)
    }

    pub fn selected_manage_item(&self) -> Option<&NewsItem> {
        self.manage_items.get(self.selected_manage)
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            kind: NoticeKind::Info,
            expires_at: None,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            kind: NoticeKind::Error,
            expires_at: None,
        });
    }

    pub fn clear_status(&mut self) {
        self.notice = None;
    }

    fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.config.ui.slide_ms)
    }

    fn mount_stage(&mut self) {
        self.stage = Some(Stage::new(introduction_captions(), &self.config.stage));
        self.navbar.on_stage_mounted();
        self.slide = None;
        tracing::debug!("Stage mounted");
    }

    /// Run `f` against the mounted stage with the navbar listening
    fn drive_stage<R>(
        &mut self,
        now: Instant,
        f: impl FnOnce(&mut Stage, &mut dyn StageObserver) -> R,
    ) -> Option<R> {
        let stage = self.stage.as_mut()?;
        let mut sink = StageSink {
            navbar: &mut self.navbar,
            entered: None,
        };
        let result = f(stage, &mut sink);
        let entered = sink.entered.is_some();

        if entered {
            self.slide = Some(Slide::start(now, self.slide_duration(), self.config.ui.easing));
        }
        Some(result)
    }

    /// Switch routes
    ///
    /// Leaving home unmounts the stage; returning mounts a fresh one at the
    /// introduction. The management console redirects to login without a
    /// session.
    pub fn navigate(&mut self, route: Route) -> Vec<Command> {
        let route = if route == Route::Manage && self.user.is_none() {
            self.set_status("Please log in to manage news");
            Route::Login
        } else {
            route
        };
        if route == self.route {
            return Vec::new();
        }

        tracing::debug!(from = self.route.title(), to = route.title(), "Route change");
        if self.route == Route::Home {
            self.stage = None;
            self.slide = None;
        }
        self.route = route;
        self.mode = Mode::Normal;

        match route {
            Route::Home => {
                self.mount_stage();
                self.selected_news = 0;
                vec![Command::LoadNews]
            }
            Route::Login => {
                self.login_form = Form::login();
                Vec::new()
            }
            Route::Register => {
                self.register_form = Form::register();
                Vec::new()
            }
            Route::Manage => {
                self.manage_focus = ManageFocus::List;
                self.editor = Form::news_editor();
                self.editing = None;
                self.manage_loading = true;
                vec![Command::LoadManage]
            }
        }
    }

    /// A navbar section entry was chosen
    pub fn nav_click(&mut self, section: Section, now: Instant) -> Vec<Command> {
        match self.navbar.click(section, self.route == Route::Home, now) {
            NavClick::Deliver(request) => {
                self.drive_stage(now, |stage, observer| stage.deliver(request, now, observer));
                Vec::new()
            }
            NavClick::NavigateHome => self.navigate(Route::Home),
        }
    }

    /// Advance timers: stage deadlines, slide end, deferred navbar requests
    /// and expiring notices
    pub fn tick(&mut self, now: Instant) {
        self.drive_stage(now, |stage, observer| stage.tick(now, observer));

        if let Some(slide) = self.slide {
            if slide.is_finished(now) {
                self.slide = None;
                if let Some(stage) = self.stage.as_mut() {
                    stage.acknowledge_transition_end();
                }
            }
        }

        if let Some(request) = self.navbar.take_due(now) {
            if self.route == Route::Home && self.stage.is_some() {
                self.drive_stage(now, |stage, observer| stage.deliver(request, now, observer));
            } else {
                tracing::debug!(page = request.page_index, "Dropping navbar request, stage not mounted");
            }
        }

        if let Some(notice) = &self.notice {
            if notice.expires_at.map(|at| now >= at).unwrap_or(false) {
                self.notice = None;
            }
        }
    }

    /// Mouse input; wheel and drags drive the stage on the home route
    pub fn pointer(&mut self, pointer: Pointer, now: Instant) -> Vec<Command> {
        let wheel_step = self.config.stage.wheel_step_px;
        let row_px = self.config.stage.drag_row_px;
        match pointer {
            Pointer::Press { column, row } if row == self.viewport.y => {
                let logged_in = self.user.is_some();
                match nav_target_at(self.viewport, logged_in, column) {
                    Some(NavTarget::Section(section)) => self.nav_click(section, now),
                    Some(NavTarget::Login) => self.navigate(Route::Login),
                    Some(NavTarget::Manage) => self.navigate(Route::Manage),
                    Some(NavTarget::Logout) => vec![Command::Logout],
                    None => Vec::new(),
                }
            }
            Pointer::Wheel { notches } => {
                match self.route {
                    Route::Home => {
                        let delta_y = notches as f64 * wheel_step;
                        self.drive_stage(now, |stage, observer| {
                            stage.handle_input(StageInput::Wheel { delta_y }, now, observer)
                        });
                    }
                    Route::Manage if notches > 0 => self.move_manage(1),
                    Route::Manage => self.move_manage(-1),
                    _ => {}
                }
                Vec::new()
            }
            Pointer::Press { row, .. } => {
                let y = row as f64 * row_px;
                self.drive_stage(now, |stage, observer| {
                    stage.handle_input(StageInput::TouchStart { y }, now, observer)
                });
                Vec::new()
            }
            Pointer::Drag { row } => {
                let y = row as f64 * row_px;
                self.drive_stage(now, |stage, observer| {
                    stage.handle_input(StageInput::TouchMove { y }, now, observer)
                });
                Vec::new()
            }
            Pointer::Release { row } => {
                let y = row as f64 * row_px;
                self.drive_stage(now, |stage, observer| {
                    stage.handle_input(StageInput::TouchEnd { y }, now, observer)
                });
                Vec::new()
            }
        }
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) -> Vec<Command> {
        // Sticky notices go away on the next keystroke
        let sticky = self.notice.as_ref().map(|n| n.expires_at.is_none()).unwrap_or(false);
        if sticky && action != Action::None {
            self.clear_status();
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            Action::Help => {
                self.mode = Mode::Help;
                Vec::new()
            }
            Action::ExitMode => self.exit_mode(),
            Action::PageNext => self.page_key(PageKey::Next, now),
            Action::PagePrevious => self.page_key(PageKey::Previous, now),
            Action::PageFirst => self.page_key(PageKey::First, now),
            Action::PageLast => self.page_key(PageKey::Last, now),
            Action::NavIntroduction => self.nav_click(Section::Introduction, now),
            Action::NavNews => self.nav_click(Section::News, now),
            Action::MoveDown => {
                self.move_selection(1);
                Vec::new()
            }
            Action::MoveUp => {
                self.move_selection(-1);
                Vec::new()
            }
            Action::LoadMore => self.load_more(),
            Action::OpenImage => self.open_image(),
            Action::Select => self.select(now),
            Action::Login => match &self.user {
                Some(user) => {
                    let text = format!("Already logged in as {}", user.username);
                    self.set_status(text);
                    Vec::new()
                }
                None => self.navigate(Route::Login),
            },
            Action::Logout => {
                if self.user.is_some() {
                    vec![Command::Logout]
                } else {
                    Vec::new()
                }
            }
            Action::Manage => self.navigate(Route::Manage),
            Action::NewItem => {
                self.editing = None;
                self.editor = Form::news_editor();
                self.manage_focus = ManageFocus::Editor;
                Vec::new()
            }
            Action::EditItem => {
                self.start_edit();
                Vec::new()
            }
            Action::DeleteItem => {
                if let Some(item) = self.selected_manage_item() {
                    self.mode = Mode::DeleteConfirm(item.id);
                }
                Vec::new()
            }
            Action::FocusEditor => {
                self.manage_focus = ManageFocus::Editor;
                Vec::new()
            }
            Action::Confirm => match self.mode {
                Mode::DeleteConfirm(id) => {
                    self.mode = Mode::Normal;
                    vec![Command::DeleteNews(id)]
                }
                _ => Vec::new(),
            },
            Action::Cancel => self.cancel(),
            Action::Submit => self.submit(),
            Action::SwitchForm => match self.route {
                Route::Login => self.navigate(Route::Register),
                Route::Register => self.navigate(Route::Login),
                _ => Vec::new(),
            },
            Action::NextField => {
                if let Some(form) = self.active_form_mut() {
                    form.next_field();
                }
                Vec::new()
            }
            Action::PrevField => {
                if let Some(form) = self.active_form_mut() {
                    form.prev_field();
                }
                Vec::new()
            }
            Action::InputChar(c) => {
                if let Some(form) = self.active_form_mut() {
                    form.input_char(c);
                }
                Vec::new()
            }
            Action::Backspace => {
                if let Some(form) = self.active_form_mut() {
                    form.backspace();
                }
                Vec::new()
            }
            Action::None => Vec::new(),
        }
    }

    fn active_form_mut(&mut self) -> Option<&mut Form> {
        match self.route {
            Route::Login => Some(&mut self.login_form),
            Route::Register => Some(&mut self.register_form),
            Route::Manage if self.manage_focus == ManageFocus::Editor => Some(&mut self.editor),
            _ => None,
        }
    }

    fn exit_mode(&mut self) -> Vec<Command> {
        if self.mode != Mode::Normal {
            self.mode = Mode::Normal;
            return Vec::new();
        }
        match self.route {
            Route::Home => Vec::new(),
            _ => self.navigate(Route::Home),
        }
    }

    fn page_key(&mut self, key: PageKey, now: Instant) -> Vec<Command> {
        self.drive_stage(now, |stage, observer| {
            stage.handle_input(StageInput::Key(key), now, observer)
        });
        Vec::new()
    }

    fn move_selection(&mut self, delta: isize) {
        match self.route {
            Route::Home if self.current_section() == Some(Section::News) => {
                self.selected_news = step(self.selected_news, delta, self.feed.items().len());
            }
            Route::Manage => self.move_manage(delta),
            _ => {}
        }
    }

    fn move_manage(&mut self, delta: isize) {
        self.selected_manage = step(self.selected_manage, delta, self.manage_items.len());
    }

    fn load_more(&mut self) -> Vec<Command> {
        if self.route != Route::Home || self.feed.is_loading() {
            return Vec::new();
        }
        if self.feed.has_more() {
            vec![Command::LoadMoreNews]
        } else {
            self.set_status("No more news");
            Vec::new()
        }
    }

    fn open_image(&mut self) -> Vec<Command> {
        let item = match self.route {
            Route::Home => self.selected_news_item(),
            Route::Manage => self.selected_manage_item(),
            _ => None,
        };
        match item.and_then(|item| item.image_url.clone()) {
            Some(url) => vec![Command::OpenUrl(url)],
            None => {
                self.set_status("This item has no image");
                Vec::new()
            }
        }
    }

    fn select(&mut self, now: Instant) -> Vec<Command> {
        match (self.route, self.current_section()) {
            // The caption page's "scroll down" affordance
            (Route::Home, Some(Section::Introduction)) => {
                self.drive_stage(now, |stage, observer| {
                    stage.request_page(Section::News.index(), None, now, observer)
                });
                Vec::new()
            }
            (Route::Home, Some(Section::News)) => self.open_image(),
            (Route::Manage, _) => {
                self.start_edit();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn start_edit(&mut self) {
        if let Some(item) = self.selected_manage_item() {
            let id = item.id;
            self.editor = Form::news_editor_for(item);
            self.editing = Some(id);
            self.manage_focus = ManageFocus::Editor;
        }
    }

    fn cancel(&mut self) -> Vec<Command> {
        match self.mode {
            Mode::DeleteConfirm(_) => {
                self.mode = Mode::Normal;
                return Vec::new();
            }
            Mode::Help => {
                self.mode = Mode::Normal;
                return Vec::new();
            }
            Mode::Normal => {}
        }
        match self.route {
            Route::Manage => {
                self.editor = Form::news_editor();
                self.editing = None;
                self.manage_focus = ManageFocus::List;
                Vec::new()
            }
            Route::Login | Route::Register => self.navigate(Route::Home),
            Route::Home => Vec::new(),
        }
    }

    fn submit(&mut self) -> Vec<Command> {
        match self.route {
            Route::Login => {
                if self.login_form.submitting {
                    return Vec::new();
                }
                match self.login_form.credentials() {
                    Ok((username, password)) => {
                        self.login_form.submitting = true;
                        vec![Command::Login { username, password }]
                    }
                    Err(message) => {
                        self.login_form.error = Some(message);
                        Vec::new()
                    }
                }
            }
            Route::Register => {
                if self.register_form.submitting {
                    return Vec::new();
                }
                match self.register_form.registration() {
                    Ok(request) => {
                        self.register_form.submitting = true;
                        vec![Command::Register(request)]
                    }
                    Err(message) => {
                        self.register_form.error = Some(message);
                        Vec::new()
                    }
                }
            }
            Route::Manage => {
                if self.editor.submitting {
                    return Vec::new();
                }
                match self.editor.draft() {
                    Ok(draft) => {
                        self.editor.submitting = true;
                        match self.editing {
                            Some(id) => vec![Command::UpdateNews {
                                id,
                                patch: NewsPatch::from(draft),
                            }],
                            None => vec![Command::CreateNews(draft)],
                        }
                    }
                    Err(message) => {
                        self.editor.error = Some(message);
                        Vec::new()
                    }
                }
            }
            Route::Home => Vec::new(),
        }
    }

    // Results reported back by the run loop

    pub fn on_session_restored(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn on_logged_in(&mut self, user: User) -> Vec<Command> {
        tracing::info!(username = %user.username, "Logged in");
        self.set_status(format!("Welcome, {}", user.username));
        self.user = Some(user);
        self.login_form = Form::login();
        self.navigate(Route::Manage)
    }

    pub fn on_login_failed(&mut self, error: &Error) {
        self.login_form.submitting = false;
        self.login_form.clear_secrets();
        self.login_form.error = Some(error.user_message());
    }

    pub fn on_registered(&mut self, user: User, now: Instant) -> Vec<Command> {
        tracing::info!(username = %user.username, "Registered");
        let commands = self.navigate(Route::Login);
        self.login_form.fields[0].value = user.username;
        self.notice = Some(Notice {
            text: "Registration successful, please log in".to_string(),
            kind: NoticeKind::Success,
            expires_at: Some(now + REGISTERED_NOTICE),
        });
        commands
    }

    pub fn on_register_failed(&mut self, error: &Error) {
        self.register_form.submitting = false;
        self.register_form.clear_secrets();
        self.register_form.error = Some(error.user_message());
    }

    pub fn on_logged_out(&mut self) -> Vec<Command> {
        self.user = None;
        self.set_status("Logged out");
        if self.route == Route::Manage {
            self.navigate(Route::Home)
        } else {
            Vec::new()
        }
    }

    pub fn on_manage_loaded(&mut self, items: Vec<NewsItem>) {
        self.manage_loading = false;
        self.manage_items = items;
        self.selected_manage = self.selected_manage.min(self.manage_items.len().saturating_sub(1));
    }

    pub fn on_news_saved(&mut self) -> Vec<Command> {
        let message = if self.editing.is_some() { "News updated" } else { "News created" };
        self.set_status(message);
        self.editor = Form::news_editor();
        self.editing = None;
        self.manage_focus = ManageFocus::List;
        self.manage_loading = true;
        vec![Command::LoadManage]
    }

    pub fn on_news_deleted(&mut self) -> Vec<Command> {
        self.set_status("News deleted");
        self.manage_loading = true;
        vec![Command::LoadManage]
    }

    /// Any request failed; keeps whatever is already on screen
    pub fn on_request_failed(&mut self, error: &Error) -> Vec<Command> {
        self.manage_loading = false;
        self.editor.submitting = false;
        if error.is_unauthorized() && self.user.is_some() {
            tracing::warn!("Session rejected by server");
            self.user = None;
            self.set_error("Session expired, please log in again");
            let mut commands = vec![Command::ClearSession];
            if self.route == Route::Manage {
                commands.extend(self.navigate(Route::Login));
            }
            return commands;
        }
        if self.route == Route::Manage && self.manage_focus == ManageFocus::Editor {
            self.editor.error = Some(error.user_message());
        } else {
            self.set_error(error.user_message());
        }
        Vec::new()
    }
}

/// Move `index` by `delta` inside `0..len`
fn step(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len as isize - 1;
    (index as isize + delta).clamp(0, max) as usize
}
