use std::time::Instant;

use crate::config::StageConfig;

use super::full_page::{FullPageScroll, PageChange, PageKey, Rejection};
use super::navbar::NavRequest;
use super::observer::StageObserver;
use super::scroll_text::{Caption, ScrollText, ScrollTextObserver};
use super::section::{AnimationHint, Section, TransitionDirection};

/// Pointer input in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageInput {
    Wheel { delta_y: f64 },
    Key(PageKey),
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    TouchEnd { y: f64 },
}

/// Owner of the caption crawl and the pager on the home route
///
/// All cross-component traffic goes through here: crawl completion opens
/// the pager's gate, and entering the introduction rewinds the crawl.
/// Notifications reach the caller through the observer passed to each
/// call.
pub struct Stage {
    text: ScrollText,
    pager: FullPageScroll,
    key_step: f64,
}

/// Routes crawl notifications to the pager and the outer observer
struct TextBridge<'a> {
    pager: &'a mut FullPageScroll,
    outer: &'a mut dyn StageObserver,
}

impl ScrollTextObserver for TextBridge<'_> {
    fn on_scroll_progress(&mut self, progress: f64) {
        self.outer.on_text_progress(progress);
    }

    fn on_complete(&mut self) {
        self.pager.report_text_complete();
        self.outer.on_text_complete();
    }
}

impl Stage {
    pub fn new(captions: Vec<Caption>, config: &StageConfig) -> Self {
        Self {
            text: ScrollText::new(captions, config),
            pager: FullPageScroll::new(config),
            key_step: config.key_step_px,
        }
    }

    pub fn text(&self) -> &ScrollText {
        &self.text
    }

    pub fn pager(&self) -> &FullPageScroll {
        &self.pager
    }

    pub fn current_section(&self) -> Section {
        self.pager.current_section()
    }

    pub fn direction(&self) -> TransitionDirection {
        self.pager.direction()
    }

    pub fn is_locked(&self) -> bool {
        self.pager.is_locked()
    }

    pub fn transition_progress(&self, now: Instant) -> Option<f64> {
        self.pager.transition_progress(now)
    }

    pub fn handle_input(&mut self, input: StageInput, now: Instant, observer: &mut dyn StageObserver) {
        if self.pager.input_owned_by_text() {
            self.feed_text(input, now, observer);
            return;
        }

        let change = match input {
            StageInput::Wheel { delta_y } => self.pager.handle_wheel(delta_y, now),
            StageInput::Key(key) => self.pager.handle_key(key, now),
            StageInput::TouchStart { y } => {
                self.pager.touch_start(y);
                None
            }
            StageInput::TouchMove { .. } => None,
            StageInput::TouchEnd { y } => self.pager.touch_end(y, now),
        };
        if let Some(change) = change {
            self.announce(change, observer);
        }
    }

    fn feed_text(&mut self, input: StageInput, now: Instant, observer: &mut dyn StageObserver) {
        let mut bridge = TextBridge {
            pager: &mut self.pager,
            outer: observer,
        };
        match input {
            StageInput::Wheel { delta_y } => self.text.apply_wheel(delta_y, now, &mut bridge),
            StageInput::Key(PageKey::Next) => self.text.apply_wheel(self.key_step, now, &mut bridge),
            StageInput::Key(PageKey::Previous) => self.text.apply_wheel(-self.key_step, now, &mut bridge),
            StageInput::Key(PageKey::First | PageKey::Last) => {}
            StageInput::TouchStart { y } => self.text.touch_start(y),
            StageInput::TouchMove { y } => self.text.touch_move(y, now, &mut bridge),
            StageInput::TouchEnd { .. } => self.text.touch_end(),
        }
    }

    /// Request a page, as the navbar or the caption affordance does
    pub fn request_page(
        &mut self,
        page_index: usize,
        hint: Option<AnimationHint>,
        now: Instant,
        observer: &mut dyn StageObserver,
    ) -> Result<PageChange, Rejection> {
        let result = self.pager.goto(page_index, hint, now);
        match result {
            Ok(change) => self.announce(change, observer),
            Err(rejection) => tracing::debug!(page_index, ?rejection, "Page request rejected"),
        }
        result
    }

    pub fn deliver(
        &mut self,
        request: NavRequest,
        now: Instant,
        observer: &mut dyn StageObserver,
    ) -> Result<PageChange, Rejection> {
        self.request_page(request.page_index, Some(request.hint), now, observer)
    }

    /// Record crawl completion reported from outside the stage
    pub fn report_text_complete(&mut self) {
        self.pager.report_text_complete();
    }

    /// React to a page becoming active
    pub fn report_page_entered(&mut self, page_index: usize, observer: &mut dyn StageObserver) {
        if page_index != Section::Introduction.index() {
            return;
        }
        let mut bridge = TextBridge {
            pager: &mut self.pager,
            outer: observer,
        };
        self.text.reset(&mut bridge);
    }

    pub fn acknowledge_transition_end(&mut self) -> bool {
        self.pager.acknowledge_transition_end()
    }

    /// Run due timers: transition deadline and crawl settle
    pub fn tick(&mut self, now: Instant, observer: &mut dyn StageObserver) {
        self.pager.tick(now);
        let mut bridge = TextBridge {
            pager: &mut self.pager,
            outer: observer,
        };
        self.text.poll(now, &mut bridge);
    }

    fn announce(&mut self, change: PageChange, observer: &mut dyn StageObserver) {
        observer.on_page_changed(change.section, change.to);
        self.report_page_entered(change.to, observer);
    }
}
