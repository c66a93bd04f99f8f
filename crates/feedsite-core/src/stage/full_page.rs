//! Two-page pager with a transition lock and a text gate
//!
//! Accepted transitions lock the pager for the configured duration. Forward
//! navigation away from the first page stays closed until the caption crawl
//! reports completion; returning to the first page closes the gate again.

use std::time::{Duration, Instant};

use crate::config::StageConfig;

use super::section::{AnimationHint, Section, TransitionDirection, PAGE_COUNT};

/// Paging keys after keymap resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    Next,
    Previous,
    First,
    Last,
}

/// Why a page request was not carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OutOfRange { target: usize },
    Locked,
    /// Forward navigation before the caption crawl completed
    TextGateClosed,
    /// The target page is already showing
    AlreadyActive,
}

/// An accepted transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub from: usize,
    pub to: usize,
    pub section: Section,
    pub direction: TransitionDirection,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    started: Instant,
    deadline: Instant,
}

pub struct FullPageScroll {
    current: usize,
    transition: Option<Transition>,
    direction: TransitionDirection,
    text_completed: bool,
    touch_start_y: Option<f64>,
    duration: Duration,
    swipe_threshold: f64,
}

impl FullPageScroll {
    pub fn new(config: &StageConfig) -> Self {
        Self {
            current: 0,
            transition: None,
            direction: TransitionDirection::None,
            text_completed: false,
            touch_start_y: None,
            duration: config.transition_duration(),
            swipe_threshold: config.swipe_threshold_px,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn current_section(&self) -> Section {
        Section::from_index(self.current).unwrap_or(Section::Introduction)
    }

    pub fn page_count(&self) -> usize {
        PAGE_COUNT
    }

    pub fn is_locked(&self) -> bool {
        self.transition.is_some()
    }

    pub fn direction(&self) -> TransitionDirection {
        self.direction
    }

    pub fn text_completed(&self) -> bool {
        self.text_completed
    }

    /// True while input belongs to the caption crawl instead of paging
    pub fn input_owned_by_text(&self) -> bool {
        self.current == 0 && !self.text_completed
    }

    /// Open the text gate
    pub fn report_text_complete(&mut self) {
        if !self.text_completed {
            tracing::debug!("Text gate opened");
        }
        self.text_completed = true;
    }

    /// Fraction of the running transition elapsed at `now`
    pub fn transition_progress(&self, now: Instant) -> Option<f64> {
        let transition = self.transition?;
        if self.duration.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.saturating_duration_since(transition.started);
        Some((elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0))
    }

    /// Request a move to `target`
    ///
    /// On success the pager is already locked and showing `target` when the
    /// change is returned.
    pub fn goto(
        &mut self,
        target: usize,
        hint: Option<AnimationHint>,
        now: Instant,
    ) -> Result<PageChange, Rejection> {
        self.tick(now);

        if target >= PAGE_COUNT {
            return Err(Rejection::OutOfRange { target });
        }
        if self.transition.is_some() {
            return Err(Rejection::Locked);
        }
        if self.current == 0 && target > 0 && !self.text_completed {
            return Err(Rejection::TextGateClosed);
        }
        if target == self.current {
            return Err(Rejection::AlreadyActive);
        }

        let from = self.current;
        let direction = TransitionDirection::resolve(from, target, hint);

        self.direction = direction;
        self.transition = Some(Transition {
            started: now,
            deadline: now + self.duration,
        });
        self.current = target;
        if target == 0 {
            self.text_completed = false;
        }

        let section = self.current_section();
        tracing::debug!(from, to = target, ?direction, "Page transition started");

        Ok(PageChange {
            from,
            to: target,
            section,
            direction,
        })
    }

    /// Release the lock once its deadline passed; true if it was released
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.transition {
            Some(transition) if now >= transition.deadline => {
                self.finish_transition();
                true
            }
            _ => false,
        }
    }

    /// The renderer finished its slide; release the lock early
    pub fn acknowledge_transition_end(&mut self) -> bool {
        if self.transition.is_none() {
            return false;
        }
        self.finish_transition();
        true
    }

    fn finish_transition(&mut self) {
        self.transition = None;
        self.direction = TransitionDirection::None;
        tracing::debug!(page = self.current, "Page transition finished");
    }

    pub fn next(&mut self, now: Instant) -> Result<PageChange, Rejection> {
        self.goto(self.current + 1, None, now)
    }

    pub fn previous(&mut self, now: Instant) -> Result<PageChange, Rejection> {
        match self.current.checked_sub(1) {
            Some(target) => self.goto(target, None, now),
            None => Err(Rejection::AlreadyActive),
        }
    }

    /// Wheel paging; the sign of `delta_y` picks the neighbour
    pub fn handle_wheel(&mut self, delta_y: f64, now: Instant) -> Option<PageChange> {
        self.tick(now);
        if self.is_locked() {
            return None;
        }

        let result = if delta_y > 0.0 && self.current + 1 < PAGE_COUNT {
            self.next(now)
        } else if delta_y < 0.0 && self.current > 0 {
            self.previous(now)
        } else {
            return None;
        };
        Self::accepted(result)
    }

    pub fn handle_key(&mut self, key: PageKey, now: Instant) -> Option<PageChange> {
        let result = match key {
            PageKey::Next => self.next(now),
            PageKey::Previous => self.previous(now),
            PageKey::First => self.goto(0, None, now),
            PageKey::Last => self.goto(PAGE_COUNT - 1, None, now),
        };
        Self::accepted(result)
    }

    pub fn touch_start(&mut self, y: f64) {
        self.touch_start_y = Some(y);
    }

    /// Finish a swipe; only travel beyond the threshold pages
    pub fn touch_end(&mut self, y: f64, now: Instant) -> Option<PageChange> {
        let start = self.touch_start_y.take()?;
        self.tick(now);
        if self.is_locked() {
            return None;
        }

        let travel = start - y;
        if travel.abs() <= self.swipe_threshold {
            return None;
        }
        let result = if travel > 0.0 {
            self.next(now)
        } else {
            self.previous(now)
        };
        Self::accepted(result)
    }

    fn accepted(result: Result<PageChange, Rejection>) -> Option<PageChange> {
        match result {
            Ok(change) => Some(change),
            Err(rejection) => {
                tracing::debug!(?rejection, "Page request ignored");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager() -> FullPageScroll {
        FullPageScroll::new(&StageConfig::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_initial_state() {
        let p = pager();
        assert_eq!(p.current_page(), 0);
        assert!(!p.is_locked());
        assert_eq!(p.direction(), TransitionDirection::None);
        assert!(p.input_owned_by_text());
    }

    #[test]
    fn test_forward_gated_until_text_complete() {
        let mut p = pager();
        let t0 = Instant::now();
        assert_eq!(p.goto(1, None, t0), Err(Rejection::TextGateClosed));
        assert_eq!(p.current_page(), 0);
        assert!(!p.is_locked());

        p.report_text_complete();
        let change = p.goto(1, None, t0).unwrap();
        assert_eq!(change.section, Section::News);
        assert_eq!(change.direction, TransitionDirection::ToNews);
        assert_eq!(p.current_page(), 1);
        assert!(p.is_locked());
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut p = pager();
        p.report_text_complete();
        let t0 = Instant::now();
        assert_eq!(p.goto(5, None, t0), Err(Rejection::OutOfRange { target: 5 }));
        assert_eq!(p.current_page(), 0);
        assert!(!p.is_locked());
        assert_eq!(p.direction(), TransitionDirection::None);
    }

    #[test]
    fn test_same_page_is_noop() {
        let mut p = pager();
        assert_eq!(p.goto(0, None, Instant::now()), Err(Rejection::AlreadyActive));
        assert!(!p.is_locked());
    }

    #[test]
    fn test_lock_holds_for_full_duration() {
        let mut p = pager();
        p.report_text_complete();
        let t0 = Instant::now();
        p.goto(1, None, t0).unwrap();

        assert_eq!(p.goto(0, None, t0 + ms(10)), Err(Rejection::Locked));
        assert_eq!(p.current_page(), 1);

        assert!(!p.tick(t0 + ms(999)));
        assert!(p.is_locked());
        assert!(p.tick(t0 + ms(1000)));
        assert!(!p.is_locked());
        assert_eq!(p.direction(), TransitionDirection::None);
    }

    #[test]
    fn test_goto_expires_stale_lock() {
        let mut p = pager();
        p.report_text_complete();
        let t0 = Instant::now();
        p.goto(1, None, t0).unwrap();
        assert!(p.goto(0, None, t0 + ms(1000)).is_ok());
    }

    #[test]
    fn test_acknowledge_releases_early() {
        let mut p = pager();
        p.report_text_complete();
        let t0 = Instant::now();
        p.goto(1, None, t0).unwrap();
        assert_eq!(p.transition_progress(t0 + ms(500)), Some(0.5));
        assert!(p.acknowledge_transition_end());
        assert!(!p.is_locked());
        assert!(!p.acknowledge_transition_end());
        assert_eq!(p.transition_progress(t0 + ms(500)), None);
    }

    #[test]
    fn test_return_resets_text_gate() {
        let mut p = pager();
        p.report_text_complete();
        let t0 = Instant::now();
        p.goto(1, None, t0).unwrap();

        let change = p.goto(0, None, t0 + ms(1000)).unwrap();
        assert_eq!(change.direction, TransitionDirection::ToIntroduction);
        assert!(!p.text_completed());
        assert_eq!(p.goto(1, None, t0 + ms(2000)), Err(Rejection::TextGateClosed));
    }

    #[test]
    fn test_hinted_directions() {
        let mut p = pager();
        p.report_text_complete();
        let t0 = Instant::now();
        let change = p.goto(1, Some(AnimationHint::Up), t0).unwrap();
        assert_eq!(change.direction, TransitionDirection::ToNewsUp);
        assert_eq!(p.direction(), TransitionDirection::ToNewsUp);

        let change = p.goto(0, Some(AnimationHint::Down), t0 + ms(1000)).unwrap();
        assert_eq!(change.direction, TransitionDirection::ToIntroductionDown);
    }

    #[test]
    fn test_wheel_paging() {
        let mut p = pager();
        p.report_text_complete();
        let t0 = Instant::now();

        assert!(p.handle_wheel(-100.0, t0).is_none());
        assert!(p.handle_wheel(0.0, t0).is_none());
        assert_eq!(p.handle_wheel(100.0, t0).map(|c| c.to), Some(1));
        assert!(p.handle_wheel(-100.0, t0 + ms(500)).is_none());
        assert!(p.handle_wheel(100.0, t0 + ms(1000)).is_none());
        assert_eq!(p.handle_wheel(-3.0, t0 + ms(1000)).map(|c| c.to), Some(0));
    }

    #[test]
    fn test_keys() {
        let mut p = pager();
        p.report_text_complete();
        let t0 = Instant::now();
        assert_eq!(p.handle_key(PageKey::Last, t0).map(|c| c.to), Some(1));
        assert!(p.acknowledge_transition_end());
        assert!(p.handle_key(PageKey::Next, t0).is_none());
        assert_eq!(p.handle_key(PageKey::First, t0).map(|c| c.to), Some(0));
    }

    #[test]
    fn test_swipe_threshold() {
        let mut p = pager();
        p.report_text_complete();
        let t0 = Instant::now();

        p.touch_start(300.0);
        assert!(p.touch_end(250.0, t0).is_none());

        p.touch_start(300.0);
        assert_eq!(p.touch_end(249.0, t0).map(|c| c.to), Some(1));

        // End without a start is ignored
        assert!(p.touch_end(0.0, t0 + ms(1000)).is_none());

        p.touch_start(100.0);
        assert_eq!(p.touch_end(200.0, t0 + ms(1000)).map(|c| c.to), Some(0));
    }
}
