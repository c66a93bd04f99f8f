//! Navigation bar state
//!
//! Mirrors the active section and the caption progress from stage
//! notifications, and turns section clicks into page requests. A click made
//! away from the home route is parked until the stage has had time to mount.

use std::time::{Duration, Instant};

use crate::config::StageConfig;

use super::observer::StageObserver;
use super::scroll_text::PROGRESS_MAX;
use super::section::{AnimationHint, Section};

/// Page request produced by a navbar click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavRequest {
    pub page_index: usize,
    pub hint: AnimationHint,
}

impl NavRequest {
    pub fn for_section(section: Section) -> Self {
        Self {
            page_index: section.index(),
            hint: section.nav_hint(),
        }
    }
}

/// What the caller has to do after a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavClick {
    /// Deliver the request to the mounted stage now
    Deliver(NavRequest),
    /// Switch to the home route; the request follows from [`Navbar::take_due`]
    NavigateHome,
}

#[derive(Debug, Clone, Copy)]
struct Deferred {
    request: NavRequest,
    due: Instant,
}

pub struct Navbar {
    active: Section,
    progress: f64,
    mount_delay: Duration,
    deferred: Option<Deferred>,
}

impl Navbar {
    pub fn new(config: &StageConfig) -> Self {
        Self {
            active: Section::Introduction,
            progress: 0.0,
            mount_delay: config.nav_mount_delay(),
            deferred: None,
        }
    }

    pub fn active_section(&self) -> Section {
        self.active
    }

    /// Caption progress in `[0, 1]`
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// The progress bar only belongs to the introduction section
    pub fn progress_visible(&self) -> bool {
        self.active == Section::Introduction
    }

    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn click(&mut self, section: Section, on_home: bool, now: Instant) -> NavClick {
        let request = NavRequest::for_section(section);
        if on_home {
            return NavClick::Deliver(request);
        }
        tracing::debug!(section = section.name(), "Deferring navbar request until home is mounted");
        self.deferred = Some(Deferred {
            request,
            due: now + self.mount_delay,
        });
        NavClick::NavigateHome
    }

    /// Hand out a parked request once its delay ran out
    pub fn take_due(&mut self, now: Instant) -> Option<NavRequest> {
        match self.deferred {
            Some(deferred) if now >= deferred.due => {
                self.deferred = None;
                Some(deferred.request)
            }
            _ => None,
        }
    }

    pub fn cancel_deferred(&mut self) {
        self.deferred = None;
    }

    /// A fresh stage was mounted on the home route
    pub fn on_stage_mounted(&mut self) {
        self.active = Section::Introduction;
        self.progress = 0.0;
    }
}

impl StageObserver for Navbar {
    fn on_page_changed(&mut self, section: Section, _page_index: usize) {
        self.active = section;
    }

    fn on_text_progress(&mut self, progress: f64) {
        self.progress = (progress / PROGRESS_MAX).clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrors_notifications() {
        let mut nav = Navbar::new(&StageConfig::default());
        assert_eq!(nav.active_section(), Section::Introduction);
        assert!(nav.progress_visible());

        nav.on_text_progress(40.0);
        assert!((nav.progress() - 0.4).abs() < 1e-9);

        nav.on_page_changed(Section::News, 1);
        assert_eq!(nav.active_section(), Section::News);
        assert!(!nav.progress_visible());

        nav.on_stage_mounted();
        assert_eq!(nav.active_section(), Section::Introduction);
        assert_eq!(nav.progress(), 0.0);
    }

    #[test]
    fn test_click_on_home_delivers_hinted_request() {
        let mut nav = Navbar::new(&StageConfig::default());
        let now = Instant::now();
        assert_eq!(
            nav.click(Section::News, true, now),
            NavClick::Deliver(NavRequest {
                page_index: 1,
                hint: AnimationHint::Up
            })
        );
        assert_eq!(
            nav.click(Section::Introduction, true, now),
            NavClick::Deliver(NavRequest {
                page_index: 0,
                hint: AnimationHint::Down
            })
        );
        assert!(!nav.has_deferred());
    }

    #[test]
    fn test_click_elsewhere_defers() {
        let mut nav = Navbar::new(&StageConfig::default());
        let t0 = Instant::now();
        assert_eq!(nav.click(Section::News, false, t0), NavClick::NavigateHome);
        assert!(nav.take_due(t0 + Duration::from_millis(99)).is_none());
        let request = nav.take_due(t0 + Duration::from_millis(100)).unwrap();
        assert_eq!(request.page_index, 1);
        assert!(nav.take_due(t0 + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_cancel_deferred() {
        let mut nav = Navbar::new(&StageConfig::default());
        let t0 = Instant::now();
        nav.click(Section::News, false, t0);
        nav.cancel_deferred();
        assert!(nav.take_due(t0 + Duration::from_secs(1)).is_none());
    }
}
