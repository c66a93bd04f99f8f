//! Caption crawl driven by wheel and drag input
//!
//! Input moves a progress value in `[0, 100]`; each caption line derives its
//! visual weight from its distance to the focus line. Once progress reaches
//! 100 a completion is scheduled after a settle delay and delivered from
//! [`ScrollText::poll`].

use std::time::{Duration, Instant};

use crate::config::StageConfig;

pub const PROGRESS_MAX: f64 = 100.0;

const MIN_OPACITY: f64 = 0.1;
const OPACITY_FALLOFF: f64 = 0.8;
const MIN_SCALE: f64 = 0.4;
const SCALE_FALLOFF: f64 = 0.15;
const LINE_SPACING: f64 = 60.0;
const DEPTH_STEP: f64 = 15.0;

/// One line of the crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub text: String,
    /// Attribution lines are set apart (right aligned, italic)
    pub attribution: bool,
}

impl Caption {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attribution: false,
        }
    }

    pub fn attribution(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attribution: true,
        }
    }
}

impl From<&str> for Caption {
    fn from(text: &str) -> Self {
        Caption::line(text)
    }
}

/// Captions shown on the introduction page
pub fn introduction_captions() -> Vec<Caption> {
    vec![
        Caption::line("When you want something,"),
        Caption::line("all the universe conspires"),
        Caption::line("in helping you to achieve it."),
        Caption::attribution("Paulo Coelho"),
        Caption::line("Feed is that conspiracy:"),
        Caption::line("the conspiracy of trust."),
        Caption::line("Trust is the single"),
        Caption::line("most important ingredient"),
        Caption::line("missing from digital relationships."),
        Caption::line("Boston Consulting Group"),
        Caption::line("and the World Economic Forum"),
        Caption::line("forecast the digital economy"),
    ]
}

/// Visual weight of one caption line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Signed distance from the focus line, in lines
    pub distance: f64,
    pub opacity: f64,
    pub scale: f64,
    /// Vertical offset from the centre, in pixels
    pub offset_y: f64,
    /// Receding depth, never positive
    pub depth: f64,
}

impl LineStyle {
    pub fn at_distance(distance: f64) -> Self {
        let d = distance.abs();
        Self {
            distance,
            opacity: (-d * OPACITY_FALLOFF).exp().max(MIN_OPACITY),
            scale: (1.0 - d * SCALE_FALLOFF).max(MIN_SCALE),
            offset_y: distance * LINE_SPACING,
            depth: -d * DEPTH_STEP,
        }
    }
}

/// Receiver of crawl notifications
pub trait ScrollTextObserver {
    fn on_scroll_progress(&mut self, progress: f64);
    fn on_complete(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Armed,
    Pending { due: Instant },
    Fired,
}

#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    start_y: f64,
    start_progress: f64,
}

pub struct ScrollText {
    captions: Vec<Caption>,
    progress: f64,
    sensitivity: f64,
    settle: Duration,
    drag: Option<DragAnchor>,
    completion: Completion,
}

impl ScrollText {
    pub fn new(captions: Vec<Caption>, config: &StageConfig) -> Self {
        Self {
            captions,
            progress: 0.0,
            sensitivity: config.wheel_sensitivity,
            settle: config.settle_duration(),
            drag: None,
            completion: Completion::Armed,
        }
    }

    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// True once progress reached the end, even before the settle delay ran out
    pub fn is_completed(&self) -> bool {
        self.completion != Completion::Armed
    }

    /// True while a completion waits for its settle delay
    pub fn is_settling(&self) -> bool {
        matches!(self.completion, Completion::Pending { .. })
    }

    /// Wheel input; positive `delta_y` moves forward
    pub fn apply_wheel(&mut self, delta_y: f64, now: Instant, observer: &mut dyn ScrollTextObserver) {
        let target = self.progress + delta_y * self.sensitivity;
        self.set_progress(target, now, observer);
    }

    pub fn touch_start(&mut self, y: f64) {
        self.drag = Some(DragAnchor {
            start_y: y,
            start_progress: self.progress,
        });
    }

    /// Drag relative to the anchor; dragging upwards moves forward
    pub fn touch_move(&mut self, y: f64, now: Instant, observer: &mut dyn ScrollTextObserver) {
        let Some(anchor) = self.drag else {
            return;
        };
        let target = anchor.start_progress + (anchor.start_y - y) * self.sensitivity;
        self.set_progress(target, now, observer);
    }

    pub fn touch_end(&mut self) {
        self.drag = None;
    }

    /// Deliver a completion whose settle delay has run out
    pub fn poll(&mut self, now: Instant, observer: &mut dyn ScrollTextObserver) {
        if let Completion::Pending { due } = self.completion {
            if now >= due {
                self.completion = Completion::Fired;
                tracing::debug!("Caption crawl completed");
                observer.on_complete();
            }
        }
    }

    /// Rewind to the first line and re-arm completion
    ///
    /// A completion still waiting for its settle delay is dropped.
    pub fn reset(&mut self, observer: &mut dyn ScrollTextObserver) {
        self.completion = Completion::Armed;
        self.drag = None;
        if self.progress != 0.0 {
            self.progress = 0.0;
            observer.on_scroll_progress(0.0);
        }
    }

    /// Fractional index of the line in focus, None without captions
    pub fn focus_index(&self) -> Option<f64> {
        if self.captions.is_empty() {
            return None;
        }
        let last = (self.captions.len() - 1) as f64;
        Some(self.progress / PROGRESS_MAX * last)
    }

    pub fn line_styles(&self) -> Vec<LineStyle> {
        let Some(focus) = self.focus_index() else {
            return Vec::new();
        };
        (0..self.captions.len())
            .map(|index| LineStyle::at_distance(index as f64 - focus))
            .collect()
    }

    fn set_progress(&mut self, target: f64, now: Instant, observer: &mut dyn ScrollTextObserver) {
        let clamped = target.clamp(0.0, PROGRESS_MAX);
        if clamped != self.progress {
            self.progress = clamped;
            observer.on_scroll_progress(clamped);
        }

        if self.progress >= PROGRESS_MAX && self.completion == Completion::Armed {
            self.completion = Completion::Pending {
                due: now + self.settle,
            };
            self.poll(now, observer);
        }
    }
}
