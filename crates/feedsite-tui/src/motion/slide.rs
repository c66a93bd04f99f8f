use std::time::{Duration, Instant};

use feedsite_core::stage::SectionMotion;
use ratatui::layout::Rect;

use super::easing::{EasingType, EasingTypeExt};

/// A running page slide
#[derive(Debug, Clone, Copy)]
pub struct Slide {
    started: Instant,
    duration: Duration,
    easing: EasingType,
}

impl Slide {
    pub fn start(now: Instant, duration: Duration, easing: EasingType) -> Self {
        Self {
            started: now,
            duration,
            easing,
        }
    }

    /// Linear progress in [0, 1]
    pub fn fraction(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn eased(&self, now: Instant) -> f64 {
        self.easing.apply(self.fraction(now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Row offset of a section with `motion` at `now`; negative is upwards
    pub fn offset(&self, motion: SectionMotion, height: u16, now: Instant) -> i32 {
        motion_offset(motion, height, self.eased(now))
    }
}

/// Row offset for `motion` at eased progress `t`
pub fn motion_offset(motion: SectionMotion, height: u16, t: f64) -> i32 {
    let h = height as f64;
    let rows = match motion {
        SectionMotion::Still => 0.0,
        SectionMotion::ExitUp => -h * t,
        SectionMotion::ExitDown => h * t,
        SectionMotion::EnterFromBelow => h * (1.0 - t),
        SectionMotion::EnterFromAbove => -h * (1.0 - t),
    };
    rows.round() as i32
}

/// Visible part of `area` after shifting it by `offset` rows
///
/// Shifting down pushes the top edge; shifting up eats rows from the
/// bottom. None once the section is entirely off screen.
pub fn slide_rect(area: Rect, offset: i32) -> Option<Rect> {
    let shift = offset.unsigned_abs().min(area.height as u32) as u16;
    let height = area.height - shift;
    if height == 0 {
        return None;
    }
    let y = if offset > 0 { area.y + shift } else { area.y };
    Some(Rect::new(area.x, y, area.width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_progress() {
        let t0 = Instant::now();
        let slide = Slide::start(t0, Duration::from_millis(1000), EasingType::Linear);
        assert_eq!(slide.fraction(t0), 0.0);
        assert_eq!(slide.fraction(t0 + Duration::from_millis(250)), 0.25);
        assert!(!slide.is_finished(t0 + Duration::from_millis(999)));
        assert!(slide.is_finished(t0 + Duration::from_millis(1000)));
        assert_eq!(slide.fraction(t0 + Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn test_zero_duration_is_finished() {
        let t0 = Instant::now();
        let slide = Slide::start(t0, Duration::ZERO, EasingType::Cubic);
        assert!(slide.is_finished(t0));
        assert_eq!(slide.eased(t0), 1.0);
    }

    #[test]
    fn test_motion_offsets() {
        assert_eq!(motion_offset(SectionMotion::ExitUp, 40, 0.5), -20);
        assert_eq!(motion_offset(SectionMotion::EnterFromBelow, 40, 0.0), 40);
        assert_eq!(motion_offset(SectionMotion::EnterFromBelow, 40, 1.0), 0);
        assert_eq!(motion_offset(SectionMotion::EnterFromAbove, 40, 0.25), -30);
        assert_eq!(motion_offset(SectionMotion::ExitDown, 40, 1.0), 40);
        assert_eq!(motion_offset(SectionMotion::Still, 40, 0.5), 0);
    }

    #[test]
    fn test_slide_rect() {
        let area = Rect::new(0, 1, 80, 20);
        assert_eq!(slide_rect(area, 0), Some(area));
        assert_eq!(slide_rect(area, 5), Some(Rect::new(0, 6, 80, 15)));
        assert_eq!(slide_rect(area, -5), Some(Rect::new(0, 1, 80, 15)));
        assert_eq!(slide_rect(area, 20), None);
        assert_eq!(slide_rect(area, -40), None);
    }
}
