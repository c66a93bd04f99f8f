use std::time::Instant;

use feedsite_core::stage::{Section, SectionMotion, Stage};
use ratatui::{layout::Rect, widgets::Clear, Frame};

use crate::app::App;
use crate::motion::slide_rect;
use crate::widgets::{CaptionsWidget, NewsGridWidget};

/// The two stage sections, sliding while a transition runs
pub struct HomeWidget;

impl HomeWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let Some(stage) = app.stage.as_ref() else {
            return;
        };

        for (section, rect) in section_rects(stage, app, area, now) {
            frame.render_widget(Clear, rect);
            match section {
                Section::Introduction => CaptionsWidget::render(frame, rect, stage, &app.theme),
                Section::News => NewsGridWidget::render(frame, rect, app),
            }
        }
    }
}

/// Sections to draw and where, exiting section first
fn section_rects(stage: &Stage, app: &App, area: Rect, now: Instant) -> Vec<(Section, Rect)> {
    let current = stage.current_section();
    let Some(slide) = app.slide else {
        return vec![(current, area)];
    };

    let direction = stage.direction();
    let mut rects = Vec::new();
    for section in Section::ALL {
        let motion = direction.motion(section);
        if motion == SectionMotion::Still && section != current {
            continue;
        }
        let offset = slide.offset(motion, area.height, now);
        if let Some(rect) = slide_rect(area, offset) {
            rects.push((section, rect));
        }
    }
    // Entering section on top
    rects.sort_by_key(|(section, _)| *section == current);
    rects
}
