use feedsite_core::stage::Section;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Route};

const BRAND: &str = " feedsite ";
const GAP: u16 = 1;

/// Something clickable in the navbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Section(Section),
    Login,
    Manage,
    Logout,
}

impl NavTarget {
    fn label(self) -> &'static str {
        match self {
            NavTarget::Section(section) => section.title(),
            NavTarget::Login => "Login",
            NavTarget::Manage => "Manage",
            NavTarget::Logout => "Logout",
        }
    }
}

/// Column span of one navbar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavSlot {
    pub target: NavTarget,
    pub x: u16,
    pub width: u16,
}

impl NavSlot {
    fn contains(&self, column: u16) -> bool {
        column >= self.x && column < self.x + self.width
    }
}

/// Lay out the navbar entries on the first row of `area`
///
/// Sections follow the brand on the left; account entries sit on the right.
/// Entries that would not fit are left out.
pub fn nav_slots(area: Rect, logged_in: bool) -> Vec<NavSlot> {
    let mut slots = Vec::new();
    let padded = |target: NavTarget| target.label().width() as u16 + 2;

    let mut x = area.x + BRAND.width() as u16 + GAP;
    for section in Section::ALL {
        let target = NavTarget::Section(section);
        let width = padded(target);
        if x + width > area.right() {
            return slots;
        }
        slots.push(NavSlot { target, x, width });
        x += width + GAP;
    }
    let left_end = x;

    let account: &[NavTarget] = if logged_in {
        &[NavTarget::Manage, NavTarget::Logout]
    } else {
        &[NavTarget::Login]
    };
    let total: u16 = account.iter().map(|t| padded(*t) + GAP).sum();
    let Some(mut x) = area.right().checked_sub(total) else {
        return slots;
    };
    if x < left_end {
        return slots;
    }
    for target in account {
        let width = padded(*target);
        slots.push(NavSlot { target: *target, x, width });
        x += width + GAP;
    }
    slots
}

/// Navbar entry under `column`, if any
pub fn nav_target_at(area: Rect, logged_in: bool, column: u16) -> Option<NavTarget> {
    nav_slots(area, logged_in)
        .into_iter()
        .find(|slot| slot.contains(column))
        .map(|slot| slot.target)
}

pub struct NavbarWidget;

impl NavbarWidget {
    /// Two rows: entries, then the caption progress rule
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let bar = Style::default().bg(theme.bg1);
        let on_home = app.route == Route::Home;

        let mut spans = vec![Span::styled(
            BRAND,
            Style::default()
                .fg(theme.accent)
                .bg(theme.bg1)
                .add_modifier(Modifier::BOLD),
        )];
        let mut cursor = area.x + BRAND.width() as u16;

        for slot in nav_slots(area, app.user.is_some()) {
            if slot.x > cursor {
                spans.push(Span::styled(" ".repeat((slot.x - cursor) as usize), bar));
            }
            let active = match slot.target {
                NavTarget::Section(section) => on_home && app.navbar.active_section() == section,
                NavTarget::Manage => app.route == Route::Manage,
                NavTarget::Login => matches!(app.route, Route::Login | Route::Register),
                NavTarget::Logout => false,
            };
            let style = if active {
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg0).bg(theme.bg1)
            };
            spans.push(Span::styled(format!(" {} ", slot.target.label()), style));
            cursor = slot.x + slot.width;
        }
        if area.right() > cursor {
            spans.push(Span::styled(" ".repeat((area.right() - cursor) as usize), bar));
        }

        let entries = Rect::new(area.x, area.y, area.width, 1.min(area.height));
        frame.render_widget(Paragraph::new(Line::from(spans)), entries);

        if area.height < 2 {
            return;
        }
        let rule = Rect::new(area.x, area.y + 1, area.width, 1);
        let line = if on_home && app.navbar.progress_visible() {
            progress_line(area.width, app.navbar.progress(), theme.accent, theme.bg2)
        } else {
            Line::from(Span::styled(
                "─".repeat(area.width as usize),
                Style::default().fg(theme.bg2),
            ))
        };
        frame.render_widget(Paragraph::new(line), rule);
    }
}

/// Thin horizontal bar filled to `progress` (0..=1)
fn progress_line(width: u16, progress: f64, fill: ratatui::style::Color, rest: ratatui::style::Color) -> Line<'static> {
    let filled = filled_cells(width, progress);
    Line::from(vec![
        Span::styled("━".repeat(filled), Style::default().fg(fill)),
        Span::styled(
            "─".repeat(width as usize - filled),
            Style::default().fg(rest),
        ),
    ])
}

fn filled_cells(width: u16, progress: f64) -> usize {
    ((width as f64) * progress.clamp(0.0, 1.0)).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_anonymous() {
        let area = Rect::new(0, 0, 80, 2);
        let slots = nav_slots(area, false);
        let targets: Vec<_> = slots.iter().map(|s| s.target).collect();
        assert_eq!(
            targets,
            vec![
                NavTarget::Section(Section::Introduction),
                NavTarget::Section(Section::News),
                NavTarget::Login
            ]
        );
        // " feedsite " is 10 wide, plus one gap
        assert_eq!(slots[0].x, 11);
        assert_eq!(slots[0].width, 14);
        assert_eq!(slots[1].x, 26);
        // Login hugs the right edge
        assert_eq!(slots[2].x + slots[2].width + GAP, 80);
    }

    #[test]
    fn test_hit_testing() {
        let area = Rect::new(0, 0, 80, 2);
        assert_eq!(nav_target_at(area, false, 3), None);
        assert_eq!(
            nav_target_at(area, false, 11),
            Some(NavTarget::Section(Section::Introduction))
        );
        assert_eq!(
            nav_target_at(area, false, 27),
            Some(NavTarget::Section(Section::News))
        );
        assert_eq!(nav_target_at(area, false, 75), Some(NavTarget::Login));
        assert_eq!(nav_target_at(area, true, 78), Some(NavTarget::Logout));
    }

    #[test]
    fn test_narrow_terminal_drops_account_entries() {
        let area = Rect::new(0, 0, 34, 2);
        let slots = nav_slots(area, true);
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(|s| s.x + s.width <= 34));
    }

    #[test]
    fn test_filled_cells() {
        assert_eq!(filled_cells(80, 0.0), 0);
        assert_eq!(filled_cells(80, 0.5), 40);
        assert_eq!(filled_cells(80, 2.0), 80);
    }
}
