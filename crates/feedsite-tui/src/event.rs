use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Poll interval while a slide is running
    frame_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        let fps = fps.clamp(1, 240) as u64;
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            frame_rate: Duration::from_millis((1000 / fps).max(1)),
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll at frame rate so animations stay smooth
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.frame_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    Pointer(Pointer),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

/// Mouse input in cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    /// One wheel notch; positive is downwards
    Wheel { notches: i8 },
    Press { column: u16, row: u16 },
    Drag { row: u16 },
    Release { row: u16 },
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only key presses; crossterm 0.27+ also reports releases on some systems
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => translate_mouse(mouse).map(AppEvent::Pointer),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

fn translate_mouse(mouse: MouseEvent) -> Option<Pointer> {
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(Pointer::Wheel { notches: 1 }),
        MouseEventKind::ScrollUp => Some(Pointer::Wheel { notches: -1 }),
        MouseEventKind::Down(MouseButton::Left) => Some(Pointer::Press {
            column: mouse.column,
            row: mouse.row,
        }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Pointer::Drag { row: mouse.row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Pointer::Release { row: mouse.row }),
        _ => None,
    }
}
