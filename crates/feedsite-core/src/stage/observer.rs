use super::section::Section;

/// Receiver of stage notifications
///
/// Passed by reference into every stage call that can produce a
/// notification. Nothing is retained between calls, so dropping a stage
/// leaves no listener behind.
pub trait StageObserver {
    fn on_page_changed(&mut self, _section: Section, _page_index: usize) {}

    /// Caption crawl progress in percent, only sent when the value changes
    fn on_text_progress(&mut self, _progress: f64) {}

    fn on_text_complete(&mut self) {}
}

/// Observer that ignores everything
pub struct NullObserver;

impl StageObserver for NullObserver {}

/// Recorded notification
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    PageChanged { section: Section, page_index: usize },
    TextProgress(f64),
    TextComplete,
}

impl StageObserver for Vec<StageEvent> {
    fn on_page_changed(&mut self, section: Section, page_index: usize) {
        self.push(StageEvent::PageChanged { section, page_index });
    }

    fn on_text_progress(&mut self, progress: f64) {
        self.push(StageEvent::TextProgress(progress));
    }

    fn on_text_complete(&mut self) {
        self.push(StageEvent::TextComplete);
    }
}
