//! Sections of the paged viewport and the tags describing moves between them

/// Number of full-screen sections on the home route
pub const PAGE_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Introduction,
    News,
}

impl Section {
    pub const ALL: [Section; PAGE_COUNT] = [Section::Introduction, Section::News];

    pub fn index(self) -> usize {
        match self {
            Section::Introduction => 0,
            Section::News => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Stable lowercase name carried by page-changed notifications
    pub fn name(self) -> &'static str {
        match self {
            Section::Introduction => "introduction",
            Section::News => "news",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Introduction => "Introduction",
            Section::News => "News",
        }
    }

    /// Slide hint the navbar attaches when jumping to this section
    pub fn nav_hint(self) -> AnimationHint {
        match self {
            Section::Introduction => AnimationHint::Down,
            Section::News => AnimationHint::Up,
        }
    }
}

/// Direction hint attached to navbar-initiated page requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationHint {
    Up,
    Down,
}

/// Which slide variant the current transition uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionDirection {
    #[default]
    None,
    /// Introduction to news by wheel, swipe or key
    ToNews,
    /// News back to introduction by wheel, swipe or key
    ToIntroduction,
    /// Navbar jump to news, sliding up
    ToNewsUp,
    /// Navbar jump to introduction, sliding down
    ToIntroductionDown,
}

/// How a single section moves during a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionMotion {
    Still,
    ExitUp,
    EnterFromBelow,
    ExitDown,
    EnterFromAbove,
}

impl TransitionDirection {
    /// Pick the variant for a move from `from` to `to`
    ///
    /// A hint only applies when it matches its target section (up towards
    /// news, down towards the introduction); otherwise the organic variant
    /// for the page pair is used.
    pub fn resolve(from: usize, to: usize, hint: Option<AnimationHint>) -> Self {
        match (hint, to) {
            (Some(AnimationHint::Up), 1) => return TransitionDirection::ToNewsUp,
            (Some(AnimationHint::Down), 0) => return TransitionDirection::ToIntroductionDown,
            _ => {}
        }
        match (from, to) {
            (0, 1) => TransitionDirection::ToNews,
            (1, 0) => TransitionDirection::ToIntroduction,
            _ => TransitionDirection::None,
        }
    }

    pub fn is_none(self) -> bool {
        self == TransitionDirection::None
    }

    /// Motion of `section` under this variant
    pub fn motion(self, section: Section) -> SectionMotion {
        use SectionMotion::*;
        use TransitionDirection as D;

        match (self, section) {
            (D::ToNews, Section::Introduction) => ExitUp,
            (D::ToNews, Section::News) => EnterFromBelow,
            (D::ToIntroduction, Section::Introduction) => EnterFromAbove,
            (D::ToIntroduction, Section::News) => ExitDown,
            (D::ToNewsUp, Section::News) => EnterFromBelow,
            (D::ToIntroductionDown, Section::Introduction) => EnterFromAbove,
            _ => Still,
        }
    }

    /// Style-class name of the variant as applied to `section`
    pub fn class_for(self, section: Section) -> Option<&'static str> {
        use TransitionDirection as D;

        match (self, section) {
            (D::ToNews, Section::Introduction) => Some("to-news"),
            (D::ToIntroduction, Section::Introduction) => Some("from-news"),
            (D::ToIntroductionDown, Section::Introduction) => Some("from-news-down"),
            (D::ToNews, Section::News) => Some("from-introduction"),
            (D::ToIntroduction, Section::News) => Some("to-introduction"),
            (D::ToNewsUp, Section::News) => Some("from-introduction-up"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_table() {
        assert_eq!(Section::from_index(0), Some(Section::Introduction));
        assert_eq!(Section::from_index(1), Some(Section::News));
        assert_eq!(Section::from_index(2), None);
        assert_eq!(Section::News.name(), "news");
        assert_eq!(Section::Introduction.nav_hint(), AnimationHint::Down);
        assert_eq!(Section::News.nav_hint(), AnimationHint::Up);
    }

    #[test]
    fn test_organic_directions() {
        assert_eq!(TransitionDirection::resolve(0, 1, None), TransitionDirection::ToNews);
        assert_eq!(TransitionDirection::resolve(1, 0, None), TransitionDirection::ToIntroduction);
        assert_eq!(TransitionDirection::resolve(1, 1, None), TransitionDirection::None);
    }

    #[test]
    fn test_hinted_directions() {
        assert_eq!(
            TransitionDirection::resolve(0, 1, Some(AnimationHint::Up)),
            TransitionDirection::ToNewsUp
        );
        assert_eq!(
            TransitionDirection::resolve(1, 0, Some(AnimationHint::Down)),
            TransitionDirection::ToIntroductionDown
        );
        // A hint pointing away from its target falls back to the organic variant
        assert_eq!(
            TransitionDirection::resolve(0, 1, Some(AnimationHint::Down)),
            TransitionDirection::ToNews
        );
    }

    #[test]
    fn test_motion_and_classes() {
        let d = TransitionDirection::ToNewsUp;
        assert_eq!(d.motion(Section::News), SectionMotion::EnterFromBelow);
        assert_eq!(d.motion(Section::Introduction), SectionMotion::Still);
        assert_eq!(d.class_for(Section::News), Some("from-introduction-up"));
        assert_eq!(d.class_for(Section::Introduction), None);

        let d = TransitionDirection::ToIntroduction;
        assert_eq!(d.class_for(Section::Introduction), Some("from-news"));
        assert_eq!(d.motion(Section::News), SectionMotion::ExitDown);
        assert_eq!(TransitionDirection::None.class_for(Section::News), None);
    }
}
