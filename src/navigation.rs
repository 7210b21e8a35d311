// Current/previous section bookkeeping.

use crate::sections::{Direction, SectionChanged, Sections};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub current: Sections,
    pub previous: Option<Sections>,
    pub direction: Direction,
    /// Cleared by the first manual step back and never set again.
    pub auto_advance_enabled: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current: Sections::FIRST,
            previous: None,
            direction: Direction::Forward,
            auto_advance_enabled: true,
        }
    }
}

impl NavigationState {
    /// Move to `target` unconditionally. Navigating to the current section
    /// still records it as previous and reports a backward slide.
    pub fn navigate(&mut self, target: Sections) -> SectionChanged {
        let from = self.current;
        self.previous = Some(from);
        self.direction = Direction::between(from, target);
        self.current = target;
        SectionChanged {
            from,
            to: target,
            direction: self.direction,
        }
    }

    pub fn can_step_back(&self) -> bool {
        self.current != Sections::FIRST
    }

    pub fn can_step_forward(&self) -> bool {
        self.current != Sections::LAST
    }
}
