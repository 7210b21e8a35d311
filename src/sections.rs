// Sections of the greeting, in the order they are shown.

use bevy::prelude::*;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, EnumIter, EnumCount)]
pub enum Sections {
    #[default]
    Intro,
    Photos,
    Question,
    Game,
    ToFinal,
    Final,
}

impl Sections {
    pub const FIRST: Sections = Sections::Intro;
    pub const LAST: Sections = Sections::Final;

    /// Position in the fixed section order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Sections> {
        Sections::iter().nth(self.index() + 1)
    }

    pub fn previous(self) -> Option<Sections> {
        self.index().checked_sub(1).and_then(|i| Sections::iter().nth(i))
    }
}

/// Which way the incoming section slides in.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Forward only when `to` comes strictly after `from`.
    pub fn between(from: Sections, to: Sections) -> Direction {
        if to.index() > from.index() {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Written once per navigation, after the session has switched sections.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChanged {
    pub from: Sections,
    pub to: Sections,
    pub direction: Direction,
}
