// Timed progression between sections, expressed as a rule table.

use std::time::Duration;

use bevy::prelude::*;

use crate::navigation::NavigationState;
use crate::reveals::RevealMap;
use crate::sections::Sections;
use crate::session::TimedAction;
use crate::timers::{PendingTimers, TimerHandle};

/// Extra condition a rule needs beyond being on its trigger section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Always,
    AllRevealed,
}

impl Guard {
    pub fn holds(self, reveals: &RevealMap) -> bool {
        match self {
            Guard::Always => true,
            Guard::AllRevealed => reveals.all_revealed(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceRule {
    pub trigger: Sections,
    pub guard: Guard,
    pub delay: Duration,
    pub target: Sections,
}

pub const RULES: [AdvanceRule; 3] = [
    AdvanceRule {
        trigger: Sections::Intro,
        guard: Guard::Always,
        delay: Duration::from_millis(3000),
        target: Sections::Photos,
    },
    AdvanceRule {
        trigger: Sections::Game,
        guard: Guard::AllRevealed,
        delay: Duration::from_millis(2000),
        target: Sections::ToFinal,
    },
    AdvanceRule {
        trigger: Sections::ToFinal,
        guard: Guard::Always,
        delay: Duration::from_millis(8000),
        target: Sections::Final,
    },
];

/// Keeps at most one pending timer, belonging to the rule that is active now.
#[derive(Debug, Default)]
pub struct AutoAdvance {
    armed: Option<(usize, TimerHandle)>,
}

impl AutoAdvance {
    /// Index into [`RULES`] of the rule whose trigger and guard hold.
    pub fn active_rule(nav: &NavigationState, reveals: &RevealMap) -> Option<usize> {
        if !nav.auto_advance_enabled {
            return None;
        }
        RULES
            .iter()
            .position(|rule| rule.trigger == nav.current && rule.guard.holds(reveals))
    }

    pub fn armed_rule(&self) -> Option<usize> {
        self.armed.map(|(rule, _)| rule)
    }

    /// Re-run after any change to the section, the enable flag or the reveals.
    pub fn evaluate(
        &mut self,
        nav: &NavigationState,
        reveals: &RevealMap,
        timers: &mut PendingTimers<TimedAction>,
    ) {
        let active = Self::active_rule(nav, reveals);

        if let Some((rule, handle)) = self.armed {
            if Some(rule) == active && timers.is_pending(handle) {
                return;
            }
            timers.cancel(handle);
            self.armed = None;
        }

        let Some(rule) = active else {
            return;
        };
        let AdvanceRule { delay, target, .. } = RULES[rule];
        let handle = timers.schedule(delay, TimedAction::Advance { rule });
        debug!("auto-advance to {target:?} armed for {delay:?}");
        self.armed = Some((rule, handle));
    }

    /// Called when the armed rule's timer has fired.
    pub fn fired(&mut self, rule: usize) {
        if self.armed_rule() == Some(rule) {
            self.armed = None;
        }
    }

    /// Forget the armed timer without touching the timer set.
    pub fn disarm(&mut self) {
        self.armed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveals::Question;
    use strum::IntoEnumIterator;

    fn at(section: Sections) -> NavigationState {
        NavigationState {
            current: section,
            ..Default::default()
        }
    }

    #[test]
    fn rules_match_their_trigger_sections() {
        let reveals = RevealMap::default();
        assert_eq!(AutoAdvance::active_rule(&at(Sections::Intro), &reveals), Some(0));
        assert_eq!(AutoAdvance::active_rule(&at(Sections::ToFinal), &reveals), Some(2));
        assert_eq!(AutoAdvance::active_rule(&at(Sections::Photos), &reveals), None);
        assert_eq!(AutoAdvance::active_rule(&at(Sections::Final), &reveals), None);
    }

    #[test]
    fn game_rule_waits_for_every_reveal() {
        let mut reveals = RevealMap::default();
        let game = at(Sections::Game);
        assert_eq!(AutoAdvance::active_rule(&game, &reveals), None);

        for question in Question::iter() {
            reveals.reveal(question, 0);
        }
        assert_eq!(AutoAdvance::active_rule(&game, &reveals), Some(1));
    }

    #[test]
    fn disabled_navigation_has_no_active_rule() {
        let nav = NavigationState {
            auto_advance_enabled: false,
            ..Default::default()
        };
        assert_eq!(AutoAdvance::active_rule(&nav, &RevealMap::default()), None);
    }

    #[test]
    fn evaluate_never_duplicates_a_timer() {
        let mut auto = AutoAdvance::default();
        let mut timers = PendingTimers::default();
        let nav = at(Sections::Intro);
        let reveals = RevealMap::default();

        auto.evaluate(&nav, &reveals, &mut timers);
        auto.evaluate(&nav, &reveals, &mut timers);
        auto.evaluate(&nav, &reveals, &mut timers);

        assert_eq!(timers.len(), 1);
        assert_eq!(auto.armed_rule(), Some(0));
    }

    #[test]
    fn leaving_the_trigger_section_cancels_the_timer() {
        let mut auto = AutoAdvance::default();
        let mut timers = PendingTimers::default();
        let reveals = RevealMap::default();

        auto.evaluate(&at(Sections::Intro), &reveals, &mut timers);
        assert_eq!(timers.len(), 1);

        auto.evaluate(&at(Sections::Photos), &reveals, &mut timers);
        assert!(timers.is_empty());
        assert_eq!(auto.armed_rule(), None);
    }

    #[test]
    fn switching_rules_replaces_the_timer() {
        let mut auto = AutoAdvance::default();
        let mut timers = PendingTimers::default();
        let reveals = RevealMap::default();

        auto.evaluate(&at(Sections::Intro), &reveals, &mut timers);
        auto.evaluate(&at(Sections::ToFinal), &reveals, &mut timers);

        assert_eq!(timers.len(), 1);
        assert_eq!(auto.armed_rule(), Some(2));
        assert_eq!(
            timers.pop_due(Duration::from_millis(8000)),
            Some(TimedAction::Advance { rule: 2 })
        );
    }
}
