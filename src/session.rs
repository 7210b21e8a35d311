// The one owned state aggregate behind every section, plus the plugin that
// drives it from frame time and mirrors it into the `Sections` state.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::auto_advance::{AutoAdvance, RULES};
use crate::navigation::NavigationState;
use crate::proposal::{AcceptPhase, CELEBRATION, DeclineButton, PHOTO_EXIT};
use crate::reveals::{Question, RevealMap};
use crate::sections::{SectionChanged, Sections};
use crate::timers::{PendingTimers, TimerHandle};

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Session>()
            .add_message::<SectionChanged>()
            .add_systems(Update, tick_session)
            .add_systems(PostUpdate, publish_changes);
    }
}

/// Work that is waiting on the virtual clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedAction {
    /// Fire the auto-advance rule at this index of [`RULES`].
    Advance { rule: usize },
    EndCelebration,
    FinishAccept,
}

#[derive(Resource, Debug)]
pub struct Session {
    nav: NavigationState,
    timers: PendingTimers<TimedAction>,
    auto: AutoAdvance,
    decline: DeclineButton,
    reveals: RevealMap,
    accept: AcceptPhase,
    /// The pending step of the accept sequence, if one is running.
    accept_timer: Option<TimerHandle>,
    changes: Vec<SectionChanged>,
}

impl Default for Session {
    fn default() -> Self {
        let mut session = Session {
            nav: NavigationState::default(),
            timers: PendingTimers::default(),
            auto: AutoAdvance::default(),
            decline: DeclineButton::default(),
            reveals: RevealMap::default(),
            accept: AcceptPhase::Idle,
            accept_timer: None,
            changes: Vec::new(),
        };
        session.reevaluate();
        session
    }
}

impl Session {
    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn current(&self) -> Sections {
        self.nav.current
    }

    pub fn decline(&self) -> &DeclineButton {
        &self.decline
    }

    pub fn reveals(&self) -> &RevealMap {
        &self.reveals
    }

    pub fn accept(&self) -> AcceptPhase {
        self.accept
    }

    pub fn navigate(&mut self, target: Sections) {
        let change = self.nav.navigate(target);
        if let Some(from) = self.nav.previous {
            info!("section {from:?} -> {target:?} ({:?})", self.nav.direction);
        }
        // The accept sequence only makes sense on the proposal card.
        if change.from == Sections::Question && target != Sections::Question {
            self.abandon_accept();
        }
        self.changes.push(change);
        self.reevaluate();
    }

    /// Manual step back. Cancels everything pending and turns auto-advance
    /// off for the rest of the session.
    pub fn step_back(&mut self) -> bool {
        let Some(target) = self.nav.current.previous() else {
            return false;
        };
        self.abandon_accept();
        self.timers.cancel_all();
        self.auto.disarm();
        self.nav.auto_advance_enabled = false;
        self.navigate(target);
        true
    }

    /// Manual step forward. Leaves pending timers and auto-advance alone.
    pub fn step_forward(&mut self) -> bool {
        let Some(target) = self.nav.current.next() else {
            return false;
        };
        self.navigate(target);
        true
    }

    pub fn register_decline(
        &mut self,
        anchor: Option<Rect>,
        viewport: Vec2,
        rng: &mut impl Rng,
    ) -> bool {
        self.decline.register(anchor, viewport, rng)
    }

    /// Start the celebration. Ignored while a sequence is already running.
    pub fn register_accept(&mut self) -> bool {
        if self.accept != AcceptPhase::Idle {
            return false;
        }
        self.accept = AcceptPhase::Celebrating;
        let handle = self.timers.schedule(CELEBRATION, TimedAction::EndCelebration);
        self.accept_timer = Some(handle);
        true
    }

    pub fn reveal(&mut self, question: Question, option: usize) -> bool {
        if !self.reveals.reveal(question, option) {
            return false;
        }
        self.reevaluate();
        true
    }

    /// Move the virtual clock forward, applying each due action in turn.
    /// Returns whether anything fired.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let deadline = self.timers.now() + delta;
        let mut fired = false;
        while let Some(action) = self.timers.pop_due(deadline) {
            self.apply(action);
            fired = true;
        }
        self.timers.settle(deadline);
        fired
    }

    /// Section changes made since the last call, oldest first.
    pub fn take_changes(&mut self) -> Vec<SectionChanged> {
        std::mem::take(&mut self.changes)
    }

    fn apply(&mut self, action: TimedAction) {
        match action {
            TimedAction::Advance { rule } => {
                self.auto.fired(rule);
                self.navigate(RULES[rule].target);
            }
            TimedAction::EndCelebration => {
                self.accept = AcceptPhase::PhotosExiting;
                let handle = self.timers.schedule(PHOTO_EXIT, TimedAction::FinishAccept);
                self.accept_timer = Some(handle);
            }
            TimedAction::FinishAccept => {
                self.accept_timer = None;
                self.navigate(Sections::Game);
                self.accept = AcceptPhase::Idle;
            }
        }
    }

    fn abandon_accept(&mut self) {
        if let Some(handle) = self.accept_timer.take() {
            self.timers.cancel(handle);
        }
        self.accept = AcceptPhase::Idle;
    }

    fn reevaluate(&mut self) {
        self.auto.evaluate(&self.nav, &self.reveals, &mut self.timers);
    }
}

fn tick_session(mut session: ResMut<Session>, time: Res<Time>) {
    let delta = time.delta();
    if delta.is_zero() {
        return;
    }
    // Only flag the resource when a timer actually did something.
    if session.bypass_change_detection().advance(delta) {
        session.set_changed();
    }
}

fn publish_changes(
    mut session: ResMut<Session>,
    mut next_section: ResMut<NextState<Sections>>,
    mut changed: MessageWriter<SectionChanged>,
    mut scrolls: Query<&mut ScrollPosition>,
) {
    // Peek first so an idle frame doesn't flag the resource as changed.
    if session.changes.is_empty() {
        return;
    }
    let changes = session.take_changes();
    let Some(last) = changes.last() else {
        return;
    };
    next_section.set(last.to);
    for mut scroll in &mut scrolls {
        *scroll = ScrollPosition::default();
    }
    changed.write_batch(changes);
}

#[cfg(test)]
impl Session {
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::Direction;
    use strum::IntoEnumIterator;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn session_at(section: Sections) -> Session {
        let mut session = Session::default();
        session.navigate(section);
        session.take_changes();
        session
    }

    #[test]
    fn intro_advances_to_photos_after_three_seconds() {
        let mut session = Session::default();
        assert_eq!(session.pending_timers(), 1);

        session.advance(ms(2999));
        assert_eq!(session.current(), Sections::Intro);

        session.advance(ms(1));
        assert_eq!(session.current(), Sections::Photos);
        assert_eq!(session.nav().direction, Direction::Forward);
        assert_eq!(session.nav().previous, Some(Sections::Intro));
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn untouched_session_walks_through_every_timed_rule() {
        let mut session = Session::default();
        session.advance(ms(3000));
        assert_eq!(session.current(), Sections::Photos);

        session.navigate(Sections::ToFinal);
        session.advance(ms(7999));
        assert_eq!(session.current(), Sections::ToFinal);
        session.advance(ms(1));
        assert_eq!(session.current(), Sections::Final);

        let visited: Vec<_> = session.take_changes().iter().map(|c| c.to).collect();
        assert_eq!(
            visited,
            vec![Sections::Photos, Sections::ToFinal, Sections::Final]
        );
    }

    #[test]
    fn game_waits_for_the_last_reveal() {
        let mut session = session_at(Sections::Game);
        let questions: Vec<_> = Question::iter().collect();
        let (last, rest) = questions.split_last().unwrap();

        for question in rest {
            assert!(session.reveal(*question, 0));
        }
        session.advance(ms(2000));
        assert_eq!(session.current(), Sections::Game);
        assert_eq!(session.pending_timers(), 0);

        assert!(session.reveal(*last, 2));
        session.advance(ms(1999));
        assert_eq!(session.current(), Sections::Game);
        session.advance(ms(1));
        assert_eq!(session.current(), Sections::ToFinal);
        // The transition rule is armed straight away.
        assert_eq!(session.pending_timers(), 1);
    }

    #[test]
    fn repeated_reveal_does_not_restart_the_timer() {
        let mut session = session_at(Sections::Game);
        for question in Question::iter() {
            session.reveal(question, 1);
        }
        session.advance(ms(1500));
        assert!(!session.reveal(Question::Date, 0));
        session.advance(ms(500));
        assert_eq!(session.current(), Sections::ToFinal);
        assert_eq!(session.reveals().get(Question::Date), Some(1));
    }

    #[test]
    fn step_back_flushes_and_disables_auto_advance() {
        let mut session = Session::default();
        session.advance(ms(3000));
        assert_eq!(session.current(), Sections::Photos);

        assert!(session.step_back());
        assert_eq!(session.current(), Sections::Intro);
        assert_eq!(session.nav().direction, Direction::Backward);
        assert!(!session.nav().auto_advance_enabled);
        assert_eq!(session.pending_timers(), 0);

        session.advance(ms(3000));
        assert_eq!(session.current(), Sections::Intro);

        // Stepping forward again does not bring auto-advance back.
        session.navigate(Sections::ToFinal);
        session.advance(ms(10_000));
        assert_eq!(session.current(), Sections::ToFinal);
        assert!(!session.nav().auto_advance_enabled);
    }

    #[test]
    fn step_back_cancels_a_pending_game_transition() {
        let mut session = session_at(Sections::Game);
        for question in Question::iter() {
            session.reveal(question, 0);
        }
        assert_eq!(session.pending_timers(), 1);

        session.step_back();
        session.advance(ms(5000));
        assert_eq!(session.current(), Sections::Question);
    }

    #[test]
    fn steps_are_bounded() {
        let mut session = Session::default();
        assert!(!session.step_back());
        assert_eq!(session.current(), Sections::Intro);
        assert!(session.nav().auto_advance_enabled);

        for _ in 0..10 {
            session.step_forward();
        }
        assert_eq!(session.current(), Sections::Final);
        assert!(!session.step_forward());

        for _ in 0..10 {
            session.step_back();
            assert_eq!(session.pending_timers(), 0);
        }
        assert_eq!(session.current(), Sections::Intro);
    }

    #[test]
    fn step_forward_keeps_timers_but_rearms_for_the_new_section() {
        let mut session = Session::default();
        assert!(session.step_forward());
        assert_eq!(session.current(), Sections::Photos);
        assert!(session.nav().auto_advance_enabled);
        // Intro's rule no longer applies on Photos.
        session.advance(ms(5000));
        assert_eq!(session.current(), Sections::Photos);

        session.step_forward();
        session.step_forward();
        session.step_forward();
        assert_eq!(session.current(), Sections::ToFinal);
        session.advance(ms(8000));
        assert_eq!(session.current(), Sections::Final);
    }

    #[test]
    fn accept_celebrates_then_moves_to_game() {
        let mut session = session_at(Sections::Question);
        assert!(session.register_accept());
        assert_eq!(session.accept(), AcceptPhase::Celebrating);
        assert!(!session.register_accept());

        session.advance(ms(1999));
        assert_eq!(session.accept(), AcceptPhase::Celebrating);

        session.advance(ms(1));
        assert_eq!(session.accept(), AcceptPhase::PhotosExiting);
        assert_eq!(session.current(), Sections::Question);

        session.advance(ms(799));
        assert_eq!(session.current(), Sections::Question);
        session.advance(ms(1));
        assert_eq!(session.current(), Sections::Game);
        assert_eq!(session.nav().direction, Direction::Forward);
        assert_eq!(session.accept(), AcceptPhase::Idle);
    }

    #[test]
    fn accept_sequence_completes_within_one_long_frame() {
        let mut session = session_at(Sections::Question);
        session.register_accept();
        session.advance(ms(5000));
        assert_eq!(session.current(), Sections::Game);
        assert_eq!(session.accept(), AcceptPhase::Idle);
    }

    #[test]
    fn step_back_interrupts_the_accept_sequence() {
        let mut session = session_at(Sections::Question);
        session.register_accept();
        session.advance(ms(2100));
        assert_eq!(session.accept(), AcceptPhase::PhotosExiting);

        session.step_back();
        assert_eq!(session.accept(), AcceptPhase::Idle);
        assert_eq!(session.pending_timers(), 0);

        session.advance(ms(5000));
        assert_eq!(session.current(), Sections::Photos);
    }

    #[test]
    fn declines_pass_through_to_the_button() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let mut session = session_at(Sections::Question);
        let card = Rect::new(300.0, 200.0, 900.0, 500.0);
        let viewport = Vec2::new(1280.0, 720.0);

        for _ in 0..6 {
            session.register_decline(Some(card), viewport, &mut rng);
        }
        assert_eq!(session.decline().click_count, 5);
        assert!(!session.register_decline(None, viewport, &mut rng));
    }

    #[test]
    fn stepping_forward_off_the_card_drops_the_accept_sequence() {
        let mut session = session_at(Sections::Question);
        session.register_accept();
        session.step_forward();
        session.step_forward();
        session.step_forward();
        assert_eq!(session.current(), Sections::Final);
        assert_eq!(session.accept(), AcceptPhase::Idle);

        session.advance(ms(3000));
        assert_eq!(session.current(), Sections::Final);
        assert_eq!(session.accept(), AcceptPhase::Idle);
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn leaving_during_the_exit_phase_also_drops_it() {
        let mut session = session_at(Sections::Question);
        session.register_accept();
        session.advance(ms(2100));
        assert_eq!(session.accept(), AcceptPhase::PhotosExiting);

        session.step_forward();
        assert_eq!(session.current(), Sections::Game);
        assert_eq!(session.accept(), AcceptPhase::Idle);
        session.advance(ms(1000));
        assert_eq!(session.current(), Sections::Game);
        assert_eq!(session.take_changes().len(), 1);
    }

    mod app {
        use super::*;
        use bevy::state::app::StatesPlugin;
        use bevy::time::TimeUpdateStrategy;

        const FRAME: Duration = Duration::from_millis(100);

        fn app() -> App {
            let mut app = App::new();
            app.add_plugins((MinimalPlugins, StatesPlugin))
                .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
                .init_state::<Sections>()
                .add_plugins(SessionPlugin);
            app
        }

        fn run(app: &mut App, frames: usize) {
            for _ in 0..frames {
                app.update();
            }
        }

        fn section(app: &App) -> Sections {
            *app.world().resource::<State<Sections>>().get()
        }

        #[test]
        fn frame_time_drives_the_section_state() {
            let mut app = app();
            run(&mut app, 20);
            assert_eq!(section(&app), Sections::Intro);

            run(&mut app, 20);
            assert_eq!(section(&app), Sections::Photos);
            assert_eq!(app.world().resource::<Session>().current(), Sections::Photos);
        }

        #[test]
        fn manual_steps_reach_the_state() {
            let mut app = app();
            app.update();
            app.world_mut().resource_mut::<Session>().step_forward();
            run(&mut app, 2);
            assert_eq!(section(&app), Sections::Photos);

            app.world_mut().resource_mut::<Session>().step_back();
            run(&mut app, 50);
            assert_eq!(section(&app), Sections::Intro);
        }
    }
}
