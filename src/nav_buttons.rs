// Back/forward controls in the top-left corner, mirrored on the arrow keys.

use bevy::prelude::*;

use crate::navigation::NavigationState;
use crate::sections::Sections;
use crate::session::Session;
use crate::widgets::{ROUND_BUTTON, spawn_button};

pub struct NavButtonsPlugin;

impl Plugin for NavButtonsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_nav_buttons).add_systems(
            Update,
            (
                nav_button_actions,
                nav_keys,
                nav_button_visibility.run_if(state_changed::<Sections>),
            ),
        );
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
enum NavButton {
    Back,
    Forward,
}

impl NavButton {
    /// Intro advances on its own, so neither button shows there.
    fn shown_on(self, nav: &NavigationState) -> bool {
        if nav.current == Sections::Intro {
            return false;
        }
        match self {
            NavButton::Back => nav.can_step_back(),
            NavButton::Forward => nav.can_step_forward(),
        }
    }

    fn press(self, session: &mut Session) {
        if !self.shown_on(session.nav()) {
            return;
        }
        match self {
            NavButton::Back => session.step_back(),
            NavButton::Forward => session.step_forward(),
        };
    }
}

fn spawn_nav_buttons(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                left: Val::Px(24.0),
                column_gap: Val::Px(12.0),
                ..default()
            },
            GlobalZIndex(40),
        ))
        .with_children(|parent| {
            spawn_button(parent, "<", NavButton::Back, ROUND_BUTTON, 22.0);
            spawn_button(parent, ">", NavButton::Forward, ROUND_BUTTON, 22.0);
        });
}

fn nav_button_visibility(session: Res<Session>, mut buttons: Query<(&NavButton, &mut Visibility)>) {
    for (button, mut visibility) in &mut buttons {
        *visibility = if button.shown_on(session.nav()) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

fn nav_button_actions(
    query: Query<(&Interaction, &NavButton), Changed<Interaction>>,
    mut session: ResMut<Session>,
) {
    for (interaction, button) in &query {
        if *interaction == Interaction::Pressed {
            button.press(&mut session);
        }
    }
}

fn nav_keys(keyboard: Res<ButtonInput<KeyCode>>, mut session: ResMut<Session>) {
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        NavButton::Back.press(&mut session);
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        NavButton::Forward.press(&mut session);
    }
}
