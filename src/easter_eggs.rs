// Two faint icons that reveal a secret note when clicked often enough.

use std::time::Duration;

use bevy::prelude::*;

use crate::widgets::{PINK, heading};

pub struct EasterEggsPlugin;

impl Plugin for EasterEggsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EasterEggs>()
            .add_systems(Startup, spawn_eggs)
            .add_systems(Update, (egg_clicks, tick_message, show_message).chain());
    }
}

const HEART_CLICKS: u32 = 5;
const SCISSOR_CLICKS: u32 = 3;
const MESSAGE_TIME: Duration = Duration::from_secs(3);
const FAINT: Color = Color::srgba(0.98, 0.66, 0.83, 0.3);

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
enum Egg {
    Heart,
    Scissors,
}

#[derive(Component)]
struct SecretMessage;

/// Click counters and the countdown of the revealed note. Kept apart from the
/// session timers so a manual step back never leaves the note stuck on screen.
#[derive(Resource, Default, Debug)]
pub struct EasterEggs {
    heart_clicks: u32,
    scissor_clicks: u32,
    message: Option<Timer>,
}

impl EasterEggs {
    pub fn message_shown(&self) -> bool {
        self.message.is_some()
    }

    fn click(&mut self, egg: Egg) -> bool {
        let (clicks, needed) = match egg {
            Egg::Heart => (&mut self.heart_clicks, HEART_CLICKS),
            Egg::Scissors => (&mut self.scissor_clicks, SCISSOR_CLICKS),
        };
        *clicks += 1;
        if *clicks < needed {
            return false;
        }
        *clicks = 0;
        self.message = Some(Timer::new(MESSAGE_TIME, TimerMode::Once));
        true
    }

    pub fn tick(&mut self, delta: Duration) {
        if let Some(timer) = self.message.as_mut()
            && timer.tick(delta).just_finished()
        {
            self.message = None;
        }
    }
}

fn spawn_eggs(mut commands: Commands) {
    let corner = |top: Val, left: Val, right: Val, bottom: Val| Node {
        position_type: PositionType::Absolute,
        top,
        left,
        right,
        bottom,
        ..default()
    };

    commands.spawn((
        Egg::Heart,
        Button,
        corner(Val::Px(84.0), Val::Auto, Val::Px(32.0), Val::Auto),
        GlobalZIndex(40),
        children![heading("<3", 24.0, FAINT)],
    ));
    commands.spawn((
        Egg::Scissors,
        Button,
        corner(Val::Auto, Val::Percent(50.0), Val::Auto, Val::Px(16.0)),
        GlobalZIndex(40),
        children![heading("8<", 24.0, FAINT)],
    ));
    commands.spawn((
        SecretMessage,
        Node {
            padding: UiRect::axes(Val::Px(20.0), Val::Px(8.0)),
            ..corner(Val::Px(132.0), Val::Auto, Val::Px(16.0), Val::Auto)
        },
        BackgroundColor(Color::srgb(0.99, 0.91, 0.95)),
        GlobalZIndex(50),
        Visibility::Hidden,
        children![heading("You found a secret!", 24.0, PINK)],
    ));
}

fn egg_clicks(
    query: Query<(&Interaction, &Egg), Changed<Interaction>>,
    mut eggs: ResMut<EasterEggs>,
) {
    for (interaction, egg) in &query {
        if *interaction == Interaction::Pressed && eggs.click(*egg) {
            info!("{egg:?} easter egg found");
        }
    }
}

fn tick_message(time: Res<Time>, mut eggs: ResMut<EasterEggs>) {
    if eggs.message.is_none() {
        return;
    }
    eggs.tick(time.delta());
}

fn show_message(eggs: Res<EasterEggs>, mut message: Query<&mut Visibility, With<SecretMessage>>) {
    if !eggs.is_changed() {
        return;
    }
    let Ok(mut visibility) = message.single_mut() else {
        return;
    };
    *visibility = if eggs.message_shown() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}
