// Confetti that rains down while the proposal is being celebrated.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::Rng;

use crate::proposal::AcceptPhase;
use crate::session::Session;

pub struct ConfettiPlugin;

impl Plugin for ConfettiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (sync_confetti, fall_confetti).chain());
    }
}

const PIECES: usize = 80;
const PIECE_SIZE: f32 = 8.0;
const COLOURS: [Color; 4] = [
    Color::srgb(1.0, 0.41, 0.71),
    Color::srgb(1.0, 0.75, 0.8),
    Color::srgb(0.75, 0.52, 0.99),
    Color::srgb(0.65, 0.55, 0.98),
];
const MAX_DELAY: f32 = 0.5;
const MIN_FALL: f32 = 2.0;
const MAX_FALL: f32 = 4.0;

#[derive(Component)]
struct ConfettiLayer;

#[derive(Component)]
struct Piece {
    age: f32,
    delay: f32,
    fall_time: f32,
}

/// How far down the screen a piece is, from 0 (above the top) to 1 (gone).
fn fall_progress(age: f32, delay: f32, fall_time: f32) -> f32 {
    ((age - delay) / fall_time).clamp(0.0, 1.0)
}

fn sync_confetti(
    mut commands: Commands,
    session: Res<Session>,
    layer: Query<Entity, With<ConfettiLayer>>,
) {
    if !session.is_changed() {
        return;
    }
    let celebrating = session.accept() == AcceptPhase::Celebrating;

    match (celebrating, layer.single()) {
        (true, Err(_)) => spawn_confetti(&mut commands, &mut rand::rng()),
        (false, Ok(entity)) => commands.entity(entity).despawn(),
        _ => {}
    }
}

fn spawn_confetti(commands: &mut Commands, rng: &mut impl Rng) {
    commands
        .spawn((
            ConfettiLayer,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            Pickable::IGNORE,
            GlobalZIndex(60),
        ))
        .with_children(|layer| {
            for _ in 0..PIECES {
                let colour = COLOURS[rng.random_range(0..COLOURS.len())];
                layer.spawn((
                    Piece {
                        age: 0.0,
                        delay: rng.random_range(0.0..MAX_DELAY),
                        fall_time: rng.random_range(MIN_FALL..MAX_FALL),
                    },
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Percent(rng.random_range(0.0..100.0)),
                        top: Val::Px(-PIECE_SIZE),
                        width: Val::Px(PIECE_SIZE),
                        height: Val::Px(PIECE_SIZE),
                        ..default()
                    },
                    BackgroundColor(colour),
                    Pickable::IGNORE,
                ));
            }
        });
}

fn fall_confetti(
    time: Res<Time>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut pieces: Query<(&mut Piece, &mut Node, &mut Visibility)>,
) {
    if pieces.is_empty() {
        return;
    }
    let Ok(window) = window.single() else {
        return;
    };
    let drop = window.height() + PIECE_SIZE * 2.0;
    let dt = time.delta_secs();

    for (mut piece, mut node, mut visibility) in &mut pieces {
        piece.age += dt;
        let progress = fall_progress(piece.age, piece.delay, piece.fall_time);
        node.top = Val::Px(-PIECE_SIZE + progress * drop);
        if progress >= 1.0 {
            *visibility = Visibility::Hidden;
        }
    }
}
