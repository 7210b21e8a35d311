// Faint hearts drifting behind every section.
use bevy::prelude::*;
use fast_poisson::Poisson2D;
use rand::Rng;

use crate::widgets::SOFT_PINK;

pub struct HeartsPlugin;

impl Plugin for HeartsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_floating_hearts)
            .add_systems(Update, bob_hearts);
    }
}

const HEART_COUNT: usize = 6;
/// Hearts stay inside the central part of the window, this far from each edge.
const MARGIN: f32 = 0.2;
const SPACING: f32 = 0.18;
const BOB_HEIGHT: f32 = 20.0;
const MIN_PERIOD: f32 = 8.0;
const MAX_PERIOD: f32 = 20.0;

#[derive(Component)]
struct FloatingHeart {
    period: f32,
    phase: f32,
}

/// Blue-noise spread positions, as window fractions.
fn heart_points(seed: u64) -> Vec<Vec2> {
    let span = 1.0 - MARGIN * 2.0;
    Poisson2D::new()
        .with_dimensions([span, span], SPACING)
        .with_seed(seed)
        .generate()
        .into_iter()
        .take(HEART_COUNT)
        .map(|[x, y]| Vec2::new(x + MARGIN, y + MARGIN))
        .collect()
}

fn bob_offset(period: f32, phase: f32, t: f32) -> f32 {
    (std::f32::consts::TAU * (t / period + phase)).sin() * BOB_HEIGHT
}

fn spawn_floating_hearts(mut commands: Commands) {
    let mut rng = rand::rng();
    let points = heart_points(rng.random());
    debug!("{} floating hearts", points.len());

    for point in points {
        commands.spawn((
            FloatingHeart {
                period: rng.random_range(MIN_PERIOD..MAX_PERIOD),
                phase: rng.random(),
            },
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(point.x * 100.0),
                top: Val::Percent(point.y * 100.0),
                ..default()
            },
            Text::new("<3"),
            TextFont {
                font_size: rng.random_range(24.0..48.0),
                ..default()
            },
            TextColor(SOFT_PINK.with_alpha(0.5)),
            Pickable::IGNORE,
            GlobalZIndex(-1),
        ));
    }
}

fn bob_hearts(time: Res<Time>, mut hearts: Query<(&FloatingHeart, &mut Node)>) {
    let t = time.elapsed_secs();
    for (heart, mut node) in &mut hearts {
        node.margin.top = Val::Px(bob_offset(heart.period, heart.phase, t));
    }
}
