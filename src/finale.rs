// The last two sections: a slow, line-by-line pause, then the closing message.

use bevy::prelude::*;

use crate::sections::Sections;
use crate::widgets::{MUTED, PINK, ROSE, heading, section_root, spawn_hearts};

pub struct FinalePlugin;

impl Plugin for FinalePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::ToFinal), setup_pause)
            .add_systems(OnExit(Sections::ToFinal), exit_pause)
            .add_systems(
                Update,
                stagger_lines.run_if(in_state(Sections::ToFinal)),
            )
            .add_systems(OnEnter(Sections::Final), setup_final);
    }
}

/// (line, seconds after entering before it starts to appear)
const PAUSE_LINES: [(&str, f32); 4] = [
    ("This moment doesn't need an audience.", 0.0),
    ("Funny how that works...", 1.5),
    ("Sometimes it's not about knowing what comes next,", 2.5),
    ("it's about understanding what's already here.", 3.5),
];
const HEARTS_DELAY: f32 = 4.5;
const FADE_IN: f32 = 1.0;

#[derive(Resource)]
struct PauseClock(f32);

/// Hidden until `delay` seconds into the section, then fades in.
#[derive(Component)]
struct Stagger {
    delay: f32,
}

/// Opacity of a staggered element `elapsed` seconds into the section.
fn stagger_alpha(delay: f32, elapsed: f32) -> f32 {
    ((elapsed - delay) / FADE_IN).clamp(0.0, 1.0)
}

fn setup_pause(mut commands: Commands) {
    commands.insert_resource(PauseClock(0.0));

    commands
        .spawn(section_root(Sections::ToFinal))
        .with_children(|parent| {
            for (i, (line, delay)) in PAUSE_LINES.iter().enumerate() {
                let (size, color) = if i == 0 { (44.0, PINK) } else { (32.0, MUTED) };
                parent.spawn((
                    heading(line, size, color.with_alpha(0.0)),
                    Stagger { delay: *delay },
                ));
            }

            parent
                .spawn((
                    Node::default(),
                    Stagger {
                        delay: HEARTS_DELAY,
                    },
                    Visibility::Hidden,
                ))
                .with_children(|row| spawn_hearts(row, 3, 36.0, ROSE));
        });
}

fn stagger_lines(
    time: Res<Time>,
    mut clock: ResMut<PauseClock>,
    mut staggered: Query<(&Stagger, &mut Visibility, Option<&mut TextColor>)>,
) {
    clock.0 += time.delta_secs();

    for (stagger, mut visibility, color) in &mut staggered {
        let alpha = stagger_alpha(stagger.delay, clock.0);
        visibility.set_if_neq(if alpha > 0.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
        if let Some(mut color) = color {
            let faded = color.0.with_alpha(alpha);
            color.set_if_neq(TextColor(faded));
        }
    }
}

fn exit_pause(mut commands: Commands) {
    commands.remove_resource::<PauseClock>();
}

fn setup_final(mut commands: Commands) {
    commands
        .spawn(section_root(Sections::Final))
        .with_children(|parent| {
            parent.spawn(heading("<3", 48.0, ROSE));
            parent.spawn(heading(
                "I don't believe in perfect moments, but I do believe in choosing someone, intentionally.",
                28.0,
                MUTED,
            ));
            parent.spawn(heading(
                "I'd really love to spend Valentine's Day with you.",
                44.0,
                PINK,
            ));
            parent.spawn(heading(
                "Thank you for coming this far. That already means everything.",
                24.0,
                MUTED,
            ));
            parent.spawn(heading("every song reminds me of you", 20.0, MUTED));
        });
}
