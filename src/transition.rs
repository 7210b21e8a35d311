// Slide the freshly spawned section in from the side it is coming from.

use bevy::prelude::*;

use crate::sections::{Direction, SectionChanged};
use crate::widgets::SectionRoot;

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (start_slide, slide_section).chain());
    }
}

const SLIDE_DURATION: f32 = 0.7;
const SLIDE_DISTANCE: f32 = 160.0;

#[derive(Resource)]
struct SlideIn {
    elapsed: f32,
    from: f32,
}

/// Horizontal offset `elapsed` seconds into a slide that starts at `from`.
fn slide_offset(from: f32, elapsed: f32) -> f32 {
    let t = (elapsed / SLIDE_DURATION).clamp(0.0, 1.0);
    // Ease out cubic.
    let eased = 1.0 - (1.0 - t).powi(3);
    from * (1.0 - eased)
}

fn start_slide(mut commands: Commands, mut changes: MessageReader<SectionChanged>) {
    let Some(change) = changes.read().last() else {
        return;
    };
    let from = match change.direction {
        Direction::Forward => SLIDE_DISTANCE,
        Direction::Backward => -SLIDE_DISTANCE,
    };
    commands.insert_resource(SlideIn { elapsed: 0.0, from });
}

fn slide_section(
    mut commands: Commands,
    time: Res<Time>,
    slide: Option<ResMut<SlideIn>>,
    mut roots: Query<&mut Node, With<SectionRoot>>,
) {
    let Some(mut slide) = slide else {
        return;
    };

    slide.elapsed += time.delta_secs();
    let offset = slide_offset(slide.from, slide.elapsed);
    for mut node in &mut roots {
        node.left = Val::Px(offset);
    }

    if slide.elapsed >= SLIDE_DURATION {
        commands.remove_resource::<SlideIn>();
    }
}
