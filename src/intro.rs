// Intro section: a single line and a row of hearts. The session moves on by itself.

use bevy::prelude::*;

use crate::sections::Sections;
use crate::widgets::{PINK, ROSE, heading, section_root, spawn_hearts};

pub struct IntroPlugin;

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Intro), setup_intro);
    }
}

fn setup_intro(mut commands: Commands) {
    commands
        .spawn(section_root(Sections::Intro))
        .with_children(|parent| {
            parent.spawn(heading("I Love You", 96.0, PINK));
            spawn_hearts(parent, 3, 40.0, ROSE);
        });
}
