// Main
mod auto_advance;
mod confetti;
mod easter_eggs;
mod finale;
mod game;
mod hearts;
mod intro;
mod music;
mod nav_buttons;
mod navigation;
mod photos;
mod proposal;
mod question;
mod reveals;
mod sections;
mod session;
mod timers;
mod transition;
mod widgets;

use bevy::prelude::*;
use confetti::ConfettiPlugin;
use easter_eggs::EasterEggsPlugin;
use finale::FinalePlugin;
use game::GamePlugin;
use hearts::HeartsPlugin;
use intro::IntroPlugin;
use music::MusicPlugin;
use nav_buttons::NavButtonsPlugin;
use photos::PhotosPlugin;
use question::QuestionPlugin;
use sections::Sections;
use session::SessionPlugin;
use transition::TransitionPlugin;
use widgets::WidgetsPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Will You Be My Valentine?".into(),
                ..default()
            }),
            ..default()
        }))
        .init_state::<Sections>()
        .add_systems(Startup, spawn_camera)
        .add_plugins((
            SessionPlugin,
            WidgetsPlugin,
            NavButtonsPlugin,
            TransitionPlugin,
            IntroPlugin,
            PhotosPlugin,
            QuestionPlugin,
            GamePlugin,
            FinalePlugin,
            MusicPlugin,
            EasterEggsPlugin,
            ConfettiPlugin,
            HeartsPlugin,
        ))
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
