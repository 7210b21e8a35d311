// Background song with a play/pause toggle in the top-right corner (or `M`).

use bevy::audio::AudioSinkPlayback;
use bevy::prelude::*;

use crate::widgets::{ROUND_BUTTON, spawn_button};

pub struct MusicPlugin;

impl Plugin for MusicPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Music>()
            .add_systems(Startup, (spawn_music, spawn_music_button))
            .add_systems(
                Update,
                (music_toggle, music_label.run_if(resource_changed::<Music>)).chain(),
            );
    }
}

const SONG_PATH: &str = "audio/lovesong.ogg";

/// Whatever can start and stop the song.
pub trait Playback {
    fn play(&mut self);
    fn pause(&mut self);
}

impl Playback for AudioSink {
    fn play(&mut self) {
        AudioSinkPlayback::play(self);
    }

    fn pause(&mut self) {
        AudioSinkPlayback::pause(self);
    }
}

#[derive(Resource, Default, Debug)]
pub struct Music {
    playing: bool,
}

impl Music {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip between playing and paused. Without a sink (the song hasn't
    /// loaded yet) nothing happens.
    pub fn toggle(&mut self, sink: Option<&mut impl Playback>) -> bool {
        let Some(sink) = sink else {
            return false;
        };
        if self.playing {
            sink.pause();
        } else {
            sink.play();
        }
        self.playing = !self.playing;
        true
    }
}

#[derive(Component)]
struct BackgroundSong;

#[derive(Component)]
struct MusicButton;

fn spawn_music(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        BackgroundSong,
        AudioPlayer::new(asset_server.load(SONG_PATH)),
        PlaybackSettings::LOOP.paused(),
    ));
}

fn spawn_music_button(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                right: Val::Px(24.0),
                ..default()
            },
            GlobalZIndex(50),
        ))
        .with_children(|parent| {
            spawn_button(parent, "Play", MusicButton, ROUND_BUTTON, 20.0);
        });
}

fn music_toggle(
    button: Query<&Interaction, (Changed<Interaction>, With<MusicButton>)>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sink: Query<&mut AudioSink, With<BackgroundSong>>,
    mut music: ResMut<Music>,
) {
    let clicked = button.iter().any(|interaction| *interaction == Interaction::Pressed);
    if !clicked && !keyboard.just_pressed(KeyCode::KeyM) {
        return;
    }
    let sink = sink.single_mut().ok();
    if music.toggle(sink.map(|sink| sink.into_inner())) {
        info!("music {}", if music.is_playing() { "playing" } else { "paused" });
    }
}

fn music_label(
    music: Res<Music>,
    buttons: Query<&Children, With<MusicButton>>,
    mut texts: Query<&mut Text>,
) {
    let label = if music.is_playing() { "Pause" } else { "Play" };
    for children in &buttons {
        for child in children.iter() {
            if let Ok(mut text) = texts.get_mut(child) {
                **text = label.to_string();
            }
        }
    }
}
