// Photos section: a scrapbook of pictures that whisper a caption when clicked.

use std::time::Duration;

use bevy::prelude::*;

use crate::sections::Sections;
use crate::session::Session;
use crate::widgets::{CARD, MUTED, PINK, PINK_BUTTON, heading, section_root, spawn_button};

pub struct PhotosPlugin;

impl Plugin for PhotosPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhotoCaption>()
            .add_systems(OnEnter(Sections::Photos), setup_photos)
            .add_systems(OnExit(Sections::Photos), exit_photos)
            .add_systems(
                Update,
                (photo_clicks, tick_caption, show_caption, continue_button)
                    .chain()
                    .run_if(in_state(Sections::Photos)),
            );
    }
}

const PHOTOS: [&str; 5] = [
    "photos/photo1.jpg",
    "photos/photo2.jpg",
    "photos/photo3.jpg",
    "photos/photo4.jpg",
    "photos/photo5.jpg",
];

/// Photos past the end of this list have no caption.
const CAPTIONS: [&str; 4] = [
    "Every moment with you feels like magic",
    "You make my heart skip a beat",
    "Forever grateful for you, my love",
    "You're my happy place",
];

const NOTE: &str = "Some moments don't ask to be explained. They just sit quietly, \
holding meaning in the simplest way possible.";

const CAPTION_TIME: Duration = Duration::from_secs(3);
const TILE_SIZE: Vec2 = Vec2::new(320.0, 240.0);
/// Degrees each tile is tilted, scrapbook style.
const TILT: [f32; 5] = [-2.0, 1.0, 3.0, -3.0, 2.0];

#[derive(Component)]
struct PhotoTile(usize);

#[derive(Component)]
struct CaptionOverlay(usize);

#[derive(Component)]
struct ContinueButton;

/// Which photo is currently showing its caption.
#[derive(Resource, Default, Debug)]
pub struct PhotoCaption {
    shown: Option<usize>,
    timer: Timer,
}

impl PhotoCaption {
    pub fn shown(&self) -> Option<usize> {
        self.shown
    }

    /// Clicking another photo replaces the caption and restarts the clock.
    pub fn show(&mut self, index: usize) {
        self.shown = Some(index);
        self.timer = Timer::new(CAPTION_TIME, TimerMode::Once);
    }

    pub fn tick(&mut self, delta: Duration) {
        if self.shown.is_some() && self.timer.tick(delta).just_finished() {
            self.shown = None;
        }
    }
}

fn setup_photos(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands
        .spawn(section_root(Sections::Photos))
        .with_children(|parent| {
            parent.spawn(heading("Our Beautiful Moments", 56.0, PINK));

            parent
                .spawn(Node {
                    flex_wrap: FlexWrap::Wrap,
                    justify_content: JustifyContent::Center,
                    column_gap: Val::Px(24.0),
                    row_gap: Val::Px(24.0),
                    max_width: Val::Px(1100.0),
                    ..default()
                })
                .with_children(|collage| {
                    for (index, path) in PHOTOS.iter().enumerate() {
                        spawn_tile(collage, index, asset_server.load(*path));
                        if index == 0 {
                            spawn_note(collage);
                        }
                    }
                });

            spawn_button(parent, "Continue", ContinueButton, PINK_BUTTON, 24.0);
        });
}

fn spawn_tile(parent: &mut ChildSpawnerCommands, index: usize, image: Handle<Image>) {
    parent
        .spawn((
            PhotoTile(index),
            Button,
            ImageNode::new(image),
            Node {
                width: Val::Px(TILE_SIZE.x),
                height: Val::Px(TILE_SIZE.y),
                border: UiRect::all(Val::Px(8.0)),
                align_items: AlignItems::FlexEnd,
                ..default()
            },
            BorderColor::all(CARD),
            UiTransform {
                rotation: Rot2::degrees(TILT[index % TILT.len()]),
                ..default()
            },
        ))
        .with_children(|tile| {
            let Some(caption) = CAPTIONS.get(index) else {
                return;
            };
            tile.spawn((
                CaptionOverlay(index),
                Node {
                    width: Val::Percent(100.0),
                    padding: UiRect::all(Val::Px(12.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
                Visibility::Hidden,
            ))
            .with_children(|overlay| {
                overlay.spawn(heading(caption, 20.0, Color::WHITE));
            });
        });
}

fn spawn_note(parent: &mut ChildSpawnerCommands) {
    parent
        .spawn((
            Node {
                width: Val::Px(300.0),
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(1.0, 0.98, 0.76)),
            UiTransform {
                rotation: Rot2::degrees(2.0),
                ..default()
            },
        ))
        .with_children(|note| {
            note.spawn(heading(NOTE, 20.0, MUTED));
        });
}

fn photo_clicks(
    tiles: Query<(&Interaction, &PhotoTile), Changed<Interaction>>,
    mut caption: ResMut<PhotoCaption>,
) {
    for (interaction, tile) in &tiles {
        if *interaction == Interaction::Pressed {
            caption.show(tile.0);
        }
    }
}

fn tick_caption(time: Res<Time>, mut caption: ResMut<PhotoCaption>) {
    if caption.shown.is_none() {
        return;
    }
    caption.tick(time.delta());
}

fn show_caption(
    caption: Res<PhotoCaption>,
    mut overlays: Query<(&CaptionOverlay, &mut Visibility)>,
) {
    if !caption.is_changed() {
        return;
    }
    for (overlay, mut visibility) in &mut overlays {
        *visibility = if caption.shown() == Some(overlay.0) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

fn continue_button(
    query: Query<&Interaction, (Changed<Interaction>, With<ContinueButton>)>,
    mut session: ResMut<Session>,
) {
    if query.iter().any(|interaction| *interaction == Interaction::Pressed) {
        session.navigate(Sections::Question);
    }
}

fn exit_photos(mut caption: ResMut<PhotoCaption>) {
    *caption = PhotoCaption::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_hides_after_three_seconds() {
        let mut caption = PhotoCaption::default();
        caption.show(1);
        caption.tick(Duration::from_millis(2999));
        assert_eq!(caption.shown(), Some(1));
        caption.tick(Duration::from_millis(1));
        assert_eq!(caption.shown(), None);
    }

    #[test]
    fn new_click_restarts_the_caption() {
        let mut caption = PhotoCaption::default();
        caption.show(0);
        caption.tick(Duration::from_millis(2500));
        caption.show(2);
        caption.tick(Duration::from_millis(2500));
        assert_eq!(caption.shown(), Some(2));
        caption.tick(Duration::from_millis(500));
        assert_eq!(caption.shown(), None);
    }

    #[test]
    fn last_photo_has_no_caption() {
        assert!(CAPTIONS.get(PHOTOS.len() - 1).is_none());
    }
}
