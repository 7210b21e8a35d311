// Shared UI pieces: palette, section roots, buttons and hover feedback.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::sections::Sections;

pub struct WidgetsPlugin;

impl Plugin for WidgetsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND))
            .add_systems(Update, (button_visuals, pulse, scroll_sections));
    }
}

pub const BACKGROUND: Color = Color::srgb(1.0, 0.95, 0.96);
pub const PINK: Color = Color::srgb(0.93, 0.29, 0.6);
pub const ROSE: Color = Color::srgb(0.96, 0.25, 0.37);
pub const SOFT_PINK: Color = Color::srgb(0.98, 0.81, 0.9);
pub const MUTED: Color = Color::srgb(0.42, 0.42, 0.47);
pub const CARD: Color = Color::srgb(1.0, 1.0, 1.0);

/// Pixels scrolled per wheel line.
const LINE_HEIGHT: f32 = 32.0;

const BORDER: Color = Color::srgba(0.93, 0.29, 0.6, 0.3);

/// Marks the full-window node every section spawns its content under.
#[derive(Component)]
pub struct SectionRoot;

/// Colours a button cycles through as the pointer interacts with it.
#[derive(Component, Clone, Copy, PartialEq)]
pub struct ButtonPalette {
    pub normal: Color,
    pub hovered: Color,
    pub pressed: Color,
    pub text: Color,
}

impl ButtonPalette {
    pub const fn solid(normal: Color, hovered: Color, text: Color) -> Self {
        Self {
            normal,
            hovered,
            pressed: hovered,
            text,
        }
    }
}

/// White buttons floating over the page: navigation, music.
pub const ROUND_BUTTON: ButtonPalette =
    ButtonPalette::solid(Color::WHITE, Color::srgb(1.0, 0.92, 0.95), PINK);
pub const PINK_BUTTON: ButtonPalette =
    ButtonPalette::solid(PINK, ROSE, Color::WHITE);

/// Layout shared by every section root: a centred column filling the window.
pub fn section_node() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        row_gap: Val::Px(24.0),
        padding: UiRect::all(Val::Px(32.0)),
        overflow: Overflow::scroll_y(),
        position_type: PositionType::Absolute,
        ..default()
    }
}

/// Root node for `section`, despawned when the section is left.
pub fn section_root(section: Sections) -> impl Bundle {
    section_root_with(section, section_node())
}

pub fn section_root_with(section: Sections, node: Node) -> impl Bundle {
    (
        SectionRoot,
        node,
        ScrollPosition::default(),
        DespawnOnExit(section),
    )
}

pub fn heading(text: &str, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

/// Gently breathing scale, offset per element so rows ripple.
#[derive(Component)]
pub struct Pulse {
    pub phase: f32,
}

const PULSE_RATE: f32 = 4.0;
const PULSE_DEPTH: f32 = 0.12;

/// A row of `count` pulsing heart glyphs.
pub fn spawn_hearts(parent: &mut ChildSpawnerCommands, count: usize, size: f32, color: Color) {
    parent
        .spawn(Node {
            column_gap: Val::Px(8.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|row| {
            for i in 0..count {
                row.spawn((
                    heading("<3", size, color),
                    Pulse {
                        phase: i as f32 * 0.2,
                    },
                    UiTransform::default(),
                ));
            }
        });
}

fn pulse(time: Res<Time>, mut query: Query<(&Pulse, &mut UiTransform)>) {
    let t = time.elapsed_secs();
    for (pulse, mut transform) in &mut query {
        let wave = ((t - pulse.phase) * PULSE_RATE).sin() * 0.5 + 0.5;
        transform.scale = Vec2::splat(1.0 + wave * PULSE_DEPTH);
    }
}

/// A labelled button carrying `marker`.
pub fn spawn_button<M: Component>(
    parent: &mut ChildSpawnerCommands,
    label: &str,
    marker: M,
    palette: ButtonPalette,
    font_size: f32,
) -> Entity {
    parent
        .spawn((
            marker,
            Button,
            palette,
            Node {
                padding: UiRect::axes(Val::Px(32.0), Val::Px(12.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(BORDER),
            BackgroundColor(palette.normal),
            UiTransform::default(),
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(palette.text),
            ));
        })
        .id()
}

fn button_visuals(
    mut query: Query<
        (&Interaction, &ButtonPalette, &mut BackgroundColor, &mut BorderColor),
        Changed<Interaction>,
    >,
) {
    for (interaction, palette, mut bg, mut border) in &mut query {
        match *interaction {
            Interaction::Pressed => {
                *bg = palette.pressed.into();
                *border = BorderColor::all(PINK);
            }
            Interaction::Hovered => {
                *bg = palette.hovered.into();
                *border = BorderColor::all(PINK);
            }
            Interaction::None => {
                *bg = palette.normal.into();
                *border = BorderColor::all(BORDER);
            }
        }
    }
}

fn scroll_sections(
    mut wheel: MessageReader<MouseWheel>,
    mut roots: Query<&mut ScrollPosition, With<SectionRoot>>,
) {
    let dy: f32 = wheel
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y * LINE_HEIGHT,
            MouseScrollUnit::Pixel => event.y,
        })
        .sum();
    if dy == 0.0 {
        return;
    }
    for mut scroll in &mut roots {
        // Layout clamps the offset to the content height.
        scroll.y = (scroll.y - dy).max(0.0);
    }
}
