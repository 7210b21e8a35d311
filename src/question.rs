// Question section: the proposal card, a "Yes" that grows and a "No" that runs away.

use bevy::prelude::*;
use bevy::ui::UiGlobalTransform;
use bevy::window::PrimaryWindow;

use crate::proposal::{AcceptPhase, MAX_DECLINES, PHOTO_EXIT};
use crate::sections::Sections;
use crate::session::Session;
use crate::widgets::{
    ButtonPalette, CARD, PINK, ROSE, SOFT_PINK, heading, section_root, spawn_button,
};

pub struct QuestionPlugin;

impl Plugin for QuestionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Question), setup_question)
            .add_systems(
                Update,
                (
                    accept_clicks,
                    decline_clicks,
                    scale_accept,
                    place_decline,
                    show_feedback,
                    fade_out_card,
                )
                    .chain()
                    .run_if(in_state(Sections::Question)),
            );
    }
}

/// Shown under the card after the n-th decline.
const NO_MESSAGES: [&str; MAX_DECLINES as usize] = [
    "Are you sure?",
    "Please try again...",
    "I know you don't mean that",
    "One more time?",
    "Come on, say yes!",
];

const ACCEPT_PALETTE: ButtonPalette = ButtonPalette::solid(
    Color::srgb(0.2, 0.8, 0.5),
    Color::srgb(0.06, 0.72, 0.5),
    Color::WHITE,
);
const DECLINE_PALETTE: ButtonPalette = ButtonPalette::solid(
    Color::srgb(0.69, 0.69, 0.72),
    Color::srgb(0.6, 0.6, 0.64),
    Color::WHITE,
);

#[derive(Component)]
struct ProposalCard;

#[derive(Component)]
struct AcceptButton;

#[derive(Component)]
struct DeclineControl;

/// Window-sized layer the "No" button moves into once it starts running, so
/// its position is in the same window coordinates as the card it avoids.
#[derive(Component)]
struct DeclineLayer;

#[derive(Component)]
struct Feedback;

#[derive(Component)]
struct FeedbackHeart(u32);

/// The "No" colours at the given opacity.
fn decline_palette(alpha: f32) -> ButtonPalette {
    ButtonPalette {
        normal: DECLINE_PALETTE.normal.with_alpha(alpha),
        hovered: DECLINE_PALETTE.hovered.with_alpha(alpha),
        pressed: DECLINE_PALETTE.pressed.with_alpha(alpha),
        text: DECLINE_PALETTE.text.with_alpha(alpha),
    }
}

fn setup_question(mut commands: Commands) {
    commands.spawn((
        DeclineLayer,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            ..default()
        },
        Pickable::IGNORE,
        GlobalZIndex(30),
        DespawnOnExit(Sections::Question),
    ));

    commands
        .spawn(section_root(Sections::Question))
        .with_children(|parent| {
            parent
                .spawn((
                    ProposalCard,
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(32.0),
                        padding: UiRect::all(Val::Px(48.0)),
                        max_width: Val::Px(720.0),
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BackgroundColor(CARD),
                    BorderColor::all(SOFT_PINK),
                    UiTransform::default(),
                    ZIndex(20),
                ))
                .with_children(|card| {
                    card.spawn(heading("Will You Be My Valentine?", 56.0, PINK));

                    card.spawn(Node {
                        column_gap: Val::Px(24.0),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    })
                    .with_children(|row| {
                        spawn_button(row, "Yes", AcceptButton, ACCEPT_PALETTE, 32.0);
                        spawn_button(row, "No", DeclineControl, DECLINE_PALETTE, 26.0);
                    });

                    card.spawn((Feedback, heading("", 28.0, PINK)));

                    card.spawn(Node {
                        column_gap: Val::Px(8.0),
                        ..default()
                    })
                    .with_children(|row| {
                        for i in 0..MAX_DECLINES - 1 {
                            row.spawn((
                                FeedbackHeart(i),
                                heading("<3", 20.0, ROSE),
                                Visibility::Hidden,
                            ));
                        }
                    });
                });
        });
}

/// The card's on-screen rectangle in logical pixels.
fn card_rect(node: &ComputedNode, transform: &UiGlobalTransform) -> Option<Rect> {
    let scale = node.inverse_scale_factor();
    let rect = Rect::from_center_size(transform.translation * scale, node.size() * scale);
    (!rect.is_empty()).then_some(rect)
}

fn accept_clicks(
    query: Query<&Interaction, (Changed<Interaction>, With<AcceptButton>)>,
    mut session: ResMut<Session>,
) {
    if !query.iter().any(|interaction| *interaction == Interaction::Pressed) {
        return;
    }
    if session.register_accept() {
        info!("proposal accepted");
    }
}

fn decline_clicks(
    query: Query<&Interaction, (Changed<Interaction>, With<DeclineControl>)>,
    card: Query<(&ComputedNode, &UiGlobalTransform), With<ProposalCard>>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<Session>,
) {
    if !query.iter().any(|interaction| *interaction == Interaction::Pressed) {
        return;
    }
    let Ok(window) = window.single() else {
        return;
    };
    let anchor = card
        .single()
        .ok()
        .and_then(|(node, transform)| card_rect(node, transform));
    let viewport = Vec2::new(window.width(), window.height());
    if session.register_decline(anchor, viewport, &mut rand::rng()) {
        debug!("decline {} of {MAX_DECLINES}", session.decline().click_count);
    }
}

fn scale_accept(session: Res<Session>, mut accept: Query<&mut UiTransform, With<AcceptButton>>) {
    let Ok(mut transform) = accept.single_mut() else {
        return;
    };
    transform.set_if_neq(UiTransform {
        scale: Vec2::splat(session.decline().accept_scale()),
        ..default()
    });
}

fn place_decline(
    mut commands: Commands,
    session: Res<Session>,
    layer: Query<Entity, With<DeclineLayer>>,
    mut decline: Query<
        (
            Entity,
            &mut Node,
            &mut UiTransform,
            &mut ButtonPalette,
            &mut BackgroundColor,
            &mut Visibility,
            &ChildOf,
        ),
        (With<DeclineControl>, Without<AcceptButton>),
    >,
) {
    let state = session.decline();
    let Ok((entity, mut node, mut transform, mut palette, mut bg, mut visibility, parent)) =
        decline.single_mut()
    else {
        return;
    };

    if state.exhausted() {
        visibility.set_if_neq(Visibility::Hidden);
        return;
    }

    transform.set_if_neq(UiTransform {
        scale: Vec2::splat(state.decline_scale()),
        ..default()
    });
    let faded = decline_palette(state.decline_alpha());
    if *palette != faded {
        *palette = faded;
        *bg = faded.normal.into();
    }

    if state.click_count == 0 {
        return;
    }

    // Once it starts running the button leaves the card and floats over the window.
    if let Ok(layer) = layer.single()
        && parent.parent() != layer
    {
        commands.entity(entity).insert(ChildOf(layer));
    }
    let left = Val::Px(state.position.x);
    let top = Val::Px(state.position.y);
    if node.position_type != PositionType::Absolute || node.left != left || node.top != top {
        node.position_type = PositionType::Absolute;
        node.left = left;
        node.top = top;
    }
}

fn show_feedback(
    session: Res<Session>,
    mut feedback: Query<&mut Text, With<Feedback>>,
    mut hearts: Query<(&FeedbackHeart, &mut Visibility)>,
) {
    let count = session.decline().click_count;
    let pleading = count > 0 && count < MAX_DECLINES;

    if let Ok(mut text) = feedback.single_mut() {
        let message = if pleading {
            NO_MESSAGES[count as usize - 1]
        } else {
            ""
        };
        if text.as_str() != message {
            **text = message.to_string();
        }
    }

    for (heart, mut visibility) in &mut hearts {
        let shown = pleading && heart.0 < MAX_DECLINES - count;
        visibility.set_if_neq(if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

/// Fade and shrink the card while the accept sequence winds down.
fn fade_out_card(
    session: Res<Session>,
    time: Res<Time>,
    mut progress: Local<f32>,
    mut card: Query<
        (&mut BackgroundColor, &mut UiTransform),
        (With<ProposalCard>, Without<AcceptButton>, Without<DeclineControl>),
    >,
) {
    if session.accept() == AcceptPhase::PhotosExiting {
        *progress = (*progress + time.delta_secs() / PHOTO_EXIT.as_secs_f32()).min(1.0);
    } else {
        *progress = 0.0;
    }

    let Ok((mut bg, mut transform)) = card.single_mut() else {
        return;
    };
    bg.set_if_neq(BackgroundColor(CARD.with_alpha(1.0 - *progress)));
    transform.set_if_neq(UiTransform {
        scale: Vec2::splat(1.0 - 0.05 * *progress),
        ..default()
    });
}
