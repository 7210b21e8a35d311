// Game section: six questions, each hiding three answers. The first card turned
// over for a question is the one that stays.

use bevy::prelude::*;
use strum::{EnumCount, IntoEnumIterator};

use crate::reveals::{OPTIONS_PER_QUESTION, Question};
use crate::sections::Sections;
use crate::session::Session;
use crate::widgets::{
    ButtonPalette, MUTED, PINK, SOFT_PINK, heading, section_node, section_root_with,
};

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Game), setup_game).add_systems(
            Update,
            (reveal_clicks, render_options)
                .chain()
                .run_if(in_state(Sections::Game)),
        );
    }
}

struct Prompt {
    text: &'static str,
    /// (label before the reveal, answer underneath)
    options: [(&'static str, &'static str); OPTIONS_PER_QUESTION],
}

/// In the same order as [`Question`].
const PROMPTS: [Prompt; 6] = [
    Prompt {
        text: "If we looked back one day, what would we smile about first?",
        options: [
            ("The big plans we made", "The random moments that weren't planned at all"),
            ("The places we went", "How easy everything felt when it was just us"),
            ("The milestones", "The laughter that caught us off guard"),
        ],
    },
    Prompt {
        text: "What would love quietly look like between us?",
        options: [
            ("Grand gestures", "Checking in without being asked"),
            ("Perfect days", "Comfort, even on ordinary ones"),
            ("Big moments", "Feeling understood without explaining"),
        ],
    },
    Prompt {
        text: "When things don't go as planned, what would matter most?",
        options: [
            ("Finding quick answers", "Knowing we're on the same side"),
            ("Fixing everything immediately", "Listening before reacting"),
            ("Taking space", "Choosing patience over pride"),
        ],
    },
    Prompt {
        text: "What kind of memories would stay with us the longest?",
        options: [
            ("The photos we took", "Moments that didn't need a camera"),
            ("Special occasions", "Conversations that lasted a little too late"),
            ("Perfect days", "Being ourselves without trying"),
        ],
    },
    Prompt {
        text: "If what we have had a feeling, what would it be?",
        options: [
            ("Exciting", "Calm, steady, and reassuring"),
            ("Intense", "Familiar in the best way"),
            ("Unpredictable", "Something that feels like home"),
        ],
    },
    Prompt {
        text: "Without overthinking it, what would we choose?",
        options: [
            ("The easy path", "Showing up, even when it's hard"),
            ("What feels safe", "Growing together, intentionally"),
            ("What makes sense", "Each other, again and again"),
        ],
    },
];

const HIDDEN: ButtonPalette =
    ButtonPalette::solid(Color::WHITE, Color::srgb(1.0, 0.95, 0.97), MUTED);
const CHOSEN_BG: Color = SOFT_PINK;
const CHOSEN_TEXT: Color = Color::srgb(0.75, 0.09, 0.36);
const OTHER_BG: Color = Color::srgba(0.95, 0.95, 0.96, 0.4);
const OTHER_TEXT: Color = Color::srgba(0.35, 0.24, 0.17, 0.4);

#[derive(Component, Clone, Copy)]
struct RevealOption {
    question: Question,
    index: usize,
}

#[derive(Component, Clone, Copy)]
struct OptionLabel {
    question: Question,
    index: usize,
}

/// How an answer card reads, given what has been revealed for its question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardFace {
    Hidden,
    Chosen,
    Other,
}

fn card_face(revealed: Option<usize>, index: usize) -> CardFace {
    match revealed {
        None => CardFace::Hidden,
        Some(chosen) if chosen == index => CardFace::Chosen,
        Some(_) => CardFace::Other,
    }
}

fn setup_game(mut commands: Commands) {
    let node = Node {
        justify_content: JustifyContent::FlexStart,
        row_gap: Val::Px(40.0),
        ..section_node()
    };
    commands
        .spawn(section_root_with(Sections::Game, node))
        .with_children(|parent| {
            parent.spawn(heading("Just for fun, but maybe not", 52.0, PINK));
            parent.spawn(heading(
                "They say curiosity reveals more than answers",
                22.0,
                MUTED,
            ));

            for (question, prompt) in Question::iter().zip(PROMPTS.iter()) {
                parent.spawn(heading(prompt.text, 30.0, PINK));
                parent
                    .spawn(Node {
                        column_gap: Val::Px(16.0),
                        flex_wrap: FlexWrap::Wrap,
                        justify_content: JustifyContent::Center,
                        ..default()
                    })
                    .with_children(|row| {
                        for (index, (fake, _)) in prompt.options.iter().enumerate() {
                            spawn_option(row, question, index, fake);
                        }
                    });
            }
        });
}

fn spawn_option(parent: &mut ChildSpawnerCommands, question: Question, index: usize, label: &str) {
    parent
        .spawn((
            RevealOption { question, index },
            Button,
            HIDDEN,
            Node {
                width: Val::Px(280.0),
                height: Val::Px(128.0),
                padding: UiRect::all(Val::Px(16.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(SOFT_PINK),
            BackgroundColor(HIDDEN.normal),
        ))
        .with_children(|card| {
            card.spawn((OptionLabel { question, index }, heading(label, 20.0, MUTED)));
        });
}

fn reveal_clicks(
    query: Query<(&Interaction, &RevealOption), Changed<Interaction>>,
    mut session: ResMut<Session>,
) {
    for (interaction, option) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if session.reveal(option.question, option.index) {
            debug!(
                "revealed {:?} option {} ({}/{})",
                option.question,
                option.index,
                session.reveals().revealed_count(),
                Question::COUNT
            );
        }
    }
}

fn render_options(
    session: Res<Session>,
    mut cards: Query<(&RevealOption, &mut ButtonPalette, &mut BackgroundColor)>,
    mut labels: Query<(&OptionLabel, &mut Text, &mut TextColor)>,
) {
    if !session.is_changed() {
        return;
    }
    let reveals = session.reveals();

    for (option, mut palette, mut bg) in &mut cards {
        let next = match card_face(reveals.get(option.question), option.index) {
            CardFace::Hidden => HIDDEN,
            CardFace::Chosen => ButtonPalette::solid(CHOSEN_BG, CHOSEN_BG, CHOSEN_TEXT),
            CardFace::Other => ButtonPalette::solid(OTHER_BG, OTHER_BG, OTHER_TEXT),
        };
        if *palette != next {
            *palette = next;
            *bg = next.normal.into();
        }
    }

    for (label, mut text, mut color) in &mut labels {
        let (fake, real) = PROMPTS[label.question as usize].options[label.index];
        let face = card_face(reveals.get(label.question), label.index);
        let (wanted, tint) = match face {
            CardFace::Hidden => (fake, MUTED),
            CardFace::Chosen => (real, CHOSEN_TEXT),
            CardFace::Other => (real, OTHER_TEXT),
        };
        if text.as_str() != wanted {
            **text = wanted.to_string();
        }
        color.set_if_neq(TextColor(tint));
    }
}
