//! In-game HUD - score, notification banner, error line and save/load buttons.

use bevy::prelude::*;

use super::notification::{ErrorBanner, Notification};
use crate::core::{GameSet, GameState, LoadRequested, SaveRequested};
use crate::gameplay::GameSession;

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVER: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);
const ERROR_COLOR: Color = Color::srgb(0.95, 0.3, 0.3);

/// Marker for the score overlay.
#[derive(Component)]
pub struct ScoreText;

/// Marker for the fading notification text.
#[derive(Component)]
pub struct NotificationText;

/// Marker for the inline error text.
#[derive(Component)]
pub struct ErrorText;

/// Save/load buttons.
#[derive(Component, Clone, Copy)]
enum HudButton {
    Save,
    Load,
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(
            Update,
            (hud_button_input, save_load_shortcuts)
                .in_set(GameSet::Input)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            (update_score_text, update_notification_text, update_error_text)
                .in_set(GameSet::Presentation)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Coins: 0"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(10.0),
            ..default()
        },
        ScoreText,
    ));

    // Banner across the top center
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            top: Val::Px(40.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.0)),
                NotificationText,
            ));
        });

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(ERROR_COLOR),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(15.0),
            ..default()
        },
        ErrorText,
    ));

    // Buttons in the top-right corner
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            right: Val::Px(10.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Row,
            ..default()
        })
        .with_children(|parent| {
            spawn_hud_button(parent, "Save Game", HudButton::Save);
            spawn_hud_button(parent, "Load Game", HudButton::Load);
        });
}

/// Helper to spawn a HUD button.
fn spawn_hud_button(parent: &mut ChildBuilder, text: &str, button: HudButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(110.0),
                height: Val::Px(32.0),
                margin: UiRect::left(Val::Px(8.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Handle save/load button interactions.
fn hud_button_input(
    mut interaction_query: Query<
        (&Interaction, &HudButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut save: EventWriter<SaveRequested>,
    mut load: EventWriter<LoadRequested>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                match button {
                    HudButton::Save => {
                        save.send(SaveRequested);
                    }
                    HudButton::Load => {
                        load.send(LoadRequested);
                    }
                }
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVER.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}

/// F5 saves, F9 loads.
fn save_load_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut save: EventWriter<SaveRequested>,
    mut load: EventWriter<LoadRequested>,
) {
    if keyboard.just_pressed(KeyCode::F5) {
        save.send(SaveRequested);
    }
    if keyboard.just_pressed(KeyCode::F9) {
        load.send(LoadRequested);
    }
}

fn update_score_text(session: Res<GameSession>, mut query: Query<&mut Text, With<ScoreText>>) {
    if !session.is_changed() {
        return;
    }
    let Ok(mut text) = query.get_single_mut() else {
        return;
    };
    text.0 = format!("Coins: {}", session.score);
}

fn update_notification_text(
    time: Res<Time>,
    mut notification: ResMut<Notification>,
    mut query: Query<(&mut Text, &mut TextColor), With<NotificationText>>,
) {
    notification.tick(time.delta());

    let Ok((mut text, mut color)) = query.get_single_mut() else {
        return;
    };
    if text.0 != notification.message() {
        text.0 = notification.message().to_string();
    }
    color.0 = Color::srgba(1.0, 1.0, 1.0, notification.opacity());
}

fn update_error_text(banner: Res<ErrorBanner>, mut query: Query<&mut Text, With<ErrorText>>) {
    if !banner.is_changed() {
        return;
    }
    let Ok(mut text) = query.get_single_mut() else {
        return;
    };
    text.0 = banner.0.clone().unwrap_or_default();
}
