//! UI plugin - HUD, notifications and the asset failure screen.

use bevy::prelude::*;

use super::hud;
use super::notification::{ErrorBanner, Notification};
use crate::assets::RequiredAssets;
use crate::core::{GameConfig, GameState, NotifyEvent};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        let notification = Notification::from_config(app.world().resource::<GameConfig>());

        // Setup HUD systems
        hud::setup_hud_systems(app);

        app.insert_resource(notification)
            .init_resource::<ErrorBanner>()
            .add_systems(Update, route_notifications)

            // Asset failure screen
            .add_systems(OnEnter(GameState::LoadFailed), setup_load_failed);
    }
}

/// Send feedback events to the banner or the error line.
fn route_notifications(
    mut events: EventReader<NotifyEvent>,
    mut notification: ResMut<Notification>,
    mut banner: ResMut<ErrorBanner>,
) {
    for event in events.read() {
        match event {
            NotifyEvent::Info(message) => notification.show(message.clone()),
            NotifyEvent::Error(message) => banner.0 = Some(message.clone()),
        }
    }
}

/// Full-screen message listing the images that failed to load.
fn setup_load_failed(mut commands: Commands, required: Res<RequiredAssets>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.0, 0.0, 0.9)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Failed to load game assets"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.2, 0.2)),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            for line in required.bundle.failure_report() {
                parent.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.8, 0.8, 0.85)),
                ));
            }
        });
}
