use bevy::prelude::*;

use crate::engine::camera::navigation::NavigationResetEvent;
use crate::tools::annotate::placement::DrawBoxRequested;

#[derive(Component)]
pub struct DrawBoxButton;

#[derive(Component)]
pub struct ResetViewButton;

// Spawns the annotation toolbar panel with its two buttons
pub fn spawn_annotator_ui(mut commands: Commands) {
    commands
        .spawn((
            Name::new("AnnotatorPanel"),
            BackgroundColor(Color::srgb(0.10, 0.11, 0.13)),
            Node {
                width: Val::Px(180.0),
                position_type: PositionType::Absolute,
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                padding: UiRect::all(Val::Px(12.0)),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                align_items: AlignItems::Stretch,
                ..default()
            },
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Annotator"),
                TextFont { font_size: 18.0, ..default() },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
            ));

            panel
                .spawn((
                    DrawBoxButton,
                    Button,
                    Name::new("DrawBoxButton"),
                    BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                    BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(36.0),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new("Draw Box (B)"),
                        TextFont { font_size: 16.0, ..default() },
                        TextColor(Color::srgb(1.0, 1.0, 1.0)),
                    ));
                });

            panel
                .spawn((
                    ResetViewButton,
                    Button,
                    Name::new("ResetViewButton"),
                    BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                    BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(36.0),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new("Reset View"),
                        TextFont { font_size: 16.0, ..default() },
                        TextColor(Color::srgb(1.0, 1.0, 1.0)),
                    ));
                });
        });
}

pub fn draw_button_interaction(
    interactions: Query<&Interaction, (Changed<Interaction>, With<DrawBoxButton>)>,
    mut requests: EventWriter<DrawBoxRequested>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            requests.write(DrawBoxRequested);
        }
    }
}

pub fn reset_button_interaction(
    interactions: Query<&Interaction, (Changed<Interaction>, With<ResetViewButton>)>,
    mut resets: EventWriter<NavigationResetEvent>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            resets.write(NavigationResetEvent);
        }
    }
}

pub fn handle_draw_shortcut(
    keys: Res<ButtonInput<KeyCode>>,
    mut requests: EventWriter<DrawBoxRequested>,
) {
    if keys.just_pressed(KeyCode::KeyB) {
        requests.write(DrawBoxRequested);
    }
}
