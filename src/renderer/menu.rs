//! Menu and config screen descriptions

use glam::Vec2;
use serde::Serialize;

use crate::app::{App, MENU_CANVAS, MenuAction, Screen};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonView {
    pub label: String,
    pub min: Vec2,
    pub max: Vec2,
    pub hovered: bool,
    /// The resolution currently chosen (config screen only)
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub buttons: Vec<ButtonView>,
}

impl MenuView {
    pub fn capture(app: &App) -> Self {
        let title = match app.screen() {
            Screen::Config => format!("Camera resolution: {}", app.resolution().label()),
            _ => "Palm Rush".to_string(),
        };
        let hovered = app.hovered();
        let selected = app.settings().resolution_index();
        let buttons = app
            .buttons()
            .into_iter()
            .enumerate()
            .map(|(i, b)| ButtonView {
                selected: b.action == MenuAction::SelectResolution(selected),
                hovered: hovered == Some(i),
                label: b.label,
                min: b.min,
                max: b.max,
            })
            .collect();
        Self {
            title,
            width: MENU_CANVAS.x,
            height: MENU_CANVAS.y,
            buttons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::InputEvent;

    #[test]
    fn test_menu_view_marks_hover() {
        let mut app = App::default();
        let start = app.buttons()[0].clone();
        app.handle(&InputEvent::PointerMove(start.min + Vec2::splat(2.0)));
        let view = MenuView::capture(&app);
        assert_eq!(view.buttons.len(), 3);
        assert!(view.buttons[0].hovered);
        assert!(!view.buttons[1].hovered);
    }

    #[test]
    fn test_config_view_marks_selection() {
        let mut app = App::default();
        app.apply(MenuAction::Configure);
        app.apply(MenuAction::SelectResolution(2));
        let view = MenuView::capture(&app);
        let selected: Vec<&str> = view
            .buttons
            .iter()
            .filter(|b| b.selected)
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(selected, vec!["1280x720"]);
        assert_eq!(view.title, "Camera resolution: 1280x720");
    }
}
