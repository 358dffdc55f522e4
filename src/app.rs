//! Top-level screen state machine
//!
//! Menu → Config → Game → Exit. Every transition comes from an explicit
//! [`InputEvent`]; nothing here is driven by time.

use glam::Vec2;

use crate::platform::{InputEvent, Key};
use crate::settings::{Resolution, Settings};

/// The screen currently in control of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Config,
    Game,
    Exit,
}

/// What activating a menu button (or its shortcut) asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Configure,
    Back,
    SelectResolution(usize),
    Quit,
}

/// What an input event means while a session is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Restart a paused session
    Reset,
    /// End the session and go back to the menu
    Leave,
    /// End the session and the program
    Close,
}

/// A clickable menu rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub min: Vec2,
    pub max: Vec2,
    pub action: MenuAction,
}

impl Button {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

const BUTTON_SIZE: Vec2 = Vec2::new(260.0, 48.0);
const BUTTON_GAP: f32 = 14.0;
/// Menus are laid out on a fixed canvas regardless of capture resolution
pub const MENU_CANVAS: Vec2 = Vec2::new(640.0, 480.0);

/// Application state
#[derive(Debug, Clone)]
pub struct App {
    screen: Screen,
    settings: Settings,
    pointer: Option<Vec2>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            screen: Screen::Menu,
            settings,
            pointer: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolution a session started now would use
    pub fn resolution(&self) -> Resolution {
        self.settings.resolution()
    }

    /// Buttons of the current screen, top to bottom
    pub fn buttons(&self) -> Vec<Button> {
        let entries: Vec<(String, MenuAction)> = match self.screen {
            Screen::Menu => vec![
                ("Start".to_string(), MenuAction::Start),
                ("Configure".to_string(), MenuAction::Configure),
                ("Quit".to_string(), MenuAction::Quit),
            ],
            Screen::Config => Resolution::ALL
                .iter()
                .enumerate()
                .map(|(i, r)| (r.label(), MenuAction::SelectResolution(i)))
                .chain([
                    ("Start".to_string(), MenuAction::Start),
                    ("Back".to_string(), MenuAction::Back),
                ])
                .collect(),
            Screen::Game | Screen::Exit => Vec::new(),
        };

        let total = entries.len() as f32 * (BUTTON_SIZE.y + BUTTON_GAP) - BUTTON_GAP;
        let top = (MENU_CANVAS.y - total) / 2.0;
        let left = (MENU_CANVAS.x - BUTTON_SIZE.x) / 2.0;
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (label, action))| {
                let min = Vec2::new(left, top + i as f32 * (BUTTON_SIZE.y + BUTTON_GAP));
                Button {
                    label,
                    min,
                    max: min + BUTTON_SIZE,
                    action,
                }
            })
            .collect()
    }

    /// Index of the button under the pointer
    pub fn hovered(&self) -> Option<usize> {
        let p = self.pointer?;
        self.buttons().iter().position(|b| b.contains(p))
    }

    /// Feed one input event to a menu screen
    pub fn handle(&mut self, event: &InputEvent) -> Screen {
        match *event {
            InputEvent::Close => self.close(),
            InputEvent::Quit => self.apply(MenuAction::Quit),
            InputEvent::Reset => self.screen,
            InputEvent::PointerMove(p) => {
                self.pointer = Some(p);
                self.screen
            }
            InputEvent::PointerClick(p) => {
                self.pointer = Some(p);
                match self.buttons().into_iter().find(|b| b.contains(p)) {
                    Some(button) => self.apply(button.action),
                    None => self.screen,
                }
            }
            InputEvent::Key(key) => match self.key_action(key) {
                Some(action) => self.apply(action),
                None => self.screen,
            },
        }
    }

    fn key_action(&self, key: Key) -> Option<MenuAction> {
        let selected = self.settings.resolution_index();
        match (self.screen, key) {
            (_, Key::Q) => Some(MenuAction::Quit),
            (Screen::Menu | Screen::Config, Key::Enter) => Some(MenuAction::Start),
            (Screen::Menu, Key::C) => Some(MenuAction::Configure),
            (Screen::Menu, Key::Escape) => Some(MenuAction::Quit),
            (Screen::Config, Key::Escape) => Some(MenuAction::Back),
            (Screen::Config, Key::Up) => Some(MenuAction::SelectResolution(selected.saturating_sub(1))),
            (Screen::Config, Key::Down) => Some(MenuAction::SelectResolution(selected + 1)),
            _ => None,
        }
    }

    /// The transition function
    pub fn apply(&mut self, action: MenuAction) -> Screen {
        let next = match (self.screen, action) {
            (Screen::Exit, _) => Screen::Exit,
            (_, MenuAction::Quit) => Screen::Exit,
            (Screen::Menu | Screen::Config, MenuAction::Start) => Screen::Game,
            (Screen::Menu, MenuAction::Configure) => Screen::Config,
            (Screen::Config, MenuAction::Back) => Screen::Menu,
            (Screen::Config, MenuAction::SelectResolution(i)) => {
                self.settings.select_resolution(i);
                log::info!("resolution set to {}", self.settings.resolution().label());
                Screen::Config
            }
            (screen, action) => {
                log::debug!("ignoring {action:?} on {screen:?}");
                screen
            }
        };
        self.set_screen(next);
        next
    }

    /// Interpret an event while a session runs
    pub fn game_command(&self, event: &InputEvent) -> Option<GameCommand> {
        match event {
            InputEvent::Reset | InputEvent::Key(Key::Space) => Some(GameCommand::Reset),
            InputEvent::Quit | InputEvent::Key(Key::Escape) => Some(GameCommand::Leave),
            InputEvent::Close | InputEvent::Key(Key::Q) => Some(GameCommand::Close),
            _ => None,
        }
    }

    /// The running session ended; hand control back to the menu
    pub fn end_session(&mut self) {
        if self.screen == Screen::Game {
            self.set_screen(Screen::Menu);
        }
    }

    /// Terminate from any screen
    pub fn close(&mut self) -> Screen {
        self.set_screen(Screen::Exit);
        Screen::Exit
    }

    fn set_screen(&mut self, next: Screen) {
        if next != self.screen {
            log::info!("screen {:?} -> {:?}", self.screen, next);
            self.screen = next;
            self.pointer = None;
        }
    }
}
