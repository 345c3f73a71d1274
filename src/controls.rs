use std::collections::HashMap;

use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};
use macroquad::math::{vec2, Vec2};

use crate::menu::{MAIN_MENU_ITEMS, PAUSE_MENU_ITEMS};
use crate::play_area::SessionState;
use crate::render::{menu_row_at, Layout};

const INITIAL_REPEAT_DELAY: f32 = 0.2;
const REPEAT_DELAY: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveDown,
    RotateLeft,
    RotateRight,
    Drop,
    TogglePause,
    MenuUp,
    MenuDown,
    Confirm,
    /// Picks and confirms a menu row, e.g. from a mouse click.
    Choose(usize),
}

impl Command {
    /// Held keys keep firing these after a short delay.
    pub fn repeats(self) -> bool {
        matches!(self, Command::MoveLeft | Command::MoveRight | Command::MoveDown)
    }
}

const GAMEPLAY_BINDINGS: [(KeyCode, Command); 13] = [
    (KeyCode::A, Command::MoveLeft),
    (KeyCode::Left, Command::MoveLeft),
    (KeyCode::D, Command::MoveRight),
    (KeyCode::Right, Command::MoveRight),
    (KeyCode::S, Command::MoveDown),
    (KeyCode::Down, Command::MoveDown),
    (KeyCode::E, Command::RotateLeft),
    (KeyCode::Z, Command::RotateLeft),
    (KeyCode::R, Command::RotateRight),
    (KeyCode::X, Command::RotateRight),
    (KeyCode::Up, Command::RotateRight),
    (KeyCode::Space, Command::Drop),
    (KeyCode::Escape, Command::TogglePause),
];

const MENU_BINDINGS: [(KeyCode, Command); 6] = [
    (KeyCode::Up, Command::MenuUp),
    (KeyCode::W, Command::MenuUp),
    (KeyCode::Down, Command::MenuDown),
    (KeyCode::S, Command::MenuDown),
    (KeyCode::Enter, Command::Confirm),
    (KeyCode::Space, Command::Confirm),
];

const PAUSE_BINDINGS: [(KeyCode, Command); 7] = [
    (KeyCode::Escape, Command::TogglePause),
    (KeyCode::Up, Command::MenuUp),
    (KeyCode::W, Command::MenuUp),
    (KeyCode::Down, Command::MenuDown),
    (KeyCode::S, Command::MenuDown),
    (KeyCode::Enter, Command::Confirm),
    (KeyCode::Space, Command::Confirm),
];

// Space is left out so a hard drop that ends the game does not skip the banner.
const GAME_OVER_BINDINGS: [(KeyCode, Command); 1] = [(KeyCode::Enter, Command::Confirm)];

pub fn bindings(state: SessionState) -> &'static [(KeyCode, Command)] {
    match state {
        SessionState::Menu => &MENU_BINDINGS,
        SessionState::Playing => &GAMEPLAY_BINDINGS,
        SessionState::Paused => &PAUSE_BINDINGS,
        SessionState::GameOver => &GAME_OVER_BINDINGS,
    }
}

pub fn command_for_key(state: SessionState, key: KeyCode) -> Option<Command> {
    bindings(state)
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|&(_, command)| command)
}

/// Advances a held-key timer. Returns true when the key should fire this frame.
///
/// The timer is only armed by a press; a key that was already down when it
/// got bound (e.g. held through a menu) stays silent until released.
pub fn step_repeat(timer: &mut Option<f32>, pressed: bool, down: bool, dt: f32) -> bool {
    if pressed {
        *timer = Some(INITIAL_REPEAT_DELAY);
        return true;
    }
    if !down {
        *timer = None;
        return false;
    }
    match timer {
        Some(left) => {
            *left -= dt;
            if *left <= 0.0 {
                *left = REPEAT_DELAY;
                true
            } else {
                false
            }
        }
        None => false,
    }
}

/// Maps a left click to a command: the pause button, or a menu row.
pub fn click_command(state: SessionState, layout: &Layout, menu_top: f32, point: Vec2) -> Option<Command> {
    if matches!(state, SessionState::Playing | SessionState::Paused)
        && layout.pause_button().contains(point)
    {
        return Some(Command::TogglePause);
    }
    let rows = match state {
        SessionState::Menu => MAIN_MENU_ITEMS.len(),
        SessionState::Paused => PAUSE_MENU_ITEMS.len(),
        SessionState::Playing | SessionState::GameOver => return None,
    };
    menu_row_at(rows, menu_top, point.y).map(Command::Choose)
}

#[derive(Default)]
pub struct Controls {
    repeat_timers: HashMap<KeyCode, Option<f32>>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads keyboard and mouse for this frame and returns the commands they produced.
    pub fn poll(&mut self, state: SessionState, layout: &Layout, menu_top: f32, dt: f32) -> Vec<Command> {
        let mut commands = Vec::new();
        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            commands.extend(click_command(state, layout, menu_top, vec2(x, y)));
        }
        for &(key, command) in bindings(state) {
            let fire = if state == SessionState::Playing && command.repeats() {
                let timer = self.repeat_timers.entry(key).or_insert(None);
                step_repeat(timer, is_key_pressed(key), is_key_down(key), dt)
            } else {
                is_key_pressed(key)
            };
            if fire {
                commands.push(command);
            }
        }
        if state != SessionState::Playing {
            self.repeat_timers.clear();
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gameplay_keys() {
        let state = SessionState::Playing;
        assert_eq!(command_for_key(state, KeyCode::A), Some(Command::MoveLeft));
        assert_eq!(command_for_key(state, KeyCode::S), Some(Command::MoveDown));
        assert_eq!(command_for_key(state, KeyCode::D), Some(Command::MoveRight));
        assert_eq!(command_for_key(state, KeyCode::E), Some(Command::RotateLeft));
        assert_eq!(command_for_key(state, KeyCode::R), Some(Command::RotateRight));
        assert_eq!(command_for_key(state, KeyCode::Space), Some(Command::Drop));
        assert_eq!(command_for_key(state, KeyCode::Escape), Some(Command::TogglePause));
        assert_eq!(command_for_key(state, KeyCode::Enter), None);
    }

    #[test]
    fn keys_depend_on_the_session_state() {
        assert_eq!(command_for_key(SessionState::Menu, KeyCode::S), Some(Command::MenuDown));
        assert_eq!(command_for_key(SessionState::Menu, KeyCode::Escape), None);
        assert_eq!(command_for_key(SessionState::Paused, KeyCode::Escape), Some(Command::TogglePause));
        assert_eq!(command_for_key(SessionState::GameOver, KeyCode::A), None);
        assert_eq!(command_for_key(SessionState::GameOver, KeyCode::Space), None);
        assert_eq!(command_for_key(SessionState::GameOver, KeyCode::Enter), Some(Command::Confirm));
    }

    #[test]
    fn held_key_repeats_after_the_initial_delay() {
        let mut timer = None;
        assert!(step_repeat(&mut timer, true, true, 0.016));
        assert!(!step_repeat(&mut timer, false, true, 0.15));
        assert!(step_repeat(&mut timer, false, true, 0.06));
        assert!(!step_repeat(&mut timer, false, true, 0.05));
        assert!(step_repeat(&mut timer, false, true, 0.06));
        assert!(!step_repeat(&mut timer, false, false, 0.5));
        assert_eq!(timer, None);
    }

    #[test]
    fn key_held_without_a_press_never_fires() {
        let mut timer = None;
        for _ in 0..60 {
            assert!(!step_repeat(&mut timer, false, true, 0.016));
        }
        assert_eq!(timer, None);

        // Release and press again: the normal cycle starts.
        assert!(!step_repeat(&mut timer, false, false, 0.016));
        assert!(step_repeat(&mut timer, true, true, 0.016));
        assert!(!step_repeat(&mut timer, false, true, 0.1));
    }

    #[test]
    fn clicks_hit_the_pause_button_and_menu_rows() {
        let layout = Layout::new(&crate::config::Settings::default());
        let button = layout.pause_button();
        let inside = vec2(button.x + 1.0, button.y + 1.0);
        let menu_top = 300.0;

        assert_eq!(click_command(SessionState::Playing, &layout, menu_top, inside), Some(Command::TogglePause));
        assert_eq!(click_command(SessionState::Paused, &layout, menu_top, inside), Some(Command::TogglePause));
        assert_eq!(click_command(SessionState::Menu, &layout, menu_top, inside), None);

        let second_row = vec2(150.0, menu_top + 40.0 - 5.0);
        assert_eq!(click_command(SessionState::Menu, &layout, menu_top, second_row), Some(Command::Choose(1)));
        assert_eq!(click_command(SessionState::Paused, &layout, menu_top, second_row), Some(Command::Choose(1)));
        assert_eq!(click_command(SessionState::Playing, &layout, menu_top, second_row), None);
        assert_eq!(click_command(SessionState::Menu, &layout, menu_top, vec2(150.0, menu_top + 200.0)), None);
    }
}
