use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Settings;
use crate::controls::Command;
use crate::field::{Field, Landing};
use crate::menu::{MainMenu, MainMenuItem, PauseMenu, PauseMenuItem};
use crate::score::{ScoreEvent, Scoreboard};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// One game session: the field, its score, the menus and the gravity timer.
pub struct PlayArea {
    settings: Settings,
    field: Field,
    scoreboard: Scoreboard,
    state: SessionState,
    main_menu: MainMenu,
    pause_menu: PauseMenu,
    fall_timer: f32,
    pause_cooldown: f32,
    quit: bool,
}

impl PlayArea {
    /// The field is built from `settings`, so grid and layout always agree.
    pub fn new(settings: Settings, rng: StdRng) -> Self {
        let field = Field::new(&settings, rng);
        Self {
            settings,
            field,
            scoreboard: Scoreboard::new(),
            state: SessionState::Menu,
            main_menu: MainMenu::main(),
            pause_menu: PauseMenu::pause(),
            fall_timer: 0.0,
            pause_cooldown: 0.0,
            quit: false,
        }
    }

    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::new(settings, StdRng::seed_from_u64(seed))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn main_menu(&self) -> &MainMenu {
        &self.main_menu
    }

    pub fn pause_menu(&self) -> &PauseMenu {
        &self.pause_menu
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn start_game(&mut self) {
        self.scoreboard.reset();
        self.field.start_new_game();
        self.fall_timer = 0.0;
        self.pause_cooldown = 0.0;
        self.state = SessionState::Playing;
        info!(
            "new game on a {}x{} field",
            self.field.width(),
            self.field.height()
        );
    }

    pub fn handle(&mut self, command: Command) {
        match self.state {
            SessionState::Menu => self.handle_main_menu(command),
            SessionState::Playing => self.handle_gameplay(command),
            SessionState::Paused => self.handle_pause_menu(command),
            SessionState::GameOver => {
                if command == Command::Confirm {
                    self.open_main_menu();
                }
            }
        }
    }

    fn handle_main_menu(&mut self, command: Command) {
        match command {
            Command::MenuUp => self.main_menu.prev(),
            Command::MenuDown => self.main_menu.next(),
            Command::Confirm => self.confirm_main_menu(),
            Command::Choose(index) => {
                if self.main_menu.select(index) {
                    self.confirm_main_menu();
                }
            }
            _ => {}
        }
    }

    fn confirm_main_menu(&mut self) {
        match self.main_menu.selected() {
            MainMenuItem::NewGame => self.start_game(),
            MainMenuItem::Quit => {
                info!("quit requested");
                self.quit = true;
            }
        }
    }

    fn handle_pause_menu(&mut self, command: Command) {
        match command {
            Command::TogglePause => self.toggle_pause(),
            Command::MenuUp => self.pause_menu.prev(),
            Command::MenuDown => self.pause_menu.next(),
            Command::Confirm => self.confirm_pause_menu(),
            Command::Choose(index) => {
                if self.pause_menu.select(index) {
                    self.confirm_pause_menu();
                }
            }
            _ => {}
        }
    }

    fn confirm_pause_menu(&mut self) {
        match self.pause_menu.selected() {
            PauseMenuItem::Resume => self.resume(),
            PauseMenuItem::MainMenu => self.open_main_menu(),
        }
    }

    fn handle_gameplay(&mut self, command: Command) {
        match command {
            Command::MoveLeft => {
                self.field.move_left();
            }
            Command::MoveRight => {
                self.field.move_right();
            }
            Command::MoveDown => {
                self.fall_timer = 0.0;
                if let Some(landing) = self.field.move_down() {
                    self.on_landing(landing);
                }
            }
            Command::RotateLeft => {
                self.field.rotate_left();
            }
            Command::RotateRight => {
                self.field.rotate_right();
            }
            Command::Drop => {
                self.fall_timer = 0.0;
                if let Some(landing) = self.field.fall_down() {
                    self.on_landing(landing);
                }
            }
            Command::TogglePause => self.toggle_pause(),
            Command::MenuUp | Command::MenuDown | Command::Confirm | Command::Choose(_) => {}
        }
    }

    /// Escape key handling. Toggles arriving within the debounce window are dropped.
    fn toggle_pause(&mut self) {
        if self.pause_cooldown > 0.0 {
            debug!("pause toggle ignored, {:.3}s cooldown left", self.pause_cooldown);
            return;
        }
        self.pause_cooldown = self.settings.pause_debounce_secs();
        match self.state {
            SessionState::Playing => self.pause(),
            SessionState::Paused => self.resume(),
            _ => {}
        }
    }

    fn pause(&mut self) {
        self.pause_menu.reset();
        self.state = SessionState::Paused;
        info!("game paused");
    }

    fn resume(&mut self) {
        self.state = SessionState::Playing;
        info!("game resumed");
    }

    fn open_main_menu(&mut self) {
        self.main_menu.reset();
        self.state = SessionState::Menu;
        info!(
            "back to main menu, final score {} ({} lines)",
            self.scoreboard.score(),
            self.scoreboard.lines()
        );
    }

    fn on_landing(&mut self, landing: Landing) {
        if landing.lines_cleared > 0 {
            let event = ScoreEvent::new(landing.lines_cleared);
            self.scoreboard.apply(&event);
            debug!(
                "{} line(s) for {} points, score now {}",
                event.lines(),
                event.score(),
                self.scoreboard.score()
            );
        }
        if landing.game_over {
            self.state = SessionState::GameOver;
            info!(
                "game over with score {} ({} lines)",
                self.scoreboard.score(),
                self.scoreboard.lines()
            );
        }
    }

    /// Advances the gravity and debounce timers by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.pause_cooldown = (self.pause_cooldown - dt).max(0.0);
        if self.state != SessionState::Playing {
            return;
        }
        let tick = self.settings.tick_secs();
        self.fall_timer += dt;
        while self.fall_timer >= tick {
            self.fall_timer -= tick;
            if let Some(landing) = self.field.move_down() {
                self.on_landing(landing);
            }
            if self.state != SessionState::Playing {
                self.fall_timer = 0.0;
                break;
            }
        }
    }
}
