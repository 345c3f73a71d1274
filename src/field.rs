use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Settings;
use crate::figure::{Figure, FigureType, Square};

/// A locked cell remembers the kind of figure it came from, for coloring.
pub type Cell = Option<FigureType>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Landing {
    pub lines_cleared: u32,
    pub game_over: bool,
}

pub struct Field {
    width: usize,
    height: usize,
    spawn_offset: i32,
    board: Vec<Vec<Cell>>,
    figure: Figure,
    next_kind: FigureType,
    game_over: bool,
    rng: StdRng,
}

impl Field {
    pub fn new(settings: &Settings, mut rng: StdRng) -> Self {
        let spawn_offset = settings.spawn_offset();
        let figure = Figure::generate(FigureType::random(&mut rng), spawn_offset);
        let next_kind = FigureType::random(&mut rng);
        Field {
            width: settings.field_width,
            height: settings.field_height,
            spawn_offset,
            board: vec![vec![None; settings.field_width]; settings.field_height],
            figure,
            next_kind,
            game_over: false,
            rng,
        }
    }

    pub fn with_seed(settings: &Settings, seed: u64) -> Self {
        Self::new(settings, StdRng::seed_from_u64(seed))
    }

    pub fn start_new_game(&mut self) {
        self.board = vec![vec![None; self.width]; self.height];
        self.game_over = false;
        self.figure = Figure::generate(FigureType::random(&mut self.rng), self.spawn_offset);
        self.next_kind = FigureType::random(&mut self.rng);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.board
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.board.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn next_kind(&self) -> FigureType {
        self.next_kind
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Overwrites a single cell. Used to lay out positions in tests and demos.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.board.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    /// Replaces the falling figure with a freshly spawned one of `kind`.
    pub fn set_figure(&mut self, kind: FigureType) {
        self.figure = Figure::generate(kind, self.spawn_offset);
    }

    pub fn set_next_kind(&mut self, kind: FigureType) {
        self.next_kind = kind;
    }

    fn is_free(&self, square: Square) -> bool {
        if square.x < 0 || square.y < 0 {
            return false;
        }
        let (x, y) = (square.x as usize, square.y as usize);
        x < self.width && y < self.height && self.board[y][x].is_none()
    }

    pub fn is_in_empty_space(&self, squares: &[Square]) -> bool {
        squares.iter().all(|&square| self.is_free(square))
    }

    fn can_shift(&self, dx: i32, dy: i32) -> bool {
        self.figure
            .squares()
            .iter()
            .all(|square| self.is_free(square.offset(dx, dy)))
    }

    pub fn move_left(&mut self) -> bool {
        if self.game_over || !self.can_shift(-1, 0) {
            return false;
        }
        self.figure.move_left();
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.game_over || !self.can_shift(1, 0) {
            return false;
        }
        self.figure.move_right();
        true
    }

    /// Moves the figure one row down, or lands it when something is below.
    pub fn move_down(&mut self) -> Option<Landing> {
        if self.game_over {
            return None;
        }
        if self.can_shift(0, 1) {
            self.figure.move_down();
            None
        } else {
            Some(self.handle_figure_landing())
        }
    }

    pub fn rotate_left(&mut self) -> bool {
        let rotated = self.figure.rotated_left();
        self.try_rotation(rotated)
    }

    pub fn rotate_right(&mut self) -> bool {
        let rotated = self.figure.rotated_right();
        self.try_rotation(rotated)
    }

    fn try_rotation(&mut self, rotated: [Square; 4]) -> bool {
        if self.game_over || !self.is_in_empty_space(&rotated) {
            return false;
        }
        self.figure.set_squares(rotated);
        true
    }

    /// Hard drop.
    pub fn fall_down(&mut self) -> Option<Landing> {
        if self.game_over {
            return None;
        }
        while self.can_shift(0, 1) {
            self.figure.move_down();
        }
        Some(self.handle_figure_landing())
    }

    /// Squares the figure would occupy after a hard drop.
    pub fn ghost(&self) -> [Square; 4] {
        let mut ghost = self.figure;
        while self.is_in_empty_space(&ghost.squares().map(|s| s.offset(0, 1))) {
            ghost.move_down();
        }
        *ghost.squares()
    }

    fn handle_figure_landing(&mut self) -> Landing {
        self.save_in_field();
        let lines_cleared = self.clear_full_lines();
        debug!(
            "{} figure landed, {} line(s) cleared",
            self.figure.kind().as_str(),
            lines_cleared
        );
        self.spawn_next_figure();
        Landing {
            lines_cleared,
            game_over: self.game_over,
        }
    }

    fn save_in_field(&mut self) {
        let kind = self.figure.kind();
        let squares = *self.figure.squares();
        for square in squares {
            self.set_cell(square.x as usize, square.y as usize, Some(kind));
        }
    }

    fn clear_full_lines(&mut self) -> u32 {
        let before = self.board.len();
        self.board.retain(|row| row.iter().any(Option::is_none));
        let cleared = before - self.board.len();
        for _ in 0..cleared {
            self.board.insert(0, vec![None; self.width]);
        }
        cleared as u32
    }

    fn spawn_next_figure(&mut self) {
        self.figure = Figure::generate(self.next_kind, self.spawn_offset);
        self.next_kind = FigureType::random(&mut self.rng);
        if !self.is_in_empty_space(self.figure.squares()) {
            info!("spawned {} figure overlaps the stack, game over", self.figure.kind().as_str());
            self.game_over = true;
        }
    }
}
