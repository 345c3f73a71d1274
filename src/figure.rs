use macroquad::color::Color;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FigureType {
    J,
    I,
    O,
    L,
    Z,
    T,
    S,
}

pub const ALL_FIGURE_TYPES: [FigureType; 7] = [
    FigureType::J,
    FigureType::I,
    FigureType::O,
    FigureType::L,
    FigureType::Z,
    FigureType::T,
    FigureType::S,
];

// Cell indices into a 2-wide, 4-tall template:
//
//     |0 1|
//     |2 3|
//     |4 5|
//     |6 7|
//
// The second entry of every row is the rotation pivot.
pub const FIGURE_TEMPLATES: [[i32; 4]; 7] = [
    [1, 3, 5, 4], // J
    [0, 2, 4, 6], // I
    [0, 1, 2, 3], // O
    [0, 2, 4, 5], // L
    [1, 3, 2, 4], // Z
    [0, 2, 4, 3], // T
    [0, 2, 3, 5], // S
];

pub const NES_COLORS: [Color; 7] = [
    Color { r: 0.0,    g: 0.0,    b: 1.0,    a: 1.0 }, // J
    Color { r: 0.0,    g: 1.0,    b: 1.0,    a: 1.0 }, // I
    Color { r: 1.0,    g: 1.0,    b: 0.0,    a: 1.0 }, // O
    Color { r: 1.0,    g: 0.3334, b: 0.0,    a: 1.0 }, // L
    Color { r: 1.0,    g: 0.0,    b: 0.0,    a: 1.0 }, // Z
    Color { r: 0.6667, g: 0.0,    b: 1.0,    a: 1.0 }, // T
    Color { r: 0.0,    g: 1.0,    b: 0.0,    a: 1.0 }, // S
];

const PIVOT: usize = 1;

impl FigureType {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        ALL_FIGURE_TYPES[rng.random_range(0..ALL_FIGURE_TYPES.len())]
    }

    pub fn color(self) -> Color {
        NES_COLORS[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FigureType::J => "J",
            FigureType::I => "I",
            FigureType::O => "O",
            FigureType::L => "L",
            FigureType::Z => "Z",
            FigureType::T => "T",
            FigureType::S => "S",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub x: i32,
    pub y: i32,
}

impl Square {
    pub fn new(x: i32, y: i32) -> Self {
        Square { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Square::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Figure {
    kind: FigureType,
    squares: [Square; 4],
}

impl Figure {
    /// Builds `kind` from its template, shifted right by `offset` columns.
    pub fn generate(kind: FigureType, offset: i32) -> Self {
        let template = FIGURE_TEMPLATES[kind as usize];
        let squares = template.map(|cell| Square::new((cell & 1) + offset, cell / 2));
        Figure { kind, squares }
    }

    pub fn kind(&self) -> FigureType {
        self.kind
    }

    pub fn squares(&self) -> &[Square; 4] {
        &self.squares
    }

    pub fn set_squares(&mut self, squares: [Square; 4]) {
        self.squares = squares;
    }

    pub fn move_left(&mut self) {
        self.shift(-1, 0);
    }

    pub fn move_right(&mut self) {
        self.shift(1, 0);
    }

    pub fn move_down(&mut self) {
        self.shift(0, 1);
    }

    pub fn move_up(&mut self) {
        self.shift(0, -1);
    }

    fn shift(&mut self, dx: i32, dy: i32) {
        for square in self.squares.iter_mut() {
            *square = square.offset(dx, dy);
        }
    }

    /// Squares after a quarter turn to the left; the figure itself is untouched.
    pub fn rotated_left(&self) -> [Square; 4] {
        self.rotated(false)
    }

    pub fn rotated_right(&self) -> [Square; 4] {
        self.rotated(true)
    }

    fn rotated(&self, clockwise: bool) -> [Square; 4] {
        if self.kind == FigureType::O {
            return self.squares;
        }
        let pivot = self.squares[PIVOT];
        self.squares.map(|square| {
            let rel_x = square.x - pivot.x;
            let rel_y = square.y - pivot.y;
            if clockwise {
                Square::new(pivot.x - rel_y, pivot.y + rel_x)
            } else {
                Square::new(pivot.x + rel_y, pivot.y - rel_x)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cells(figure: &Figure) -> Vec<(i32, i32)> {
        let mut cells: Vec<_> = figure.squares().iter().map(|s| (s.x, s.y)).collect();
        cells.sort();
        cells
    }

    #[test]
    fn templates_decode_to_expected_cells() {
        assert_eq!(
            cells(&Figure::generate(FigureType::I, 0)),
            vec![(0, 0), (0, 1), (0, 2), (0, 3)]
        );
        assert_eq!(
            cells(&Figure::generate(FigureType::O, 0)),
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );
        assert_eq!(
            cells(&Figure::generate(FigureType::J, 0)),
            vec![(0, 2), (1, 0), (1, 1), (1, 2)]
        );
        assert_eq!(
            cells(&Figure::generate(FigureType::T, 0)),
            vec![(0, 0), (0, 1), (0, 2), (1, 1)]
        );
        assert_eq!(
            cells(&Figure::generate(FigureType::Z, 0)),
            vec![(0, 1), (0, 2), (1, 0), (1, 1)]
        );
        assert_eq!(
            cells(&Figure::generate(FigureType::S, 0)),
            vec![(0, 0), (0, 1), (1, 1), (1, 2)]
        );
        assert_eq!(
            cells(&Figure::generate(FigureType::L, 0)),
            vec![(0, 0), (0, 1), (0, 2), (1, 2)]
        );
    }

    #[test]
    fn offset_shifts_columns_only() {
        let figure = Figure::generate(FigureType::L, 4);
        assert_eq!(cells(&figure), vec![(4, 0), (4, 1), (4, 2), (5, 2)]);
    }

    #[test]
    fn rotations_are_inverse() {
        for kind in ALL_FIGURE_TYPES {
            let original = Figure::generate(kind, 4);
            let mut figure = original;
            figure.set_squares(figure.rotated_left());
            figure.set_squares(figure.rotated_right());
            assert_eq!(figure, original, "{}", kind.as_str());

            figure.set_squares(figure.rotated_right());
            figure.set_squares(figure.rotated_left());
            assert_eq!(figure, original, "{}", kind.as_str());
        }
    }

    #[test]
    fn four_turns_are_identity() {
        let original = Figure::generate(FigureType::S, 3);
        let mut figure = original;
        for _ in 0..4 {
            figure.set_squares(figure.rotated_right());
        }
        assert_eq!(figure, original);
    }

    #[test]
    fn i_turns_horizontal_around_pivot() {
        let figure = Figure::generate(FigureType::I, 4);
        let pivot = figure.squares()[1];
        let mut rotated = figure.rotated_left().to_vec();
        rotated.sort_by_key(|s| s.x);
        assert!(rotated.iter().all(|s| s.y == pivot.y));
        assert_eq!(rotated.iter().map(|s| s.x).collect::<Vec<_>>(), vec![3, 4, 5, 6]);
    }

    #[test]
    fn o_does_not_rotate() {
        let figure = Figure::generate(FigureType::O, 2);
        assert_eq!(&figure.rotated_left(), figure.squares());
        assert_eq!(&figure.rotated_right(), figure.squares());
    }

    #[test]
    fn moves_shift_every_square() {
        let mut figure = Figure::generate(FigureType::Z, 1);
        figure.move_right();
        figure.move_down();
        figure.move_down();
        figure.move_left();
        figure.move_up();
        assert_eq!(figure, {
            let mut expected = Figure::generate(FigureType::Z, 1);
            expected.set_squares(expected.squares().map(|s| s.offset(0, 1)));
            expected
        });
    }

    #[test]
    fn random_covers_all_kinds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(FigureType::random(&mut rng));
        }
        assert_eq!(seen.len(), ALL_FIGURE_TYPES.len());
    }
}
