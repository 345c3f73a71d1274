/// Points awarded for clearing 0..=4 lines with a single landing.
pub const LINE_POINTS: [u32; 5] = [0, 100, 300, 700, 1500];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreEvent {
    lines: u32,
}

impl ScoreEvent {
    pub fn new(lines: u32) -> Self {
        ScoreEvent { lines }
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn score(&self) -> u32 {
        let idx = (self.lines as usize).min(LINE_POINTS.len() - 1);
        LINE_POINTS[idx]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    lines: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &ScoreEvent) {
        self.score = self.score.saturating_add(event.score());
        self.lines = self.lines.saturating_add(event.lines());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_per_line_count() {
        let scores: Vec<u32> = (1..=4).map(|n| ScoreEvent::new(n).score()).collect();
        assert_eq!(scores, vec![100, 300, 700, 1500]);
        assert_eq!(ScoreEvent::new(9).score(), 1500);
    }

    #[test]
    fn scoreboard_accumulates_and_resets() {
        let mut board = Scoreboard::new();
        board.apply(&ScoreEvent::new(1));
        board.apply(&ScoreEvent::new(4));
        assert_eq!(board.score(), 1600);
        assert_eq!(board.lines(), 5);

        board.reset();
        assert_eq!(board, Scoreboard::default());
    }
}
