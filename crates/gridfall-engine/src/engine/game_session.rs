use serde::{Deserialize, Serialize};

use crate::core::{
    block::Direction,
    piece::{Piece, PieceKind},
};

use super::{
    grid::{Grid, Settlement},
    piece_generator::{PieceGenerator, PieceSeed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, Deserialize, Serialize)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// What a gravity step or hard drop did.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickEvent {
    /// The piece moved down one row.
    Fell,
    /// The piece settled and the next one spawned.
    Landed(Settlement),
    /// The piece settled and ended the game.
    GameOver(Settlement),
    /// The session is already over; nothing happened.
    Idle,
}

/// Counters kept across the landings of one session.
///
/// # Example
///
/// ```
/// use gridfall_engine::{SessionStats, Settlement};
///
/// let mut stats = SessionStats::new();
/// stats.record(&Settlement { cleared_rows: vec![16, 17], points: 60, is_game_over: false });
///
/// assert_eq!(stats.settled_pieces(), 1);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionStats {
    settled_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl SessionStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            settled_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn settled_pieces(&self) -> usize {
        self.settled_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of landings by number of rows cleared.
    ///
    /// Index 0 counts landings that cleared nothing; index 4 counts four-row
    /// clears. Larger clears, only possible on hand-built grids, are counted
    /// at index 4.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    pub fn record(&mut self, settlement: &Settlement) {
        let lines = settlement.cleared_lines();
        self.settled_pieces += 1;
        self.total_cleared_lines += lines;
        self.line_cleared_counter[lines.min(4)] += 1;
    }
}

/// One game from first spawn to game over.
///
/// Wraps a [`Grid`] with the bookkeeping a presentation loop needs: the live
/// piece, the generator for the next kinds, statistics and the best score.
/// The best score is handed in as a plain number and read back with
/// [`Self::best_score`]; persisting it is the caller's job. A restart is a
/// new session.
///
/// # Example
///
/// ```
/// use gridfall_engine::{Direction, GameSession, Grid, PieceSeed};
///
/// let mut session = GameSession::with_seed(Grid::new(18, 10), PieceSeed::from_u128(1), 0);
///
/// session.try_move(Direction::Left);
/// while session.state().is_playing() {
///     session.hard_drop();
/// }
/// assert!(session.best_score() >= session.score());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    current: Piece,
    generator: PieceGenerator,
    state: SessionState,
    stats: SessionStats,
    best_score: usize,
}

impl GameSession {
    /// Starts a session on `grid`, spawning the first piece from `generator`.
    #[must_use]
    pub fn new(mut grid: Grid, mut generator: PieceGenerator, best_score: usize) -> Self {
        let current = grid.put_piece(generator.pop_next());
        Self {
            grid,
            current,
            generator,
            state: SessionState::Playing,
            stats: SessionStats::new(),
            best_score,
        }
    }

    /// Like [`Self::new`], with a generator built from `seed`.
    #[must_use]
    pub fn with_seed(grid: Grid, seed: PieceSeed, best_score: usize) -> Self {
        Self::new(grid, PieceGenerator::with_seed(seed), best_score)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.generator.peek_next()
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.grid.score()
    }

    /// Returns the larger of the best score given at construction and this
    /// session's score.
    #[must_use]
    pub fn best_score(&self) -> usize {
        self.best_score
    }

    /// Moves or rotates the live piece one step.
    ///
    /// Returns whether the move was accepted; always `false` once the game is over.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        self.grid.move_piece(&mut self.current, direction, 1)
    }

    /// Applies one gravity step, settling the piece if it cannot fall.
    pub fn tick(&mut self) -> TickEvent {
        if self.state.is_game_over() {
            return TickEvent::Idle;
        }
        if self.grid.move_piece(&mut self.current, Direction::Down, 1) {
            return TickEvent::Fell;
        }
        self.land()
    }

    /// Drops the live piece as far as it goes and settles it.
    pub fn hard_drop(&mut self) -> TickEvent {
        if self.state.is_game_over() {
            return TickEvent::Idle;
        }
        while self.grid.move_piece(&mut self.current, Direction::Down, 1) {}
        self.land()
    }

    fn land(&mut self) -> TickEvent {
        let settlement = self.grid.settle();
        self.stats.record(&settlement);
        self.best_score = self.best_score.max(self.grid.score());

        if settlement.is_game_over {
            self.state = SessionState::GameOver;
            return TickEvent::GameOver(settlement);
        }

        self.current = self.grid.put_piece(self.generator.pop_next());
        TickEvent::Landed(settlement)
    }
}
