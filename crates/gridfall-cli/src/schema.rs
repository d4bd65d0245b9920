use chrono::{DateTime, Utc};
use gridfall_engine::{PieceSeed, SessionState, SessionStats};
use serde::{Deserialize, Serialize};

/// Result of a `simulate` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Timestamp when the run finished (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Grid height used by every game
    pub rows: usize,
    /// Grid width used by every game
    pub columns: usize,
    /// Best score after the run, including the one loaded from disk
    pub best_score: usize,
    /// One entry per game, in play order
    pub games: Vec<GameSummary>,
}

/// Final state of one simulated game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    /// Piece seed; replaying it yields the same piece sequence
    pub seed: PieceSeed,
    pub score: usize,
    /// `Playing` when the game was stopped by the piece limit
    pub state: SessionState,
    pub stats: SessionStats,
}
