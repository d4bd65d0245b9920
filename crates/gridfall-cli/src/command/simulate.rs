use std::path::PathBuf;

use chrono::Utc;
use gridfall_engine::{GameSession, Grid, PieceSeed, render};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    bot::RandomBot,
    schema::{GameSummary, SimulationSummary},
    util::{self, Output},
};

use super::BoardArg;

/// Mixed into the piece seed so the bot does not share the generator's stream.
const BOT_SEED_SALT: u128 = 0x9e37_79b9_7f4a_7c15_f39c_c060_5ced_c834;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    board: BoardArg,
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Piece seed of the first game as 32 hex digits; later games count up from it (random if omitted)
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Stop a game after this many pieces have settled
    #[arg(long, default_value_t = 1000)]
    max_pieces: usize,
    /// File holding the best score across runs; created when missing
    #[arg(long)]
    best_score_file: Option<PathBuf>,
    /// Output file path for the JSON summary (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the final grid of every game to stderr
    #[arg(long)]
    show_board: bool,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let mut best_score = match &arg.best_score_file {
        Some(path) => util::read_best_score(path)?,
        None => 0,
    };
    let first_seed = arg.seed.unwrap_or_else(|| rand::rng().random());

    let mut games = Vec::with_capacity(arg.games);
    for index in 0..arg.games {
        let seed = PieceSeed::from_u128(first_seed.as_u128().wrapping_add(index as u128));
        eprintln!("Simulating game #{}...", index + 1);
        let session = play_game(arg.board.grid()?, seed, arg.max_pieces, best_score);
        if session.best_score() > best_score {
            eprintln!("New best score: {}", session.best_score());
        }
        best_score = session.best_score();

        eprintln!(
            "Game {}/{}: seed {seed}, score {}, {} pieces, {} lines{}",
            index + 1,
            arg.games,
            session.score(),
            session.stats().settled_pieces(),
            session.stats().total_cleared_lines(),
            if session.state().is_playing() {
                " (piece limit reached)"
            } else {
                ""
            },
        );
        if arg.show_board {
            eprint!("{}", render(session.grid()));
        }

        games.push(GameSummary {
            seed,
            score: session.score(),
            state: session.state(),
            stats: session.stats().clone(),
        });
    }

    if let Some(path) = &arg.best_score_file {
        util::write_best_score(path, best_score)?;
        eprintln!("Best score {best_score} saved to {}", path.display());
    }

    let summary = SimulationSummary {
        recorded_at: Utc::now(),
        rows: arg.board.rows,
        columns: arg.board.columns,
        best_score,
        games,
    };
    Output::save_json(&summary, arg.output.clone())?;
    Ok(())
}

/// Plays one game with the random bot until it ends or `max_pieces` pieces
/// have settled.
fn play_game(grid: Grid, seed: PieceSeed, max_pieces: usize, best_score: usize) -> GameSession {
    let mut session = GameSession::with_seed(grid, seed, best_score);
    let bot_seed = (seed.as_u128() ^ BOT_SEED_SALT).to_le_bytes();
    let mut bot = RandomBot::new(Pcg32::from_seed(bot_seed));

    while session.state().is_playing() && session.stats().settled_pieces() < max_pieces {
        bot.play_piece(&mut session);
    }
    session
}
