use std::str::FromStr;

use gridfall_engine::{
    Direction, Grid, ParseDirectionError, PieceKind, create_random_piece, render,
};

use super::BoardArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScriptArg {
    #[clap(flatten)]
    pub(super) board: BoardArg,
    /// Kind of every spawned piece (random if omitted)
    #[arg(long)]
    kind: Option<PieceKind>,
    /// Moves to apply in order: left, right, down, up, cw, ccw, drop, tick
    #[arg(value_name = "MOVE")]
    moves: Vec<ScriptMove>,
}

/// One step of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptMove {
    /// Move or rotate the live piece once; a rejected move is skipped.
    Step(Direction),
    /// Fall one row, landing the piece if it cannot.
    Tick,
    /// Fall as far as possible and land.
    Drop,
}

impl FromStr for ScriptMove {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tick" | "t" => Ok(Self::Tick),
            "drop" => Ok(Self::Drop),
            _ => s.parse().map(Self::Step),
        }
    }
}

pub(crate) fn run(arg: &ScriptArg) -> anyhow::Result<()> {
    let mut grid = arg.board.grid()?;
    let is_game_over = replay(&mut grid, arg.kind, &arg.moves);

    print!("{}", render(&grid));
    println!("score: {}", grid.score());
    if is_game_over {
        println!("game over");
    }
    Ok(())
}

/// Spawns a piece and applies `moves` to it, landing and respawning as the
/// script goes.
///
/// Returns whether the game ended; moves after that are ignored.
fn replay(grid: &mut Grid, kind: Option<PieceKind>, moves: &[ScriptMove]) -> bool {
    let next_kind = || kind.unwrap_or_else(create_random_piece);
    let mut piece = grid.put_piece(next_kind());

    for (index, &step) in moves.iter().enumerate() {
        let landed = match step {
            ScriptMove::Step(direction) => {
                if !grid.move_piece(&mut piece, direction, 1) {
                    eprintln!("Move {index} ({direction:?}) rejected");
                }
                false
            }
            ScriptMove::Tick => !grid.move_piece(&mut piece, Direction::Down, 1),
            ScriptMove::Drop => {
                while grid.move_piece(&mut piece, Direction::Down, 1) {}
                true
            }
        };
        if !landed {
            continue;
        }
        if grid.update() {
            eprintln!("Game over at move {index}");
            return true;
        }
        piece = grid.put_piece(next_kind());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(script: &[&str]) -> Vec<ScriptMove> {
        script.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_parse_script_moves() {
        assert_eq!(
            moves(&["left", "CW", "ccw", "tick", "Drop"]),
            [
                ScriptMove::Step(Direction::Left),
                ScriptMove::Step(Direction::ClockRotation),
                ScriptMove::Step(Direction::AnticlockRotation),
                ScriptMove::Tick,
                ScriptMove::Drop,
            ]
        );
        assert!("sideways".parse::<ScriptMove>().is_err());
    }

    #[test]
    fn test_replay_clears_two_rows() {
        let mut grid = Grid::new(6, 4);
        let is_game_over = replay(
            &mut grid,
            Some(PieceKind::O),
            &moves(&["left", "drop", "right", "drop"]),
        );

        assert!(!is_game_over);
        assert_eq!(grid.score(), 24);
        // Only the freshly spawned piece remains.
        assert_eq!(grid.count_full_cells(), 4);
    }

    #[test]
    fn test_replay_ticks_until_landing() {
        let mut grid = Grid::new(6, 4);
        let ticks = vec![ScriptMove::Tick; 5];
        assert!(!replay(&mut grid, Some(PieceKind::O), &ticks));
        // Four ticks reach the floor and the fifth lands; the next O spawns.
        assert_eq!(
            grid.to_string(),
            ".OO.\n.OO.\n....\n....\n.OO.\n.OO.\n"
        );
    }

    #[test]
    fn test_replay_stops_at_game_over() {
        let mut grid = Grid::new(6, 4);
        let drops = vec![ScriptMove::Drop; 5];
        assert!(replay(&mut grid, Some(PieceKind::O), &drops));
        assert_eq!(grid.count_full_cells(), 12);
        assert_eq!(grid.score(), 0);
    }
}
