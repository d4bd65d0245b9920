use clap::{Parser, Subcommand};
use gridfall_engine::Grid;

use self::{script::ScriptArg, shapes::ShapesArg, simulate::SimulateArg};

mod script;
mod shapes;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play games with a random bot and report the results
    Simulate(#[clap(flatten)] SimulateArg),
    /// Replay a list of moves against a fresh grid
    Script(#[clap(flatten)] ScriptArg),
    /// Print the spawn footprint of every piece kind
    Shapes(#[clap(flatten)] ShapesArg),
}

/// Board dimensions shared by the commands that build a grid.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BoardArg {
    /// Number of rows
    #[arg(long, default_value_t = 18)]
    rows: usize,
    /// Number of columns
    #[arg(long, default_value_t = 10)]
    columns: usize,
}

impl BoardArg {
    fn grid(&self) -> anyhow::Result<Grid> {
        Ok(Grid::try_new(self.rows, self.columns)?)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Script(arg) => script::run(&arg)?,
        Mode::Shapes(arg) => shapes::run(&arg),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_board_defaults() {
        let args = CommandArgs::try_parse_from(["gridfall", "script"]).unwrap();
        let Mode::Script(arg) = args.mode else {
            panic!("expected script mode");
        };
        let grid = arg.board.grid().unwrap();
        assert_eq!((grid.row_size(), grid.column_size()), (18, 10));
    }

    #[test]
    fn test_seed_must_be_32_hex_digits() {
        let parse =
            |seed: &str| CommandArgs::try_parse_from(["gridfall", "simulate", "--seed", seed]);
        assert!(parse("ff").is_err());
        assert!(parse("0123456789abcdef0123456789abcdef").is_ok());
    }

    #[test]
    fn test_board_too_small_is_an_error() {
        let board = BoardArg {
            rows: 3,
            columns: 10,
        };
        let err = board.grid().unwrap_err();
        assert!(err.to_string().contains("3x10"));
    }
}
