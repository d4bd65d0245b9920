use gridfall_engine::{Grid, PieceKind};

const SHAPE_ROWS: usize = Grid::MIN_ROWS;
const SHAPE_COLUMNS: usize = 6;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShapesArg {}

pub(crate) fn run(_arg: &ShapesArg) {
    for kind in PieceKind::ALL {
        println!("{} ({:?})", kind.as_char(), kind.color());
        print!("{}", spawn_footprint(kind));
        println!();
    }
}

/// Renders the two rows a piece of `kind` occupies right after spawning.
fn spawn_footprint(kind: PieceKind) -> String {
    let mut grid = Grid::new(SHAPE_ROWS, SHAPE_COLUMNS);
    grid.put_piece(kind);
    grid.to_string().lines().take(2).fold(String::new(), |mut acc, line| {
        acc.push_str(line);
        acc.push('\n');
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_footprints() {
        assert_eq!(spawn_footprint(PieceKind::I), ".OOOO.\n......\n");
        assert_eq!(spawn_footprint(PieceKind::O), "..OO..\n..OO..\n");
        assert_eq!(spawn_footprint(PieceKind::T), "..OOO.\n...O..\n");
        assert_eq!(spawn_footprint(PieceKind::L), "..OOO.\n..O...\n");
        assert_eq!(spawn_footprint(PieceKind::J), "..OOO.\n....O.\n");
        assert_eq!(spawn_footprint(PieceKind::S), "...OO.\n..OO..\n");
        assert_eq!(spawn_footprint(PieceKind::Z), "..OO..\n...OO.\n");
    }
}
