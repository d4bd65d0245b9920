use arrayvec::ArrayVec;
use gridfall_engine::{Direction, GameSession};
use rand::Rng;

/// Longest horizontal shift the bot plans for a single piece.
const MAX_SHIFT: usize = 5;

/// Upper bound of a move plan: one step down, up to three rotations and the shift.
pub(crate) const MAX_PLAN_LEN: usize = 1 + 3 + MAX_SHIFT;

pub(crate) type MovePlan = ArrayVec<Direction, MAX_PLAN_LEN>;

/// Bot that places every piece with a random rotation and column.
#[derive(Debug, Clone)]
pub(crate) struct RandomBot<R> {
    rng: R,
}

impl<R> RandomBot<R>
where
    R: Rng,
{
    pub(crate) fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Plans the moves for the live piece before it is hard dropped.
    ///
    /// The piece first steps down one row so rotations have room above the
    /// pivot, then rotates clockwise, then shifts sideways.
    pub(crate) fn plan(&mut self) -> MovePlan {
        let mut plan = MovePlan::new();
        plan.push(Direction::Down);

        let rotations = self.rng.random_range(0..4);
        plan.extend((0..rotations).map(|_| Direction::ClockRotation));

        let shift = if self.rng.random() {
            Direction::Left
        } else {
            Direction::Right
        };
        let shifts = self.rng.random_range(0..=MAX_SHIFT);
        plan.extend((0..shifts).map(|_| shift));
        plan
    }

    /// Plays the live piece of `session`: applies a plan and hard drops.
    ///
    /// Moves the grid rejects are skipped.
    pub(crate) fn play_piece(&mut self, session: &mut GameSession) {
        for direction in self.plan() {
            session.try_move(direction);
        }
        session.hard_drop();
    }
}

#[cfg(test)]
mod tests {
    use gridfall_engine::{Grid, PieceGenerator, PieceSeed};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn bot(seed: u64) -> RandomBot<Pcg32> {
        RandomBot::new(Pcg32::seed_from_u64(seed))
    }

    #[test]
    fn test_plan_shape() {
        let mut bot = bot(1);
        for _ in 0..500 {
            let plan = bot.plan();
            assert!(plan.len() <= MAX_PLAN_LEN);
            assert_eq!(plan[0], Direction::Down);

            let rotations = plan[1..]
                .iter()
                .take_while(|d| d.is_rotation())
                .count();
            assert!(rotations <= 3);
            let shifts = &plan[1 + rotations..];
            assert!(shifts.len() <= MAX_SHIFT);
            assert!(shifts.windows(2).all(|w| w[0] == w[1]));
            assert!(
                shifts
                    .iter()
                    .all(|d| matches!(d, Direction::Left | Direction::Right))
            );
        }
    }

    #[test]
    fn test_same_rng_same_plans() {
        let mut a = bot(9);
        let mut b = bot(9);
        for _ in 0..50 {
            assert_eq!(a.plan(), b.plan());
        }
    }

    #[test]
    fn test_play_piece_settles_one_piece() {
        let mut session = GameSession::new(
            Grid::new(18, 10),
            PieceGenerator::with_seed(PieceSeed::from_u128(3)),
            0,
        );
        bot(3).play_piece(&mut session);
        assert_eq!(session.stats().settled_pieces(), 1);
        assert_eq!(session.grid().count_full_cells(), 8);
    }
}
