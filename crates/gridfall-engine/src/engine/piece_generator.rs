use std::fmt::{self, Write as _};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParsePieceSeedError, PieceKind};

/// Picks one of the seven piece kinds uniformly at random.
///
/// Backed by the thread-local generator, which is seeded once from the
/// operating system and not per call. Use [`PieceGenerator::with_seed`] when
/// the sequence must be reproducible.
///
/// # Example
///
/// ```
/// use gridfall_engine::{PieceKind, create_random_piece};
///
/// let kind = create_random_piece();
/// assert!(PieceKind::ALL.contains(&kind));
/// ```
#[must_use]
pub fn create_random_piece() -> PieceKind {
    rand::rng().random()
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the generator's PCG
/// state. Two generators built from the same seed produce the same sequence
/// of piece kinds, so a game can be replayed from its seed alone.
///
/// Serialized as a 32-digit lower-case hex string.
///
/// # Example
///
/// ```
/// use gridfall_engine::{PieceGenerator, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
/// for _ in 0..20 {
///     assert_eq!(a.pop_next(), b.pop_next());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    #[must_use]
    pub const fn as_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.as_u128())
    }
}

impl std::str::FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    /// Parses exactly 32 hex digits, the form [`Display`](fmt::Display) writes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError {
                input: s.to_owned(),
            });
        }
        u128::from_str_radix(s, 16)
            .map(Self::from_u128)
            .map_err(|_| ParsePieceSeedError {
                input: s.to_owned(),
            })
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{self}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Seeded source of piece kinds with a one-piece preview.
///
/// Every draw is uniform over the seven kinds; there is no bag or history.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    seed: PieceSeed,
    rng: Pcg32,
    next: PieceKind,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let next = rng.random();
        Self { seed, rng, next }
    }

    #[must_use]
    pub const fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Returns the kind the next [`Self::pop_next`] call will yield.
    #[must_use]
    pub const fn peek_next(&self) -> PieceKind {
        self.next
    }

    /// Draws the next piece kind.
    pub fn pop_next(&mut self) -> PieceKind {
        let following = self.rng.random();
        std::mem::replace(&mut self.next, following)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = PieceSeed::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        let mut a = PieceGenerator::with_seed(seed);
        let mut b = PieceGenerator::with_seed(seed);
        let seq_a: Vec<_> = (0..100).map(|_| a.pop_next()).collect();
        let seq_b: Vec<_> = (0..100).map(|_| b.pop_next()).collect();
        assert_eq!(seq_a, seq_b);
        assert_eq!(a.seed(), seed);
    }

    #[test]
    fn test_peek_matches_pop() {
        let mut generator = PieceGenerator::with_seed(PieceSeed::from_u128(42));
        for _ in 0..50 {
            let peeked = generator.peek_next();
            assert_eq!(generator.pop_next(), peeked);
        }
    }

    #[test]
    fn test_every_kind_is_generated() {
        let mut generator = PieceGenerator::with_seed(PieceSeed::from_u128(7));
        let mut counts = [0_usize; PieceKind::LEN];
        for _ in 0..7000 {
            counts[generator.pop_next() as usize] += 1;
        }
        // Uniform draws: each kind should land near 1000.
        for (kind, count) in PieceKind::ALL.iter().zip(counts) {
            assert!((700..1300).contains(&count), "{kind:?} drawn {count} times");
        }
    }

    #[test]
    fn test_create_random_piece_covers_all_kinds() {
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..1000 {
            seen[create_random_piece() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_seed_serialization() {
        let seed = PieceSeed::from_u128(0xdead_beef);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"000000000000000000000000deadbeef\"");
        let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_seed_deserialization_error_cases() {
        assert!(serde_json::from_str::<PieceSeed>("\"deadbeef\"").is_err());
        assert!(serde_json::from_str::<PieceSeed>("\"zz0000000000000000000000deadbeef\"").is_err());
    }

    #[test]
    fn test_seed_from_str() {
        let seed: PieceSeed = "000000000000000000000000000000FF".parse().unwrap();
        assert_eq!(seed.as_u128(), 0xff);
        assert_eq!(seed.to_string(), "000000000000000000000000000000ff");
        assert_eq!(seed.to_string().parse::<PieceSeed>(), Ok(seed));
    }

    #[test]
    fn test_seed_from_str_requires_32_hex_digits() {
        for input in [
            "ff",
            "not-hex",
            "+00000000000000000000000000000ff",
            "0000000000000000000000000000000ff",
            "00000000000000000000000000000 ff",
        ] {
            assert_eq!(
                input.parse::<PieceSeed>(),
                Err(ParsePieceSeedError {
                    input: input.to_owned()
                }),
                "{input:?}"
            );
        }
    }
}
