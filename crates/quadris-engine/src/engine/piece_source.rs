use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supplies the kind of each newly queued piece.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the piece generator. The same seed always produces
/// the same piece sequence, which makes games replayable and tests
/// deterministic.
///
/// Seeds are written as 32 hexadecimal digits.
///
/// # Example
///
/// ```
/// use quadris_engine::PieceSeed;
///
/// let seed: PieceSeed = "000000000000000000000000deadbeef".parse().unwrap();
/// assert_eq!(seed.to_string(), "000000000000000000000000deadbeef");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed {input:?}: expected 32 hexadecimal digits")]
pub struct ParseSeedError {
    input: String,
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self::from_u128(num))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
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

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Draws each piece independently and uniformly from the seven kinds.
#[derive(Debug, Clone)]
pub struct RandomPieces {
    seed: PieceSeed,
    rng: Pcg32,
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieces {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Returns the seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece sequence must not be empty")]
pub struct EmptySequenceError;

/// Cycles through a fixed list of piece kinds.
///
/// # Example
///
/// ```
/// use quadris_engine::{PieceKind, PieceSequence, PieceSource as _};
///
/// let mut source = PieceSequence::new([PieceKind::I, PieceKind::O]).unwrap();
/// assert_eq!(source.next_kind(), PieceKind::I);
/// assert_eq!(source.next_kind(), PieceKind::O);
/// assert_eq!(source.next_kind(), PieceKind::I);
/// ```
#[derive(Debug, Clone)]
pub struct PieceSequence {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl PieceSequence {
    pub fn new<I>(kinds: I) -> Result<Self, EmptySequenceError>
    where
        I: IntoIterator<Item = PieceKind>,
    {
        let kinds: Vec<_> = kinds.into_iter().collect();
        if kinds.is_empty() {
            return Err(EmptySequenceError);
        }
        Ok(Self { kinds, index: 0 })
    }
}

impl PieceSource for PieceSequence {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}
