use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Seed of the piece randomizer.
///
/// 128 bits, written as a 32-character lowercase hex string by both
/// `Display` and serde. The same seed always yields the same piece sequence,
/// which makes sessions reproducible in tests and when chasing a bug report.
///
/// ```
/// use dropris_engine::{PieceQueue, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut a = PieceQueue::with_seed(seed);
/// let mut b = PieceQueue::with_seed(seed);
/// assert_eq!(a.dequeue_next(), b.dequeue_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex digits")]
pub struct ParseSeedError {
    input: String,
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
        u128::from_str_radix(s, 16)
            .map(|n| Self(n.to_be_bytes()))
            .map_err(|_| err())
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
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Returns the 7 piece kinds in a uniformly random order.
///
/// Fisher–Yates: walking from the last index down to 1, swap each slot with
/// a uniformly chosen slot at or below it.
pub fn shuffled_bag_of_7<R: Rng + ?Sized>(rng: &mut R) -> [PieceKind; PieceKind::LEN] {
    let mut bag = PieceKind::ALL;
    for i in (1..bag.len()).rev() {
        let j = rng.random_range(0..=i);
        bag.swap(i, j);
    }
    bag
}

/// Upcoming piece kinds plus the hold slot.
///
/// The queue is topped up with freshly shuffled bags whenever it holds fewer
/// than 7 kinds, so every run of 7 consecutive draws starting at a bag
/// boundary contains each kind exactly once.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    queue: VecDeque<PieceKind>,
    held: Option<PieceKind>,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceQueue {
    /// Creates a queue seeded from the thread RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            queue: VecDeque::with_capacity(PieceKind::LEN * 2),
            held: None,
        };
        this.refill();
        this
    }

    /// Appends shuffled bags while fewer than 7 kinds are queued.
    pub fn refill(&mut self) {
        while self.queue.len() < PieceKind::LEN {
            let bag = shuffled_bag_of_7(&mut self.rng);
            self.queue.extend(bag);
        }
    }

    /// Removes and returns the kind at the front of the queue.
    pub fn dequeue_next(&mut self) -> PieceKind {
        self.refill();
        let next = self
            .queue
            .pop_front()
            .expect("refill leaves at least 7 kinds queued");
        self.refill();
        next
    }

    /// The next `n` kinds, front first, without consuming them.
    ///
    /// At least 7 kinds are always available.
    pub fn peek(&self, n: usize) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied().take(n)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    /// Puts `current` into the hold slot.
    ///
    /// Returns the previously held kind, or the next queued kind when the
    /// slot was empty.
    pub fn swap_hold(&mut self, current: PieceKind) -> PieceKind {
        self.held
            .replace(current)
            .unwrap_or_else(|| self.dequeue_next())
    }
}
