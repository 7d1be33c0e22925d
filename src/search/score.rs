use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Lowest synthetic score handed out
pub const SCORE_FLOOR: u8 = 70;
/// Highest score any listing can carry
pub const SCORE_CEILING: u8 = 100;

/// Source of synthetic scores for listings without a supplied one
pub trait ScoreGenerator: Send {
    /// Next score in `SCORE_FLOOR..=SCORE_CEILING`
    fn next_score(&mut self) -> u8;
}

/// Pseudo-random scores from a seedable RNG
pub struct RandomScores {
    rng: StdRng,
}

impl RandomScores {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl ScoreGenerator for RandomScores {
    fn next_score(&mut self) -> u8 {
        self.rng.gen_range(SCORE_FLOOR..=SCORE_CEILING)
    }
}

/// Counts up from a start value, wrapping back to the floor past the ceiling
pub struct SequentialScores {
    next: u8,
}

impl SequentialScores {
    pub fn starting_at(start: u8) -> Self {
        Self {
            next: start.clamp(SCORE_FLOOR, SCORE_CEILING),
        }
    }
}

impl ScoreGenerator for SequentialScores {
    fn next_score(&mut self) -> u8 {
        let score = self.next;
        self.next = if score >= SCORE_CEILING { SCORE_FLOOR } else { score + 1 };
        score
    }
}

struct ScoreTable {
    scores: HashMap<String, u8>,
    generator: Box<dyn ScoreGenerator>,
}

/// Session-wide memo of listing scores. The first score recorded for an id
/// is the one every later lookup returns.
pub struct ScoreAssigner {
    table: Mutex<ScoreTable>,
}

impl ScoreAssigner {
    pub fn new(generator: impl ScoreGenerator + 'static) -> Self {
        Self {
            table: Mutex::new(ScoreTable {
                scores: HashMap::new(),
                generator: Box::new(generator),
            }),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomScores::seeded(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(RandomScores::from_entropy())
    }

    pub fn score_of(&self, id: &str) -> u8 {
        self.score_with(id, None)
    }

    /// Like `score_of`, but records `supplied` instead of a synthetic value
    /// when the id has not been scored yet.
    pub fn score_with(&self, id: &str, supplied: Option<u8>) -> u8 {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(&score) = table.scores.get(id) {
            return score;
        }

        let score = match supplied {
            Some(score) => score.min(SCORE_CEILING),
            None => table.generator.next_score(),
        };
        debug!("Assigned score {} to listing {}", score, id);
        table.scores.insert(id.to_string(), score);
        score
    }

    pub fn peek(&self, id: &str) -> Option<u8> {
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table.scores.get(id).copied()
    }

    pub fn len(&self) -> usize {
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
