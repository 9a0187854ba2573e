//! High-score persistence seam
//!
//! The engine never owns persistence. A session reads the stored high score
//! once when it is created and writes through [`HighScoreStore::set_high_score`]
//! every time the running score beats it. Where the value ends up (a file, a
//! key-value store, a server) is the embedding application's choice.

/// Persistence collaborator for the all-time high score
pub trait HighScoreStore {
    fn high_score(&self) -> u32;
    fn set_high_score(&mut self, score: u32);
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &mut S {
    fn high_score(&self) -> u32 {
        (**self).high_score()
    }

    fn set_high_score(&mut self, score: u32) {
        (**self).set_high_score(score)
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn high_score(&self) -> u32 {
        (**self).high_score()
    }

    fn set_high_score(&mut self, score: u32) {
        (**self).set_high_score(score)
    }
}

/// In-process store; also counts writes so callers can see notifications
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    high_score: u32,
    writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously persisted record
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            writes: 0,
        }
    }

    /// Number of `set_high_score` calls received
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> u32 {
        self.high_score
    }

    fn set_high_score(&mut self, score: u32) {
        self.high_score = score;
        self.writes += 1;
    }
}
