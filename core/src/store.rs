use core::convert::Infallible;
use core::fmt;

/// Persistence port for the high score.
///
/// The engine loads once when it is created and saves every time the high score goes up. Errors on
/// either side are logged and otherwise ignored, a broken store never blocks play.
pub trait HighScoreStore {
    type Error: fmt::Display;

    /// Last persisted high score, `None` when nothing was stored yet.
    fn load(&mut self) -> Result<Option<u32>, Self::Error>;

    fn save(&mut self, high_score: u32) -> Result<(), Self::Error>;
}

/// Keeps the high score in memory only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    high_score: Option<u32>,
}

impl MemoryStore {
    pub const fn new() -> Self {
        Self { high_score: None }
    }

    pub const fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score: Some(high_score),
        }
    }

    pub const fn high_score(&self) -> Option<u32> {
        self.high_score
    }
}

impl HighScoreStore for MemoryStore {
    type Error = Infallible;

    fn load(&mut self) -> Result<Option<u32>, Self::Error> {
        Ok(self.high_score)
    }

    fn save(&mut self, high_score: u32) -> Result<(), Self::Error> {
        self.high_score = Some(high_score);
        Ok(())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for &mut S {
    type Error = S::Error;

    fn load(&mut self) -> Result<Option<u32>, Self::Error> {
        (**self).load()
    }

    fn save(&mut self, high_score: u32) -> Result<(), Self::Error> {
        (**self).save(high_score)
    }
}

/// Loads the stored high score, treating a missing value or a failed load as 0.
pub fn load_high_score<S: HighScoreStore + ?Sized>(store: &mut S) -> u32 {
    match store.load() {
        Ok(high_score) => high_score.unwrap_or(0),
        Err(err) => {
            log::warn!("Could not load high score, starting from 0: {}", err);
            0
        }
    }
}
