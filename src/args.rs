//! Argument value generation.
//!
//! This module supplies the realistic argument values fed to every
//! formatting strategy: short generated sentences ("facts") and birthday
//! dates. Values are produced fresh on every call.

use chrono::{DateTime, Duration, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use log::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Mutex;

const SECONDS_PER_YEAR: i64 = 365 * 24 * 60 * 60;
const BIRTHDAY_MIN_AGE_YEARS: i64 = 18;
const BIRTHDAY_MAX_AGE_YEARS: i64 = 65;

/// Kind of value a pattern expects in one argument slot.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgKind {
    Fact,
    Birthday,
}

/// One opaque argument handed to a formatting strategy.
///
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    Text(String),
    Date(DateTime<Utc>),
}

impl ArgValue {
    /// Render the value the way positional message formatting does, with
    /// dates in short locale style (e.g. `3/4/80, 10:20 AM`).
    ///
    pub fn short_form(&self) -> String {
        match self {
            ArgValue::Text(text) => text.clone(),
            ArgValue::Date(date) => date.format("%-m/%-d/%y, %-I:%M %p").to_string(),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Text(text) => f.write_str(text),
            ArgValue::Date(date) => write!(f, "{}", date.format("%a %b %d %H:%M:%S UTC %Y")),
        }
    }
}

/// Source of generated argument values.
///
/// Constructed once per run and shared by reference. The random generator
/// is kept behind a lock so calls stay independent across threads.
///
pub struct ArgumentSource {
    rng: Mutex<StdRng>,
}

impl ArgumentSource {
    /// Returns a source seeded from operating system entropy.
    ///
    pub fn new() -> ArgumentSource {
        debug!("Initializing argument source from entropy...");
        ArgumentSource {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Returns a source whose sequence of values is reproducible for the
    /// given seed.
    ///
    pub fn seeded(seed: u64) -> ArgumentSource {
        debug!("Initializing argument source with seed {}...", seed);
        ArgumentSource {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Returns a short generated sentence.
    ///
    pub fn fact(&self) -> String {
        let mut rng = self.lock();
        Sentence(4..12).fake_with_rng(&mut *rng)
    }

    /// Returns a birthday between 18 and 65 years ago.
    ///
    pub fn birthday(&self) -> DateTime<Utc> {
        let age_seconds = {
            let mut rng = self.lock();
            rng.gen_range(
                BIRTHDAY_MIN_AGE_YEARS * SECONDS_PER_YEAR..BIRTHDAY_MAX_AGE_YEARS * SECONDS_PER_YEAR,
            )
        };
        Utc::now() - Duration::seconds(age_seconds)
    }

    /// Returns a fresh value of the requested kind.
    ///
    pub fn generate(&self, kind: ArgKind) -> ArgValue {
        match kind {
            ArgKind::Fact => ArgValue::Text(self.fact()),
            ArgKind::Birthday => ArgValue::Date(self.birthday()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StdRng> {
        // Generator state stays valid after a poisoned lock.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ArgumentSource {
    fn default() -> Self {
        ArgumentSource::new()
    }
}
