//! Seedable score jitter.
//!
//! Jitter only breaks ties between otherwise equal scores. A seeded source
//! gives the same sequence for the same seed; a disabled source is neutral.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Source of small random perturbations for relevance scores.
#[derive(Clone, Default)]
pub enum Jitter {
    /// No perturbation: factor 1, bonus 0.
    #[default]
    Disabled,
    /// Reproducible perturbation from a seeded generator.
    Seeded(StdRng),
}

impl Jitter {
    /// Seeded jitter.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(StdRng::seed_from_u64(seed))
    }

    /// Seeded jitter when a seed is given, otherwise disabled.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(Self::Disabled, Self::seeded)
    }

    /// Multiplicative factor in [0.8, 1.2].
    pub fn scale(&mut self) -> Decimal {
        match self {
            Self::Disabled => Decimal::ONE,
            Self::Seeded(rng) => Decimal::new(rng.random_range(8_000..=12_000), 4),
        }
    }

    /// Additive bonus in [0, `max`).
    pub fn bonus(&mut self, max: Decimal) -> Decimal {
        match self {
            Self::Disabled => Decimal::ZERO,
            Self::Seeded(rng) => Decimal::new(rng.random_range(0..10_000), 4) * max,
        }
    }
}

impl std::fmt::Debug for Jitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "Jitter::Disabled"),
            Self::Seeded(_) => write!(f, "Jitter::Seeded"),
        }
    }
}
