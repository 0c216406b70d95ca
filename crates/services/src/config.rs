use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// How long an answer stays revealed before the quiz moves on.
pub const REVEAL_DELAY: Duration = Duration::from_millis(1500);

/// Runtime knobs for a quiz run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    pub reveal_delay: Duration,
    /// Fixed shuffle seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            reveal_delay: REVEAL_DELAY,
            seed: None,
        }
    }
}

impl QuizConfig {
    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the shuffle RNG this config describes.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn default_uses_standard_delay() {
        let config = QuizConfig::default();
        assert_eq!(config.reveal_delay, Duration::from_millis(1500));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn seeded_configs_produce_identical_streams() {
        let config = QuizConfig::default().with_seed(11);
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
