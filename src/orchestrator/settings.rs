use std::time::Duration;

/// Default number of retries after a rate-limited text request
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default first backoff delay
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);
/// Default upper bound for a single backoff delay
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);
/// Default pause between staggered image requests
pub const DEFAULT_STAGGER: Duration = Duration::from_secs(2);

/// How the diagrams of one topic are requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStrategy {
    /// Every request at once, results taken in completion order
    Parallel,
    /// One request at a time with `delay` between consecutive requests
    Staggered { delay: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub max_retries: u32,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
    pub image_strategy: ImageStrategy,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_backoff: DEFAULT_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            image_strategy: ImageStrategy::Staggered {
                delay: DEFAULT_STAGGER,
            },
        }
    }
}

impl FetchSettings {
    /// Delay before retry number `retry` (0-based): `base * 2^retry`, capped
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.base_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let settings = FetchSettings {
            base_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(3),
            ..FetchSettings::default()
        };
        assert_eq!(settings.backoff_for(0), Duration::from_millis(500));
        assert_eq!(settings.backoff_for(1), Duration::from_secs(1));
        assert_eq!(settings.backoff_for(2), Duration::from_secs(2));
        assert_eq!(settings.backoff_for(3), Duration::from_secs(3));
        assert_eq!(settings.backoff_for(40), Duration::from_secs(3));
    }
}
