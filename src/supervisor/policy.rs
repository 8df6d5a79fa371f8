//! Restart timing and limits.

use std::time::Duration;

use rand::Rng;

use crate::config::SupervisorConfig;

/// Decides how long to wait before a restart and when to stop trying.
#[derive(Debug, Clone)]
pub struct RestartPolicy {
    config: SupervisorConfig,
}

impl RestartPolicy {
    pub fn new(config: SupervisorConfig) -> Self {
        Self { config }
    }

    /// Delay before restart attempt number `failure_streak` (1-based).
    ///
    /// With backoff disabled this is always the configured fixed delay.
    pub fn delay_for(&self, failure_streak: u32) -> Duration {
        let base_ms = self.config.restart_delay_secs * 1000;
        if !self.config.backoff_enabled {
            return Duration::from_millis(base_ms);
        }
        calculate_backoff(failure_streak, base_ms, self.config.max_delay_secs * 1000)
    }

    /// Whether another restart is allowed after this many consecutive failures.
    pub fn should_restart(&self, failure_streak: u32) -> bool {
        match self.config.max_restarts {
            Some(cap) => failure_streak <= cap,
            None => true,
        }
    }

    /// A run at least this long counts as stable and clears the streak.
    pub fn is_stable(&self, uptime: Duration) -> bool {
        uptime >= Duration::from_secs(self.config.stable_after_secs)
    }
}

/// Calculate exponential backoff delay with jitter.
fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(max_ms);

    // Apply jitter (0 to 10% of the delay)
    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(config: SupervisorConfig) -> RestartPolicy {
        RestartPolicy::new(config)
    }

    #[test]
    fn fixed_delay_when_backoff_disabled() {
        let p = policy(SupervisorConfig::default());
        assert_eq!(p.delay_for(1), Duration::from_secs(5));
        assert_eq!(p.delay_for(10), Duration::from_secs(5));
    }

    #[test]
    fn backoff_grows_and_is_capped() {
        let p = policy(SupervisorConfig {
            restart_delay_secs: 1,
            backoff_enabled: true,
            max_delay_secs: 8,
            ..Default::default()
        });

        let d1 = p.delay_for(1);
        assert!(d1 >= Duration::from_secs(1));
        let d3 = p.delay_for(3);
        assert!(d3 >= Duration::from_secs(4));
        // At attempt 10 the raw delay would be 512s; the cap plus 10%
        // jitter bounds it.
        let d10 = p.delay_for(10);
        assert!(d10 >= Duration::from_secs(8));
        assert!(d10 < Duration::from_millis(8801));
    }

    #[test]
    fn restart_cap_is_enforced() {
        let p = policy(SupervisorConfig {
            max_restarts: Some(3),
            ..Default::default()
        });
        assert!(p.should_restart(1));
        assert!(p.should_restart(3));
        assert!(!p.should_restart(4));
    }

    #[test]
    fn no_cap_means_always_restart() {
        let p = policy(SupervisorConfig::default());
        assert!(p.should_restart(u32::MAX));
    }

    #[test]
    fn stability_threshold() {
        let p = policy(SupervisorConfig {
            stable_after_secs: 60,
            ..Default::default()
        });
        assert!(!p.is_stable(Duration::from_secs(59)));
        assert!(p.is_stable(Duration::from_secs(60)));
    }
}
