//! Engine parameters: pass threshold and retry cooldown.

use serde::{Deserialize, Serialize};

/// Basis points in one whole (100%).
pub const BPS_SCALE: u64 = 10_000;

/// Default pass threshold: 70% of questions answered correctly.
pub const DEFAULT_PASS_THRESHOLD_BPS: u32 = 7_000;

/// Default retry wait after a failed attempt: 7 days.
pub const DEFAULT_RETRY_COOLDOWN_SECS: u64 = 7 * 24 * 60 * 60;

/// Tunable parameters for the verification engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationParams {
    /// Minimum fraction of correct answers (basis points, 7000 = 70%) needed to pass.
    #[serde(default = "default_pass_threshold_bps")]
    pub pass_threshold_bps: u32,

    /// Wait after a failed attempt before a retry is allowed (seconds).
    #[serde(default = "default_retry_cooldown_secs")]
    pub retry_cooldown_secs: u64,

    /// Reject retries inside the cooldown window. Off by default: the wait is
    /// shown to users but not enforced.
    #[serde(default)]
    pub enforce_retry_cooldown: bool,
}

fn default_pass_threshold_bps() -> u32 {
    DEFAULT_PASS_THRESHOLD_BPS
}

fn default_retry_cooldown_secs() -> u64 {
    DEFAULT_RETRY_COOLDOWN_SECS
}

impl VerificationParams {
    /// Whether `correct / total` reaches the pass threshold.
    ///
    /// Compares the exact ratio with integer arithmetic; a rounded percentage
    /// is never consulted. An empty attempt never passes.
    pub fn meets_threshold(&self, correct: u32, total: u32) -> bool {
        if total == 0 {
            return false;
        }
        u64::from(correct) * BPS_SCALE >= u64::from(total) * u64::from(self.pass_threshold_bps)
    }
}

impl Default for VerificationParams {
    fn default() -> Self {
        Self {
            pass_threshold_bps: DEFAULT_PASS_THRESHOLD_BPS,
            retry_cooldown_secs: DEFAULT_RETRY_COOLDOWN_SECS,
            enforce_retry_cooldown: false,
        }
    }
}

/// Percentage of correct answers rounded half-up, for display.
pub fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (correct, total) = (u64::from(correct), u64::from(total));
    ((correct * 200 + total) / (total * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seventy_percent_exactly_passes() {
        let params = VerificationParams::default();
        assert!(params.meets_threshold(7, 10));
        assert!(params.meets_threshold(14, 20));
        assert!(!params.meets_threshold(6, 10));
    }

    #[test]
    fn ratio_just_below_threshold_fails_even_when_rounding_up() {
        let params = VerificationParams::default();
        // 699/1000 = 69.9%, rounds to 70%.
        assert_eq!(percentage(699, 1000), 70);
        assert!(!params.meets_threshold(699, 1000));
        // 23/33 = 69.69..%, rounds to 70%.
        assert_eq!(percentage(23, 33), 70);
        assert!(!params.meets_threshold(23, 33));
    }

    #[test]
    fn empty_attempt_never_passes() {
        assert!(!VerificationParams::default().meets_threshold(0, 0));
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(10, 10), 100);
    }
}
