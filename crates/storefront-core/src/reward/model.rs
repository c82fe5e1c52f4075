//! RewardProgress domain model.

use serde::{Deserialize, Serialize};

/// Apples needed to unlock the discount.
pub const REWARD_TARGET: u32 = 50;

/// Counter and unlock flag.
///
/// `unlocked` is set whenever `count` reaches [`REWARD_TARGET`] and only
/// `reset` clears it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardProgress {
    pub count: u32,
    pub unlocked: bool,
}

impl RewardProgress {
    /// Rebuilds progress from the raw persisted strings.
    ///
    /// Absent, malformed or negative counts become 0. The flag is honoured
    /// only when stored as exactly `"true"`, and is implied by a count at or
    /// above the target.
    pub fn hydrate(stored_count: Option<&str>, stored_flag: Option<&str>) -> Self {
        let count = parse_count(stored_count);
        Self {
            count,
            unlocked: stored_flag == Some("true") || count >= REWARD_TARGET,
        }
    }

    /// Adds one apple. Returns `true` if this call crossed the threshold.
    pub fn increment(&mut self) -> bool {
        self.count = self.count.saturating_add(1);
        let crossed = !self.unlocked && self.count >= REWARD_TARGET;
        if self.count >= REWARD_TARGET {
            self.unlocked = true;
        }
        crossed
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.unlocked = false;
    }

    /// Apples still needed; 0 once unlocked.
    pub fn remaining(&self) -> u32 {
        if self.unlocked {
            0
        } else {
            REWARD_TARGET.saturating_sub(self.count)
        }
    }

    pub fn count_value(&self) -> String {
        self.count.to_string()
    }

    pub fn flag_value(&self) -> &'static str {
        if self.unlocked { "true" } else { "false" }
    }
}

/// Numeric parse of a stored counter, truncated toward zero.
fn parse_count(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}
