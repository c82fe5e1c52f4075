//! Reward domain module.
//!
//! A persisted apple counter from the snake minigame; reaching
//! [`REWARD_TARGET`] unlocks a discount.

mod model;

pub use model::{REWARD_TARGET, RewardProgress};
