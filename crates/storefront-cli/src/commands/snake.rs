use anyhow::Result;
use storefront_core::reward::{REWARD_TARGET, RewardProgress};

use crate::bootstrap::AppContext;

pub fn eat(app: &AppContext) -> Result<()> {
    let before = app.store.snake_discount_unlocked();
    let progress = app.store.increment_apples();
    print_progress(&progress);
    if progress.unlocked && !before {
        println!("Discount unlocked!");
    }
    Ok(())
}

pub fn reset(app: &AppContext) -> Result<()> {
    app.store.reset_apples();
    print_progress(&app.store.rewards().progress());
    Ok(())
}

pub fn status(app: &AppContext) -> Result<()> {
    print_progress(&app.store.rewards().progress());
    Ok(())
}

fn print_progress(progress: &RewardProgress) {
    let state = if progress.unlocked {
        "unlocked".to_string()
    } else {
        format!("{} to go", progress.remaining())
    };
    println!("Apples: {}/{} ({})", progress.count, REWARD_TARGET, state);
}
