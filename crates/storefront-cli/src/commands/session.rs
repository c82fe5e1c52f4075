use anyhow::{Result, bail};
use storefront_application::GuardDecision;

use crate::bootstrap::AppContext;

pub async fn login(app: &AppContext, email: &str, password: &str) -> Result<()> {
    let user = app.store.login(email, password).await?;
    println!(
        "Logged in to {} as {}",
        app.config.api.base_url,
        user.role().unwrap_or("user")
    );
    Ok(())
}

pub fn logout(app: &AppContext) -> Result<()> {
    app.store.logout();
    println!("Logged out");
    Ok(())
}

/// Runs the same profile hydration the router guard runs before a page.
pub async fn whoami(app: &AppContext) -> Result<()> {
    if !app.store.is_authenticated() {
        bail!("Not logged in");
    }

    if let GuardDecision::Redirect(to) = app.router.guard().before_each().await {
        bail!("Session expired; log in again ({})", to);
    }

    let snapshot = app.store.snapshot();
    super::print_json(&snapshot.user)
}
