use anyhow::{Result, bail};
use storefront_application::RouteResolution;

use crate::bootstrap::AppContext;

pub async fn resolve(app: &AppContext, path: &str) -> Result<()> {
    match app.router.resolve(path).await {
        RouteResolution::Proceed(route) => {
            println!("{} -> {}", route.path, route.name().unwrap_or("-"));
            Ok(())
        }
        RouteResolution::Redirect(to) => {
            println!("redirect {}", to);
            Ok(())
        }
        RouteResolution::NotFound(path) => bail!("No route for {}", path),
    }
}
