use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use storefront_core::entity::EntityId;

mod bootstrap;
mod commands;

use commands::entities::EntityAction;

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Storefront client - session, catalogue and rewards from the terminal", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Remote service base URL, overriding config and environment
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and remember the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show the signed-in user, loading the profile if needed
    Whoami,
    /// Manage companies
    Companies {
        #[command(subcommand)]
        action: CompanyAction,
    },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: EntityAction,
    },
    /// Manage items
    Items {
        #[command(subcommand)]
        action: EntityAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: EntityAction,
    },
    /// Snake mini-game reward counter
    Snake {
        #[command(subcommand)]
        action: SnakeAction,
    },
    /// Resolve a route the way the storefront router would
    Route { path: String },
}

#[derive(Subcommand, Debug)]
enum CompanyAction {
    #[command(flatten)]
    Crud(EntityAction),
    /// Load one company and select it
    Show { id: EntityId },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum SnakeAction {
    /// Eat one apple
    Eat,
    /// Reset the counter and lock the discount again
    Reset,
    /// Show progress toward the discount
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = bootstrap::load_config(cli.config.as_deref(), cli.api_url.as_deref())?;
    bootstrap::init_logging(&config.logging.level);
    let app = bootstrap::AppContext::build(config)?;

    match cli.command {
        Commands::Login { email, password } => commands::session::login(&app, &email, &password).await,
        Commands::Logout => commands::session::logout(&app),
        Commands::Whoami => commands::session::whoami(&app).await,
        Commands::Companies { action } => match action {
            CompanyAction::Crud(action) => commands::entities::run(app.store.companies(), action).await,
            CompanyAction::Show { id } => commands::entities::show_company(&app, id).await,
        },
        Commands::Categories { action } => commands::entities::run(app.store.categories(), action).await,
        Commands::Items { action } => commands::entities::run(app.store.items(), action).await,
        Commands::Orders { action } => commands::entities::run(app.store.orders(), action).await,
        Commands::Snake { action } => match action {
            SnakeAction::Eat => commands::snake::eat(&app),
            SnakeAction::Reset => commands::snake::reset(&app),
            SnakeAction::Status => commands::snake::status(&app),
        },
        Commands::Route { path } => commands::route::resolve(&app, &path).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from([
            "storefront",
            "login",
            "--email",
            "a@b.com",
            "--password",
            "x",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Login { ref email, .. } if email == "a@b.com"));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "storefront",
            "items",
            "list",
            "--api-url",
            "http://shop.test/api",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://shop.test/api"));
        assert!(matches!(
            cli.command,
            Commands::Items {
                action: EntityAction::List
            }
        ));
    }

    #[test]
    fn test_parse_company_show_and_crud() {
        let cli = Cli::try_parse_from(["storefront", "companies", "show", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Companies {
                action: CompanyAction::Show { id: EntityId::Int(3) }
            }
        ));

        let cli = Cli::try_parse_from(["storefront", "companies", "show", "9f1c"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Companies {
                action: CompanyAction::Show { id: EntityId::Str(ref id) }
            } if id == "9f1c"
        ));

        let cli = Cli::try_parse_from([
            "storefront",
            "companies",
            "update",
            "3",
            "--data",
            r#"{"name":"Acme"}"#,
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Companies {
                action: CompanyAction::Crud(EntityAction::Update {
                    id: EntityId::Int(3),
                    ..
                })
            }
        ));
    }

    #[test]
    fn test_show_is_companies_only() {
        assert!(Cli::try_parse_from(["storefront", "orders", "show", "1"]).is_err());
    }

    #[test]
    fn test_parse_snake() {
        let cli = Cli::try_parse_from(["storefront", "snake", "eat"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Snake {
                action: SnakeAction::Eat
            }
        ));
    }
}
