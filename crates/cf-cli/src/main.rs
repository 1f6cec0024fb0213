//! Crewflow console
//!
//! Interactive management console for projects, teams, users, and
//! activities, plus a GitHub organization import command.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cf_core::AppConfig;
use cf_db::{Database, DatabaseConfig, SqlRunner};
use cf_services::{
    ActivityService, DashboardService, ProjectService, TeamService, TeamUserService, UserService,
};

mod prompt;
mod screens;

#[derive(Parser)]
#[command(name = "crewflow", about = "Crewflow project management console")]
struct Cli {
    /// Database connection URL, overriding configuration
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Import repositories of a GitHub organization as projects
    Import {
        /// Organization to import from
        #[arg(long)]
        org: Option<String>,

        /// GitHub personal access token
        #[arg(long, env = "GITHUB_TOKEN")]
        token: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Services and configuration shared by every screen.
pub struct App {
    pub projects: ProjectService,
    pub teams: TeamService,
    pub users: UserService,
    pub team_users: TeamUserService,
    pub activities: ActivityService,
    pub dashboard: DashboardService,
    pub config: AppConfig,
    pub sql: SqlRunner,
}

impl App {
    fn new(sql: SqlRunner, config: AppConfig) -> Self {
        Self {
            projects: ProjectService::new(sql.clone()),
            teams: TeamService::new(sql.clone()),
            users: UserService::new(sql.clone()),
            team_users: TeamUserService::new(sql.clone()),
            activities: ActivityService::new(sql.clone()),
            dashboard: DashboardService::new(sql.clone()),
            config,
            sql,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("failed to load configuration")?;
    if let Some(url) = cli.database_url {
        config.database.url = Some(url);
    }
    let url = config
        .database_url()
        .context("no database URL configured; set DATABASE_URL or pass --database-url")?
        .to_string();

    let db_config = DatabaseConfig {
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..DatabaseConfig::with_url(url)
    };
    let db = Database::connect(&db_config)
        .await
        .context("failed to connect to the database")?;
    db.ping().await.context("database is not reachable")?;
    tracing::info!("connected to database");

    let app = App::new(db.runner(), config);

    match cli.command {
        Some(Command::Import { org, token, yes }) => {
            screens::github::run_import(&app, org, token, yes).await?;
        }
        None => run_menu(&app).await,
    }

    db.close().await;
    Ok(())
}

async fn run_menu(app: &App) {
    println!("=== Crewflow Management System ===");
    loop {
        println!();
        println!("MAIN MENU");
        println!("1. Project Management");
        println!("2. Team Management");
        println!("3. User Management");
        println!("4. Activity Management");
        println!("5. Dashboard");
        println!("6. GitHub Import");
        println!("7. Exit");
        print!("Enter your choice (1-7): ");

        match prompt::menu_choice(1, 7) {
            1 => screens::projects::menu(app).await,
            2 => screens::teams::menu(app).await,
            3 => screens::users::menu(app).await,
            4 => screens::activities::menu(app).await,
            5 => screens::dashboard::show(app).await,
            6 => screens::github::interactive_import(app).await,
            _ => {
                println!("Exiting application...");
                return;
            }
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
