use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use learnhub_auth::Role;
use learnhub_cli::create_user;
use learnhub_config::DatabaseConfig;
use learnhub_db::{init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "learnhub-cli")]
#[command(about = "LearnHub CLI - Administrative tools for LearnHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a user account directly in the database
    CreateUser {
        /// Username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Role: educator or learner
        #[arg(short = 'r', long)]
        role: Option<Role>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = init_db_pool(&DatabaseConfig::from_env())
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            run_migrations(&pool).await.context("Migration failed")?;
            println!("Migrations applied");
        }
        Commands::CreateUser {
            username,
            email,
            role,
            password,
        } => handle_create_user(&pool, username, email, role, password).await?,
    }

    Ok(())
}

async fn handle_create_user(
    pool: &sqlx::PgPool,
    username: Option<String>,
    email: Option<String>,
    role: Option<Role>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let role = match role {
        Some(role) => role,
        None => {
            let roles = [Role::Educator, Role::Learner];
            let index = Select::new()
                .with_prompt("Role")
                .items(&roles.map(|r| r.as_str()))
                .default(0)
                .interact()?;
            roles[index]
        }
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let id = create_user(pool, &username, &email, &password, role).await?;

    println!("User created");
    println!("   ID: {}", id);
    println!("   Username: {}", username);
    println!("   Role: {}", role);

    Ok(())
}
