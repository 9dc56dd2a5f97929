//! CLI administration tool for form-login.
//!
//! Provisions users and checks the database without going through the web
//! flow. The server itself never writes users.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for the password)
//! cargo run --bin admin -- user create --username alice --role ADMIN
//!
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Change a password
//! cargo run --bin admin -- user set-password alice
//!
//! # Print a bcrypt hash for manual seeding
//! cargo run --bin admin -- password hash
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: PostgreSQL connection
//! - `BCRYPT_COST` (optional): work factor for new hashes (default: 10)

use form_login::application::services::PasswordService;
use form_login::application::services::password_service::DEFAULT_COST;
use form_login::config::Config;
use form_login::domain::entities::Role;
use form_login::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing form-login.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Password utilities
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Role: USER or ADMIN
        #[arg(short, long, default_value = "USER")]
        role: Role,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Replace a user's password
    SetPassword {
        /// Username to update
        username: String,
    },
}

/// Password utility subcommands.
#[derive(Subcommand)]
enum PasswordAction {
    /// Hash a password and print the result
    Hash,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let passwords = password_service()?;

    match cli.command {
        Commands::User { action } => {
            let pool = connect().await?;
            handle_user_action(action, &pool, &passwords).await?
        }
        Commands::Password { action } => handle_password_action(action, &passwords)?,
        Commands::Db { action } => {
            let pool = connect().await?;
            handle_db_action(action, &pool).await?
        }
    }

    Ok(())
}

/// Connects using `DATABASE_URL` or the `DB_*` components.
async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?;
    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

fn password_service() -> Result<PasswordService> {
    let cost = std::env::var("BCRYPT_COST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_COST);

    Ok(PasswordService::new(cost)?)
}

/// Prompts for a new password twice and hashes it.
fn prompt_password_hash(passwords: &PasswordService) -> Result<String> {
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;
    anyhow::ensure!(!password.trim().is_empty(), "Password must not be blank");

    Ok(passwords.hash(&password)?)
}

/// Dispatches user management commands.
async fn handle_user_action(
    action: UserAction,
    pool: &PgPool,
    passwords: &PasswordService,
) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create {
            username,
            role,
            yes,
        } => create_user(repo, passwords, username, role, yes).await?,
        UserAction::List => list_users(repo).await?,
        UserAction::SetPassword { username } => set_password(repo, passwords, username).await?,
    }

    Ok(())
}

/// Creates a new user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for username (or use provided)
/// 2. Prompt for password twice
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Hash password with bcrypt
/// 5. Store in database
async fn create_user(
    repo: Arc<PgUserRepository>,
    passwords: &PasswordService,
    username: Option<String>,
    role: Role,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let username = username.trim().to_string();
    anyhow::ensure!(!username.is_empty(), "Username must not be blank");

    let password_hash = prompt_password_hash(passwords)?;

    println!();
    println!("{}", "User details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    println!("  Role:     {}", role.as_str().cyan());
    println!("  Cost:     {}", passwords.cost().to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.create_user(&username, &password_hash, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!();

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   Username                       Role     Created
///   ────────────────────────────────────────────────────────────
///   alice                          ADMIN    2024-01-15 10:30
///   bob                            USER     2024-01-16 14:20
/// ```
async fn list_users(repo: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<30} {:<8} {:<20}",
        "Username".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for user in &users {
        let role = match user.role {
            Role::Admin => user.role.as_str().magenta(),
            Role::User => user.role.as_str().green(),
        };

        println!(
            "  {:<30} {:<8} {}",
            user.username.cyan(),
            role,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Replaces a user's password after confirmation.
async fn set_password(
    repo: Arc<PgUserRepository>,
    passwords: &PasswordService,
    username: String,
) -> Result<()> {
    println!("{}", "🔑 Set Password".bright_blue().bold());
    println!();
    println!("  User: {}", username.cyan());
    println!();

    let password_hash = prompt_password_hash(passwords)?;

    let confirmed = Confirm::new()
        .with_prompt("Replace the password?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.update_password(&username, &password_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update password: {}", e))?;

    println!();
    println!("{}", "✅ Password updated".green().bold());
    println!();

    Ok(())
}

/// Handles password utilities that need no database.
fn handle_password_action(action: PasswordAction, passwords: &PasswordService) -> Result<()> {
    match action {
        PasswordAction::Hash => {
            let hash = prompt_password_hash(passwords)?;
            println!();
            println!("{}", hash.bright_yellow());
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await
                .context("users table missing; start the server once to run migrations")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Users: {}", users.to_string().bright_green().bold());
        }
    }

    Ok(())
}
