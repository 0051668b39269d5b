use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;
use uuid::Uuid;

use swadiq_admin::config::DatabaseConfig;
use swadiq_admin::logging::init_tracing;
use swadiq_admin::modules::accounts::model::NewAdmin;
use swadiq_admin::modules::accounts::service::{
    check_connection, create_admin, grant_admin, list_users,
};
use swadiq_admin::schema::{SchemaStrategy, ensure_schema};
use swadiq_admin::shell;

#[derive(Parser)]
#[command(name = "swadiq-admin")]
#[command(about = "Administrative tools for the Swadiq Schools database", long_about = None)]
struct Cli {
    /// Run a single command instead of the interactive menu
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new admin account
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,
    },
    /// List active users with their roles
    ListUsers {
        /// Emit JSON instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Grant the admin role to an existing user
    GrantAdmin {
        /// Id of the user to promote
        user_id: Uuid,
    },
    /// Create the role tables and seed the default roles
    Setup,
    /// Check database connectivity
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = DatabaseConfig::from_env();

    let pool = match config.connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Connection failed: {e}");
            eprintln!("\nIf you have a local PostgreSQL, try:");
            eprintln!("  export LOCAL_DB=true");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::CreateAdmin {
            email,
            password,
            first_name,
            last_name,
        }) => handle_create_admin(&pool, email, password, first_name, last_name).await,
        Some(Commands::ListUsers { json }) => handle_list_users(&pool, json).await,
        Some(Commands::GrantAdmin { user_id }) => {
            shell::report_granted(grant_admin(&pool, user_id).await, &user_id.to_string());
            Ok(())
        }
        Some(Commands::Setup) => handle_setup(&pool).await,
        Some(Commands::Check) => handle_check(&pool).await,
        None => run_interactive(&pool).await,
    }
}

async fn run_interactive(pool: &PgPool) -> anyhow::Result<()> {
    println!("🏫 SWADIQ SCHOOLS ADMIN MANAGER");
    println!("{}", "=".repeat(40));

    match check_connection(pool).await {
        Ok(version) => println!("✅ Connected to: {version}"),
        Err(e) => {
            eprintln!("❌ {e}");
            eprintln!("\nIf you have a local PostgreSQL, try:");
            eprintln!("  export LOCAL_DB=true");
            return Ok(());
        }
    }

    // A schema failure is non-fatal: listing and granting may still work
    // against tables created by an earlier run.
    match ensure_schema(pool).await {
        Ok(strategy) => println!("✅ Database tables ready ({})", strategy_label(strategy)),
        Err(e) => eprintln!("❌ {e}"),
    }

    shell::run(pool).await
}

async fn handle_create_admin(
    pool: &PgPool,
    email: Option<String>,
    password: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
) -> anyhow::Result<()> {
    // Use provided values or prompt interactively
    let email = match email {
        Some(v) => v,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let first_name = match first_name {
        Some(v) => v,
        None => Input::new().with_prompt("First name").interact_text()?,
    };

    let last_name = match last_name {
        Some(v) => v,
        None => Input::new().with_prompt("Last name").interact_text()?,
    };

    let password = match password {
        Some(v) => v,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let admin = NewAdmin {
        email,
        password,
        first_name,
        last_name,
    };

    match create_admin(pool, &admin).await {
        Ok(_) => {
            println!("✅ Admin user created successfully!");
            println!("   Email: {}", admin.email);
            println!("   Name: {} {}", admin.first_name, admin.last_name);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Error creating admin user: {e}");
            std::process::exit(1);
        }
    }
}

async fn handle_list_users(pool: &PgPool, json: bool) -> anyhow::Result<()> {
    match list_users(pool).await {
        Ok(users) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else {
                shell::print_users(&users);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Error listing users: {e}");
            std::process::exit(1);
        }
    }
}

async fn handle_setup(pool: &PgPool) -> anyhow::Result<()> {
    match ensure_schema(pool).await {
        Ok(strategy) => {
            println!("✅ Database tables ready ({})", strategy_label(strategy));
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}

async fn handle_check(pool: &PgPool) -> anyhow::Result<()> {
    match check_connection(pool).await {
        Ok(version) => {
            println!("✅ Connected to: {version}");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}

fn strategy_label(strategy: SchemaStrategy) -> &'static str {
    match strategy {
        SchemaStrategy::UuidKeys => "uuid keys",
        SchemaStrategy::SerialKeys => "serial keys",
    }
}
