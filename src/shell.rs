//! Interactive menu loop.
//!
//! A blocking read-eval loop: print the options, read a choice, dispatch
//! by exact string match, repeat until exit. Operation failures are printed
//! and swallowed here; only a broken prompt (stdin closed) ends the loop
//! early.

use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::accounts::model::{NewAdmin, UserSummary};
use crate::modules::accounts::service::{check_connection, create_admin, grant_admin, list_users};
use crate::utils::errors::AdminError;

const MENU: &str = "\nOptions:
  1. Add new admin user
  2. List all users
  3. Grant admin role to existing user
  4. Test connection
  5. Exit";

pub async fn run(db: &PgPool) -> anyhow::Result<()> {
    loop {
        println!("{MENU}");

        let choice: String = Input::new()
            .with_prompt("Select option (1-5)")
            .interact_text()?;

        match choice.trim() {
            "1" => add_admin(db).await?,
            "2" => {
                match list_users(db).await {
                    Ok(users) => print_users(&users),
                    Err(e) => eprintln!("❌ Error listing users: {e}"),
                }
            }
            "3" => grant_interactive(db).await?,
            "4" => match check_connection(db).await {
                Ok(version) => println!("✅ Connected to: {version}"),
                Err(e) => eprintln!("❌ {e}"),
            },
            "5" => {
                println!("Goodbye!");
                return Ok(());
            }
            _ => eprintln!("❌ Invalid option"),
        }
    }
}

async fn add_admin(db: &PgPool) -> anyhow::Result<()> {
    println!("\n--- Add new admin user ---");

    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let first_name: String = Input::new().with_prompt("First name").interact_text()?;
    let last_name: String = Input::new().with_prompt("Last name").interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords don't match")
        .interact()?;

    let admin = NewAdmin {
        email,
        password,
        first_name,
        last_name,
    };

    report_created(create_admin(db, &admin).await, &admin.email);
    Ok(())
}

fn report_created(result: Result<Uuid, AdminError>, email: &str) {
    match result {
        Ok(_) => println!("✅ Admin user {email} created successfully!"),
        Err(e @ AdminError::DuplicateUser(_)) => eprintln!("❌ {e}"),
        Err(e) => eprintln!("❌ Error creating admin user: {e}"),
    }
}

pub fn print_users(users: &[UserSummary]) {
    println!("\n{}", "=".repeat(70));
    println!("USERS");
    println!("{}", "=".repeat(70));
    for (i, user) in users.iter().enumerate() {
        println!(
            "{:2}. {:<35} ({} {})",
            i + 1,
            user.email,
            user.first_name,
            user.last_name
        );
        println!("    Roles: {}", user.roles);
    }
    println!("{}", "=".repeat(70));
}

async fn grant_interactive(db: &PgPool) -> anyhow::Result<()> {
    let users = match list_users(db).await {
        Ok(users) => users,
        Err(e) => {
            eprintln!("❌ Error listing users: {e}");
            return Ok(());
        }
    };

    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }

    print_users(&users);

    let raw: String = Input::new()
        .with_prompt(format!("Select user number (1-{})", users.len()))
        .interact_text()?;

    let index = match raw.trim().parse::<usize>() {
        Ok(n) if (1..=users.len()).contains(&n) => n - 1,
        _ => {
            eprintln!("❌ Invalid selection");
            return Ok(());
        }
    };

    let user = &users[index];

    let confirmed = Confirm::new()
        .with_prompt(format!("Make {} an admin?", user.email))
        .default(false)
        .interact()?;

    if !confirmed {
        return Ok(());
    }

    report_granted(grant_admin(db, user.id).await, &user.email);
    Ok(())
}

pub fn report_granted(result: Result<bool, AdminError>, user: &str) {
    match result {
        Ok(true) => println!("✅ Admin role granted to {user}"),
        Ok(false) => println!("✅ {user} already has the admin role"),
        Err(e) => eprintln!("❌ Error granting admin role: {e}"),
    }
}
