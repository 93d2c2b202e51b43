//! Admin command handlers: platform statistics and user management.
//!
//! `main` has already checked the admin role before any of these run; the
//! remaining guard here is that an admin cannot change their own role.

use chrono::Utc;
use clap::Subcommand;

use synvo_client::SynvoClient;
use synvo_core::service::parse_timestamp;
use synvo_core::stats::AdminStats;
use synvo_core::user::{display_role, Session, UserRecord, ADMIN_ROLE, DEFAULT_ROLE};

/// Sub-commands available under `admin`.
#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Platform-wide statistics
    Stats,
    /// List registered users
    Users,
    /// Change a user's role
    SetRole {
        /// Email of the account to change
        #[arg(long)]
        email: String,
        /// New role: user or admin
        #[arg(long)]
        role: String,
    },
}

fn joined(user: &UserRecord) -> String {
    user.created_at
        .as_deref()
        .and_then(parse_timestamp)
        .map_or_else(
            || "\u{2014}".to_string(),
            |dt| dt.format("%Y-%m-%d").to_string(),
        )
}

/// Print the marketplace-wide overview statistics.
///
/// The three collections are fetched concurrently; any single failure fails
/// the whole command.
///
/// # Errors
///
/// Returns an error if any of the three fetches fails.
pub(crate) async fn run_stats(client: &SynvoClient) -> anyhow::Result<()> {
    let (users, services, bookings) = tokio::try_join!(
        client.list_users(),
        client.list_services(),
        client.list_bookings()
    )?;
    let stats = AdminStats::compute(&users, &services, &bookings, Utc::now().date_naive());

    println!("Marketplace overview");
    println!();
    println!("Users:     {}", stats.total_users);
    println!("Services:  {}", stats.total_services);
    println!("Bookings:  {}", stats.total_bookings);
    println!("Revenue:   ${}", stats.total_revenue);

    if !stats.users_by_role.is_empty() {
        println!();
        println!("Users by role:");
        for (role, count) in &stats.users_by_role {
            println!("  {role:<12}{count:>4}");
        }
    }

    if !stats.top_categories.is_empty() {
        println!();
        println!("Top categories:");
        for (category, count) in &stats.top_categories {
            println!("  {category:<20}{count:>4}");
        }
    }

    println!();
    println!("Bookings this week:");
    for (day, count) in &stats.bookings_last_week {
        println!("  {day:<8}{count:>4}");
    }

    if !stats.recent_users.is_empty() {
        println!();
        println!("Recent users:");
        for user in &stats.recent_users {
            println!(
                "  {} ({})",
                user.email.as_deref().unwrap_or("\u{2014}"),
                display_role(user.effective_role())
            );
        }
    }

    Ok(())
}

/// Print every registered user as a table.
///
/// # Errors
///
/// Returns an error if the fetch fails.
pub(crate) async fn run_users(client: &SynvoClient) -> anyhow::Result<()> {
    let users = client.list_users().await?;
    if users.is_empty() {
        println!("no registered users");
        return Ok(());
    }

    let header = format!("{:<32}{:<22}{:<8}JOINED", "EMAIL", "NAME", "ROLE");
    println!("{header}");
    for user in &users {
        println!(
            "{:<32}{:<22}{:<8}{}",
            user.email.as_deref().unwrap_or("\u{2014}"),
            user.name_label(),
            user.effective_role(),
            joined(user)
        );
    }

    Ok(())
}

/// Change a user's role, refusing self-demotion.
///
/// # Errors
///
/// Returns an error if the role is not `user` or `admin`, the target is the
/// signed-in admin, or the update request fails.
pub(crate) async fn run_set_role(
    client: &SynvoClient,
    session: &Session,
    email: &str,
    role: &str,
) -> anyhow::Result<()> {
    if role != DEFAULT_ROLE && role != ADMIN_ROLE {
        return Err(anyhow::anyhow!(
            "role must be '{DEFAULT_ROLE}' or '{ADMIN_ROLE}', got '{role}'"
        ));
    }
    if email == session.email {
        return Err(anyhow::anyhow!("you cannot change your own role"));
    }
    client.update_user_role(email, role).await?;
    println!("set role of {email} to {role}");
    Ok(())
}
