//! Profile command handlers for the signed-in account.

use clap::Subcommand;

use synvo_client::SynvoClient;
use synvo_core::service::parse_timestamp;
use synvo_core::user::{display_role, ProfileUpdate, Session};

/// Sub-commands available under `profile`.
#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show the signed-in profile
    Show,
    /// Update profile fields
    Update {
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New avatar image URL
        #[arg(long)]
        photo_url: Option<String>,
    },
}

/// Print the stored record for the signed-in account.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub(crate) async fn run_show(client: &SynvoClient, session: &Session) -> anyhow::Result<()> {
    let user = client.get_user(&session.email).await?;

    println!(
        "Email:  {}",
        user.email.as_deref().unwrap_or(session.email.as_str())
    );
    let name = user.name_label();
    println!("Name:   {}", if name.is_empty() { "\u{2014}" } else { name });
    println!("Role:   {}", display_role(user.effective_role()));
    let joined = user
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .map_or_else(
            || "\u{2014}".to_string(),
            |dt| dt.format("%Y-%m-%d").to_string(),
        );
    println!("Joined: {joined}");
    if let Some(photo) = user.photo_url.as_deref().filter(|p| !p.is_empty()) {
        println!("Photo:  {photo}");
    }

    Ok(())
}

/// Update the account's name and photo, keeping unspecified fields as
/// stored. The API expects the full field set, so the current record is
/// fetched first.
///
/// # Errors
///
/// Returns an error if neither flag is passed, the current record cannot be
/// fetched, or the update request fails.
pub(crate) async fn run_update(
    client: &SynvoClient,
    session: &Session,
    name: Option<String>,
    photo_url: Option<String>,
) -> anyhow::Result<()> {
    if name.is_none() && photo_url.is_none() {
        return Err(anyhow::anyhow!(
            "nothing to update; pass --name and/or --photo-url"
        ));
    }

    let current = client.get_user(&session.email).await?;
    let update = ProfileUpdate {
        name: name.unwrap_or_else(|| current.name_label().to_string()),
        photo_url: photo_url
            .or_else(|| current.photo_url.clone())
            .unwrap_or_default(),
    };
    client.update_profile(&session.email, &update).await?;
    println!("profile updated for {}", session.email);
    Ok(())
}
