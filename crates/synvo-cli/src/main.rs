use clap::{Parser, Subcommand};
use synvo_client::SynvoClient;
use synvo_core::load_app_config;
use tracing_subscriber::EnvFilter;

mod admin;
mod bookings;
mod dashboard;
mod profile;
mod services;
mod session;

#[cfg(test)]
mod tests;

use admin::AdminCommands;
use bookings::BookingsCommands;
use profile::ProfileCommands;
use services::ServicesCommands;

#[derive(Debug, Parser)]
#[command(name = "synvo")]
#[command(about = "Service marketplace command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse and manage service listings
    Services {
        #[command(subcommand)]
        command: ServicesCommands,
    },
    /// Place and manage bookings
    Bookings {
        #[command(subcommand)]
        command: BookingsCommands,
    },
    /// Provider overview statistics
    Dashboard,
    /// Platform statistics and user management (admin role required)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Show and update the signed-in profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_app_config()?;

    // RUST_LOG wins over the configured default level.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("no command given; try `synvo services browse` or `synvo --help`");
        return Ok(());
    };

    let client = SynvoClient::with_base_url(config.request_timeout_secs, &config.api_base)
        .map_err(|e| anyhow::anyhow!("failed to build API client: {e}"))?;

    match command {
        Commands::Services { command } => match command {
            ServicesCommands::Browse {
                query,
                category,
                location,
                min_price,
                max_price,
                sort,
                page,
                page_size,
                simple,
            } => {
                services::run_browse(
                    &client,
                    page_size.unwrap_or(config.page_size),
                    &query,
                    &category,
                    &location,
                    min_price.as_deref(),
                    max_price.as_deref(),
                    &sort,
                    page,
                    simple,
                )
                .await
            }
            ServicesCommands::Featured { limit } => services::run_featured(&client, limit).await,
            ServicesCommands::Show { id } => services::run_show(&client, &id).await,
            ServicesCommands::Add {
                name,
                description,
                price,
                category,
                location,
                image,
                status,
            } => {
                let session = session::require_session(&client, &config).await?;
                services::run_add(
                    &client,
                    &session,
                    name,
                    description,
                    price,
                    category,
                    location,
                    image,
                    status,
                )
                .await
            }
            ServicesCommands::Update {
                id,
                title,
                description,
                price,
                category,
                status,
                image,
                duration,
                location,
            } => {
                services::run_update(
                    &client,
                    &id,
                    title,
                    description,
                    price,
                    category,
                    status,
                    image,
                    duration,
                    location,
                )
                .await
            }
            ServicesCommands::Delete { id } => services::run_delete(&client, &id).await,
            ServicesCommands::Mine => {
                let session = session::require_session(&client, &config).await?;
                services::run_mine(&client, &session).await
            }
        },
        Commands::Bookings { command } => {
            let session = session::require_session(&client, &config).await?;
            match command {
                BookingsCommands::List => bookings::run_list(&client, &session).await,
                BookingsCommands::Create {
                    service_id,
                    date,
                    notes,
                } => bookings::run_create(&client, &session, &service_id, &date, &notes).await,
                BookingsCommands::Cancel { booking_id } => {
                    bookings::run_cancel(&client, &booking_id).await
                }
                BookingsCommands::Review {
                    booking_id,
                    rating,
                    comment,
                } => bookings::run_review(&client, &session, &booking_id, rating, &comment).await,
            }
        }
        Commands::Dashboard => {
            let session = session::require_session(&client, &config).await?;
            dashboard::run_dashboard(&client, &session).await
        }
        Commands::Admin { command } => {
            let session = session::require_admin(&client, &config).await?;
            match command {
                AdminCommands::Stats => admin::run_stats(&client).await,
                AdminCommands::Users => admin::run_users(&client).await,
                AdminCommands::SetRole { email, role } => {
                    admin::run_set_role(&client, &session, &email, &role).await
                }
            }
        }
        Commands::Profile { command } => {
            let session = session::require_session(&client, &config).await?;
            match command {
                ProfileCommands::Show => profile::run_show(&client, &session).await,
                ProfileCommands::Update { name, photo_url } => {
                    profile::run_update(&client, &session, name, photo_url).await
                }
            }
        }
    }
}
