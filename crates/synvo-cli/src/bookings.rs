//! Booking command handlers for the CLI.
//!
//! All of these operate on the signed-in user's own bookings; the ownership
//! and date guards live on the payload builders in the core crate.

use chrono::Utc;
use clap::Subcommand;

use synvo_client::SynvoClient;
use synvo_core::booking::NewBooking;
use synvo_core::review::NewReview;
use synvo_core::user::Session;

use crate::services::truncate;

/// Sub-commands available under `bookings`.
#[derive(Debug, Subcommand)]
pub enum BookingsCommands {
    /// List your bookings
    List,
    /// Book a service
    Create {
        /// Id of the service to book
        service_id: String,
        /// Date for the booking (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Notes for the provider
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Cancel a booking
    Cancel {
        /// Id of the booking to cancel
        booking_id: String,
    },
    /// Review a booked service
    Review {
        /// Id of the booking to review
        booking_id: String,
        /// Star rating from 1 to 5
        #[arg(long)]
        rating: u8,
        /// Review comment
        #[arg(long, default_value = "")]
        comment: String,
    },
}

/// List the session's bookings with their ids.
///
/// # Errors
///
/// Returns an error if the fetch fails.
pub(crate) async fn run_list(client: &SynvoClient, session: &Session) -> anyhow::Result<()> {
    let bookings = client.bookings_by_client(&session.email).await?;
    if bookings.is_empty() {
        println!(
            "no bookings yet for {}; find a service with `synvo services browse`",
            session.email
        );
        return Ok(());
    }

    let header = format!(
        "{:<28}{:<26}{:<12}{:<11}{:>8}  REVIEWED",
        "SERVICE", "ID", "DATE", "STATUS", "PRICE"
    );
    println!("{header}");
    for booking in &bookings {
        let id = booking.id().unwrap_or_else(|| "\u{2014}".to_string());
        let date = booking.booking_date.as_deref().unwrap_or("\u{2014}");
        let reviewed = if booking.review_submitted == Some(true) {
            "yes"
        } else {
            "no"
        };
        println!(
            "{:<28}{:<26}{:<12}{:<11}{:>8}  {reviewed}",
            truncate(booking.effective_service_name(), 25),
            id,
            date,
            booking.effective_status(),
            format!("${}", booking.effective_price())
        );
    }

    Ok(())
}

/// Book a service for the session.
///
/// # Errors
///
/// Returns an error if the service fetch fails, a placement guard rejects
/// the booking (own service, missing service id, missing date), or the
/// create request fails.
pub(crate) async fn run_create(
    client: &SynvoClient,
    session: &Session,
    service_id: &str,
    date: &str,
    notes: &str,
) -> anyhow::Result<()> {
    let service = client.get_service(service_id).await?;
    let booking = NewBooking::for_service(&service, session, date, notes, Utc::now())?;
    client.create_booking(&booking).await?;
    println!("booked '{}' for {}", booking.service_name, booking.booking_date);
    Ok(())
}

/// Cancel a booking by id.
///
/// # Errors
///
/// Returns an error if the delete request fails.
pub(crate) async fn run_cancel(client: &SynvoClient, booking_id: &str) -> anyhow::Result<()> {
    client.cancel_booking(booking_id).await?;
    println!("cancelled booking {booking_id}");
    Ok(())
}

/// Submit a review for one of the session's bookings.
///
/// # Errors
///
/// Returns an error if the booking is not found among the session's
/// bookings, already carries a review, has no service reference, the rating
/// is out of range, or the submit request fails.
pub(crate) async fn run_review(
    client: &SynvoClient,
    session: &Session,
    booking_id: &str,
    rating: u8,
    comment: &str,
) -> anyhow::Result<()> {
    let bookings = client.bookings_by_client(&session.email).await?;
    let booking = bookings
        .iter()
        .find(|b| b.id().as_deref() == Some(booking_id))
        .ok_or_else(|| anyhow::anyhow!("booking '{booking_id}' not found for {}", session.email))?;

    if booking.review_submitted == Some(true) {
        return Err(anyhow::anyhow!("booking '{booking_id}' already has a review"));
    }
    let service_id = booking.service_ref().ok_or_else(|| {
        anyhow::anyhow!("booking '{booking_id}' has no service reference to review")
    })?;

    let review = NewReview::for_booking(booking, session, rating, comment)?;
    client.submit_review(&service_id, &review).await?;
    println!(
        "review submitted for '{}'",
        booking.effective_service_name()
    );
    Ok(())
}
