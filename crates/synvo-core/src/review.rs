//! Review records, submission payloads, and the displayed-rating rule.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::booking::BookingRecord;
use crate::service::{non_empty, LooseNumber, RecordId, ServiceRecord};
use crate::user::Session;

/// Highest rating a review may carry.
pub const MAX_RATING: u8 = 5;

/// A review as returned by `GET /products/{id}/reviews`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "_id", default)]
    pub object_id: Option<RecordId>,
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(rename = "bookingId", default)]
    pub booking_id: Option<RecordId>,
    #[serde(rename = "clientName", default)]
    pub client_name: Option<String>,
    #[serde(rename = "clientEmail", default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub rating: Option<LooseNumber>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl ReviewRecord {
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.object_id
            .as_ref()
            .or(self.id.as_ref())
            .map(RecordId::to_text)
    }

    /// Rating as a number; 0 when missing or unparseable.
    #[must_use]
    pub fn effective_rating(&self) -> f64 {
        self.rating.as_ref().map_or(0.0, LooseNumber::as_f64)
    }

    /// Attribution line: client name, else email, else `"Client"`.
    #[must_use]
    pub fn reviewer_label(&self) -> &str {
        non_empty(&self.client_name)
            .or_else(|| non_empty(&self.client_email))
            .unwrap_or("Client")
    }
}

/// Why a review submission was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,
}

/// Payload posted to `POST /products/{id}/reviews`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub booking_id: String,
    pub client_email: String,
    pub client_name: String,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    /// Builds the review payload for a booking.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::RatingOutOfRange`] unless the rating is
    /// between 1 and [`MAX_RATING`] inclusive.
    pub fn for_booking(
        booking: &BookingRecord,
        session: &Session,
        rating: u8,
        comment: &str,
    ) -> Result<Self, ReviewError> {
        if !(1..=MAX_RATING).contains(&rating) {
            return Err(ReviewError::RatingOutOfRange);
        }
        Ok(Self {
            booking_id: booking.id().unwrap_or_default(),
            client_email: session.email.clone(),
            client_name: session.display_name.clone().unwrap_or_default(),
            rating,
            comment: comment.to_string(),
        })
    }
}

/// Rating shown for a service: the stored aggregate when present and
/// non-zero, otherwise the mean of the fetched reviews rounded to one
/// decimal place, or 0 with no reviews at all.
#[must_use]
pub fn average_rating(service: &ServiceRecord, reviews: &[ReviewRecord]) -> f64 {
    if let Some(stored) = service.stored_rating() {
        // A stored zero or NaN falls through to the computed mean.
        if stored.abs() > 0.0 {
            return stored;
        }
    }
    if reviews.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = reviews.len() as f64;
    let total: f64 = reviews.iter().map(ReviewRecord::effective_rating).sum();
    (total / count * 10.0).round() / 10.0
}
