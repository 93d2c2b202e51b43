//! Booking records and the placement guards.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::service::{non_empty, parse_timestamp, LooseNumber, RecordId, ServiceRecord};
use crate::user::Session;

/// Status stamped on newly placed bookings.
pub const DEFAULT_BOOKING_STATUS: &str = "Pending";

/// A booking as returned by the `bookings` endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRecord {
    #[serde(rename = "_id", default)]
    pub object_id: Option<RecordId>,
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(rename = "serviceId", default)]
    pub service_id: Option<RecordId>,
    /// Legacy name for the service reference.
    #[serde(rename = "productId", default)]
    pub product_id: Option<RecordId>,
    #[serde(rename = "serviceName", default)]
    pub service_name: Option<String>,
    /// Legacy name for the service name.
    #[serde(rename = "serviceTitle", default)]
    pub service_title: Option<String>,
    #[serde(default)]
    pub price: Option<LooseNumber>,
    #[serde(rename = "clientName", default)]
    pub client_name: Option<String>,
    #[serde(rename = "clientEmail", default)]
    pub client_email: Option<String>,
    #[serde(rename = "providerEmail", default)]
    pub provider_email: Option<String>,
    /// `YYYY-MM-DD` as entered; some records carry full timestamps.
    #[serde(rename = "bookingDate", default)]
    pub booking_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "reviewSubmitted", default)]
    pub review_submitted: Option<bool>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl BookingRecord {
    /// Canonical identifier: `_id` takes precedence over `id`.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.object_id
            .as_ref()
            .or(self.id.as_ref())
            .map(RecordId::to_text)
    }

    /// Referenced service id: `serviceId` over the legacy `productId`.
    #[must_use]
    pub fn service_ref(&self) -> Option<String> {
        self.service_id
            .as_ref()
            .or(self.product_id.as_ref())
            .map(RecordId::to_text)
    }

    /// Service name for display, ending in `"Untitled"`.
    #[must_use]
    pub fn effective_service_name(&self) -> &str {
        non_empty(&self.service_name)
            .or_else(|| non_empty(&self.service_title))
            .unwrap_or("Untitled")
    }

    #[must_use]
    pub fn effective_price(&self) -> f64 {
        self.price.as_ref().map_or(0.0, LooseNumber::as_f64)
    }

    #[must_use]
    pub fn effective_status(&self) -> &str {
        non_empty(&self.status).unwrap_or(DEFAULT_BOOKING_STATUS)
    }

    /// Calendar day of the booking. Accepts `YYYY-MM-DD` or a full RFC 3339
    /// timestamp; anything else is `None`.
    #[must_use]
    pub fn booking_day(&self) -> Option<NaiveDate> {
        let raw = self.booking_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| parse_timestamp(raw).map(|dt| dt.date_naive()))
    }
}

/// Rejections when placing a booking.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("you cannot book your own service")]
    OwnService,
    #[error("service record has no identifier")]
    MissingServiceId,
    #[error("a booking date is required")]
    MissingDate,
}

/// Payload posted to `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub service_id: String,
    pub service_name: String,
    pub price: f64,
    pub client_name: String,
    pub client_email: String,
    pub provider_email: String,
    pub booking_date: String,
    pub notes: String,
    pub status: String,
    pub created_at: String,
}

impl NewBooking {
    /// Builds the booking payload for `service` on behalf of the session.
    ///
    /// # Errors
    ///
    /// Guards run in order: the session may not own the service, the service
    /// must carry an identifier, and a booking date is required.
    pub fn for_service(
        service: &ServiceRecord,
        session: &Session,
        booking_date: &str,
        notes: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, BookingError> {
        if service.provider_email.as_deref() == Some(session.email.as_str()) {
            return Err(BookingError::OwnService);
        }
        let service_id = service.id().ok_or(BookingError::MissingServiceId)?;
        let booking_date = booking_date.trim();
        if booking_date.is_empty() {
            return Err(BookingError::MissingDate);
        }
        Ok(Self {
            service_id,
            service_name: service.effective_name().to_string(),
            price: service.effective_price(),
            client_name: session.display_name.clone().unwrap_or_default(),
            client_email: session.email.clone(),
            provider_email: service.provider_email.clone().unwrap_or_default(),
            booking_date: booking_date.to_string(),
            notes: notes.to_string(),
            status: DEFAULT_BOOKING_STATUS.to_string(),
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}
