//! HTTP client for the marketplace data API.
//!
//! Wraps `reqwest` with the API's shape quirks: list endpoints answer with
//! bare arrays or keyed objects, a missing reviews collection is a 404, and
//! the role lookup never fails the caller.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode, Url};

use synvo_core::app_config::DEFAULT_API_BASE;
use synvo_core::booking::{BookingRecord, NewBooking};
use synvo_core::review::{NewReview, ReviewRecord};
use synvo_core::service::{NewService, ServiceRecord, ServiceUpdate};
use synvo_core::user::{ProfileUpdate, RoleUpdate, UserRecord, DEFAULT_ROLE};

use crate::error::ClientError;
use crate::normalize::{records_from, BOOKING_KEYS, REVIEW_KEYS, SERVICE_KEYS, USER_KEYS};

/// Characters percent-encoded in path segments carrying caller data.
///
/// Everything non-alphanumeric except `- _ . ! ~ * ' ( )`, the set
/// JavaScript's `encodeURIComponent` leaves bare.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// Client for the marketplace data API.
///
/// Use [`SynvoClient::new`] for the production deployment or
/// [`SynvoClient::with_base_url`] to point at a mock server in tests.
pub struct SynvoClient {
    client: Client,
    base_url: Url,
}

impl SynvoClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ClientError> {
        Self::with_base_url(timeout_secs, DEFAULT_API_BASE)
    }

    /// Creates a client with a custom base URL (for testing with wiremock,
    /// or a self-hosted API).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::Url`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("synvo/0.1 (marketplace-cli)")
            .build()?;

        // Normalise: the base URL must end with exactly one slash so that
        // join() appends to the path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ClientError::Url(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Fetches the full service catalog.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body is not valid JSON.
    pub async fn list_services(&self) -> Result<Vec<ServiceRecord>, ClientError> {
        let url = self.endpoint("products")?;
        let body = self.get_json(&url).await?;
        Ok(records_from(body, SERVICE_KEYS))
    }

    /// Fetches the listings owned by one provider.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body is not valid JSON.
    pub async fn services_by_provider(
        &self,
        provider_email: &str,
    ) -> Result<Vec<ServiceRecord>, ClientError> {
        let url = self.endpoint_with("products", &[("providerEmail", provider_email)])?;
        let body = self.get_json(&url).await?;
        Ok(records_from(body, SERVICE_KEYS))
    }

    /// Fetches the server-side top-rated strip.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body is not valid JSON.
    pub async fn featured_services(&self, limit: usize) -> Result<Vec<ServiceRecord>, ClientError> {
        let url = self.endpoint_with(
            "products",
            &[("sortBy", "rating"), ("limit", &limit.to_string())],
        )?;
        let body = self.get_json(&url).await?;
        Ok(records_from(body, SERVICE_KEYS))
    }

    /// Fetches one listing by id.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status
    ///   (including 404 for an unknown id).
    /// - [`ClientError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_service(&self, id: &str) -> Result<ServiceRecord, ClientError> {
        let url = self.endpoint(&format!("products/{}", encode_segment(id)))?;
        let body = self.get_json(&url).await?;
        serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
            context: format!("getService(id={id})"),
            source: e,
        })
    }

    /// Creates a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure or non-2xx status.
    pub async fn create_service(&self, listing: &NewService) -> Result<(), ClientError> {
        let url = self.endpoint("products")?;
        self.send_ok(self.client.post(url).json(listing)).await
    }

    /// Updates a listing with the full field set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure or non-2xx status.
    pub async fn update_service(
        &self,
        id: &str,
        update: &ServiceUpdate,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("products/{}", encode_segment(id)))?;
        self.send_ok(self.client.patch(url).json(update)).await
    }

    /// Deletes a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure or non-2xx status.
    pub async fn delete_service(&self, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("products/{}", encode_segment(id)))?;
        self.send_ok(self.client.delete(url)).await
    }

    /// Fetches the reviews for a listing. A 404 means the listing has no
    /// reviews yet and yields the empty list, not an error.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or a non-2xx status other
    ///   than 404.
    /// - [`ClientError::Deserialize`] if the body is not valid JSON.
    pub async fn service_reviews(&self, service_id: &str) -> Result<Vec<ReviewRecord>, ClientError> {
        let url = self.endpoint(&format!("products/{}/reviews", encode_segment(service_id)))?;
        let response = self.client.get(url.clone()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let body: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        Ok(records_from(body, REVIEW_KEYS))
    }

    /// Submits a review for a listing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure or non-2xx status.
    pub async fn submit_review(
        &self,
        service_id: &str,
        review: &NewReview,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("products/{}/reviews", encode_segment(service_id)))?;
        self.send_ok(self.client.post(url).json(review)).await
    }

    /// Fetches every booking.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body is not valid JSON.
    pub async fn list_bookings(&self) -> Result<Vec<BookingRecord>, ClientError> {
        let url = self.endpoint("bookings")?;
        let body = self.get_json(&url).await?;
        Ok(records_from(body, BOOKING_KEYS))
    }

    /// Fetches the bookings placed by one client.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body is not valid JSON.
    pub async fn bookings_by_client(
        &self,
        client_email: &str,
    ) -> Result<Vec<BookingRecord>, ClientError> {
        let url = self.endpoint_with("bookings", &[("clientEmail", client_email)])?;
        let body = self.get_json(&url).await?;
        Ok(records_from(body, BOOKING_KEYS))
    }

    /// Places a booking.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure or non-2xx status.
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<(), ClientError> {
        let url = self.endpoint("bookings")?;
        self.send_ok(self.client.post(url).json(booking)).await
    }

    /// Cancels a booking.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure or non-2xx status.
    pub async fn cancel_booking(&self, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("bookings/{}", encode_segment(id)))?;
        self.send_ok(self.client.delete(url)).await
    }

    /// Fetches every user.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body is not valid JSON.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        let url = self.endpoint("users")?;
        let body = self.get_json(&url).await?;
        Ok(records_from(body, USER_KEYS))
    }

    /// Fetches one user by email.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_user(&self, email: &str) -> Result<UserRecord, ClientError> {
        let url = self.endpoint(&format!("users/{}", encode_segment(email)))?;
        let body = self.get_json(&url).await?;
        serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
            context: format!("getUser(email={email})"),
            source: e,
        })
    }

    /// Changes a user's role.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure or non-2xx status.
    pub async fn update_user_role(&self, email: &str, role: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("users/{}", encode_segment(email)))?;
        let payload = RoleUpdate {
            role: role.to_string(),
        };
        self.send_ok(self.client.patch(url).json(&payload)).await
    }

    /// Updates a user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure or non-2xx status.
    pub async fn update_profile(
        &self,
        email: &str,
        profile: &ProfileUpdate,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("users/{}", encode_segment(email)))?;
        self.send_ok(self.client.patch(url).json(profile)).await
    }

    /// Stored role for `email`, or `"user"` when the record has none or the
    /// lookup fails for any reason. Failures are logged, never propagated.
    pub async fn resolve_role(&self, email: &str) -> String {
        match self.get_user(email).await {
            Ok(user) => user.effective_role().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, email, "role lookup failed, assuming default role");
                DEFAULT_ROLE.to_string()
            }
        }
    }

    /// Resolves `path` (already percent-encoded where needed) against the
    /// base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Url(format!("invalid endpoint '{path}': {e}")))
    }

    /// Resolves `path` and appends percent-encoded query parameters.
    fn endpoint_with(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = self.endpoint(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body
    /// as JSON.
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Sends a prepared request and asserts a 2xx HTTP status, discarding
    /// the response body.
    async fn send_ok(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        request.send().await?.error_for_status()?;
        Ok(())
    }
}
