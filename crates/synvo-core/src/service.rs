//! Service (listing) records as the marketplace API delivers them.
//!
//! The API is lenient about shape: identifiers arrive as Mongo-export
//! objects, plain strings, or integers; prices as numbers or strings; most
//! fields may be missing outright. Records deserialize permissively and the
//! `effective_*` accessors apply the fallback chains consumers rely on.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::user::Session;

/// Category substituted when a record carries neither `category` nor `type`.
pub const DEFAULT_CATEGORY: &str = "Other";
/// Location substituted when a record carries none.
pub const DEFAULT_LOCATION: &str = "Unknown";
/// Lifecycle status stamped on new listings and substituted when absent.
pub const DEFAULT_STATUS: &str = "Active";
/// Image URL substituted when a listing is created without one.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x300?text=Service";

/// Record identifier as found on the wire.
///
/// Mongo exports render `_id` as `{"$oid": "..."}`; other records carry a
/// plain string `_id` or a string/integer `id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// `{"$oid": "64f1..."}`.
    Oid {
        #[serde(rename = "$oid")]
        oid: String,
    },
    /// A plain string id.
    Text(String),
    /// A numeric id, rendered in decimal.
    Int(i64),
}

impl RecordId {
    /// Canonical text form of the identifier.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            RecordId::Oid { oid } => oid.clone(),
            RecordId::Text(s) => s.clone(),
            RecordId::Int(n) => n.to_string(),
        }
    }
}

/// A numeric wire field that may arrive as a number, a numeric string, or
/// something else entirely. Anything unparseable reads as 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl LooseNumber {
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(s) => s.trim().parse().unwrap_or(0.0),
            LooseNumber::Other(_) => 0.0,
        }
    }
}

/// A service listing as returned by the `products` endpoints.
///
/// Every field is optional on the wire; use the `effective_*` accessors for
/// the values that filtering, sorting, and display actually work with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceRecord {
    #[serde(rename = "_id", default)]
    pub object_id: Option<RecordId>,
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    /// Older records used `title` instead of `name`.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Older records used `details` instead of `description`.
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Older records used `type` instead of `category`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price: Option<LooseNumber>,
    #[serde(rename = "providerName", default)]
    pub provider_name: Option<String>,
    #[serde(rename = "providerEmail", default)]
    pub provider_email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(rename = "averageRating", default)]
    pub average_rating: Option<LooseNumber>,
    #[serde(rename = "reviewCount", default)]
    pub review_count: Option<LooseNumber>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

/// Returns the string when present and non-empty. Whitespace counts as
/// present; only the truly empty string falls through.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ServiceRecord {
    /// Canonical identifier: `_id` takes precedence over `id`.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.object_id
            .as_ref()
            .or(self.id.as_ref())
            .map(RecordId::to_text)
    }

    /// Name used for matching and sorting; empty when the record carries
    /// neither `name` nor `title`.
    #[must_use]
    pub fn effective_name(&self) -> &str {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.title))
            .unwrap_or("")
    }

    #[must_use]
    pub fn effective_description(&self) -> &str {
        non_empty(&self.description)
            .or_else(|| non_empty(&self.details))
            .unwrap_or("")
    }

    /// Category facet value, via the legacy `type` field when needed.
    #[must_use]
    pub fn effective_category(&self) -> &str {
        non_empty(&self.category)
            .or_else(|| non_empty(&self.kind))
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Location facet value.
    #[must_use]
    pub fn effective_location(&self) -> &str {
        non_empty(&self.location).unwrap_or(DEFAULT_LOCATION)
    }

    #[must_use]
    pub fn effective_provider_name(&self) -> &str {
        non_empty(&self.provider_name).unwrap_or("")
    }

    /// Category as displayed on cards and the detail view, where the
    /// filter pipeline substitutes [`DEFAULT_CATEGORY`].
    #[must_use]
    pub fn display_category(&self) -> &str {
        non_empty(&self.category)
            .or_else(|| non_empty(&self.kind))
            .unwrap_or("General")
    }

    /// Location as displayed, where the filter pipeline substitutes
    /// [`DEFAULT_LOCATION`].
    #[must_use]
    pub fn display_location(&self) -> &str {
        non_empty(&self.location).unwrap_or("N/A")
    }

    /// Provider name as displayed; matching treats a missing name as empty.
    #[must_use]
    pub fn display_provider(&self) -> &str {
        non_empty(&self.provider_name).unwrap_or("Provider")
    }

    /// Numeric price; 0 when missing or unparseable.
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        self.price.as_ref().map_or(0.0, LooseNumber::as_f64)
    }

    #[must_use]
    pub fn effective_status(&self) -> &str {
        non_empty(&self.status).unwrap_or(DEFAULT_STATUS)
    }

    /// Stored aggregate rating, if the API recorded one.
    #[must_use]
    pub fn stored_rating(&self) -> Option<f64> {
        self.average_rating.as_ref().map(LooseNumber::as_f64)
    }

    /// Stored review count when present, otherwise `fetched` (the number of
    /// reviews actually retrieved).
    #[must_use]
    pub fn review_count_or(&self, fetched: usize) -> usize {
        match &self.review_count {
            Some(n) => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let count = n.as_f64().max(0.0) as usize;
                count
            }
            None => fetched,
        }
    }
}

/// Parses an RFC 3339 timestamp (the shape `createdAt` carries); `None` for
/// anything else.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Raw input for a new listing, as collected from the user.
#[derive(Debug, Clone)]
pub struct ListingForm {
    pub name: String,
    pub description: String,
    /// Raw price text; validated to a positive number on submit.
    pub price: String,
    pub category: String,
    pub location: String,
    pub image: String,
    pub status: String,
}

impl Default for ListingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: String::new(),
            location: String::new(),
            image: String::new(),
            status: DEFAULT_STATUS.to_string(),
        }
    }
}

/// Validation failures when assembling a new listing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("service name is required")]
    MissingName,
    #[error("description is required")]
    MissingDescription,
    #[error("valid price (greater than 0) is required")]
    InvalidPrice,
    #[error("category is required")]
    MissingCategory,
    #[error("location is required")]
    MissingLocation,
}

/// Payload posted to `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub location: String,
    pub image: String,
    pub status: String,
    pub provider_email: String,
    pub provider_name: String,
    pub created_at: String,
}

impl NewService {
    /// Validates `form` and assembles the creation payload, stamping the
    /// session's identity and `now` onto it.
    ///
    /// # Errors
    ///
    /// Returns the [`ListingError`] for the first field that fails: blank
    /// name, description, category, or location, or a price that does not
    /// parse to a number greater than zero.
    pub fn from_form(
        form: &ListingForm,
        session: &Session,
        now: DateTime<Utc>,
    ) -> Result<Self, ListingError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(ListingError::MissingName);
        }
        let description = form.description.trim();
        if description.is_empty() {
            return Err(ListingError::MissingDescription);
        }
        let price = form
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| *p > 0.0)
            .ok_or(ListingError::InvalidPrice)?;
        let category = form.category.trim();
        if category.is_empty() {
            return Err(ListingError::MissingCategory);
        }
        let location = form.location.trim();
        if location.is_empty() {
            return Err(ListingError::MissingLocation);
        }
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            location: location.to_string(),
            image: if form.image.is_empty() {
                PLACEHOLDER_IMAGE.to_string()
            } else {
                form.image.clone()
            },
            status: if form.status.is_empty() {
                DEFAULT_STATUS.to_string()
            } else {
                form.status.clone()
            },
            provider_email: session.email.clone(),
            provider_name: session.provider_label().to_string(),
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// Full-field payload for `PATCH /products/{id}`.
///
/// The API overwrites whatever fields it receives, so an update always sends
/// the complete set, prefilled from the current record.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceUpdate {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub status: String,
    pub image: String,
    pub duration: String,
    pub location: String,
}

impl ServiceUpdate {
    /// Prefills every field from an existing record.
    #[must_use]
    pub fn from_record(record: &ServiceRecord) -> Self {
        Self {
            title: non_empty(&record.title)
                .or_else(|| non_empty(&record.name))
                .unwrap_or("")
                .to_string(),
            description: record.effective_description().to_string(),
            price: record.effective_price(),
            category: non_empty(&record.category)
                .or_else(|| non_empty(&record.kind))
                .unwrap_or("")
                .to_string(),
            status: record.effective_status().to_string(),
            image: record.image.clone().unwrap_or_default(),
            duration: record.duration.clone().unwrap_or_default(),
            location: record.location.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ServiceRecord {
        serde_json::from_value(value).unwrap()
    }

    fn session() -> Session {
        Session {
            email: "provider@example.com".to_string(),
            display_name: Some("Pat Provider".to_string()),
            role: "user".to_string(),
        }
    }

    #[test]
    fn id_prefers_mongo_object_id() {
        let r = record(json!({"_id": {"$oid": "64f1aa"}, "id": "other"}));
        assert_eq!(r.id().as_deref(), Some("64f1aa"));
    }

    #[test]
    fn id_accepts_string_and_integer_forms() {
        assert_eq!(record(json!({"_id": "abc"})).id().as_deref(), Some("abc"));
        assert_eq!(record(json!({"id": 42})).id().as_deref(), Some("42"));
        assert_eq!(record(json!({})).id(), None);
    }

    #[test]
    fn name_falls_back_to_title() {
        let r = record(json!({"title": "Logo Design"}));
        assert_eq!(r.effective_name(), "Logo Design");
        let r = record(json!({"name": "", "title": "Logo Design"}));
        assert_eq!(r.effective_name(), "Logo Design");
        assert_eq!(record(json!({})).effective_name(), "");
    }

    #[test]
    fn category_chain_ends_in_default() {
        assert_eq!(record(json!({"category": "Design"})).effective_category(), "Design");
        assert_eq!(record(json!({"type": "Dev"})).effective_category(), "Dev");
        assert_eq!(record(json!({})).effective_category(), DEFAULT_CATEGORY);
        assert_eq!(record(json!({})).effective_location(), DEFAULT_LOCATION);
        assert_eq!(record(json!({})).effective_status(), DEFAULT_STATUS);
    }

    #[test]
    fn display_fallbacks_differ_from_filter_defaults() {
        let r = record(json!({}));
        assert_eq!(r.display_category(), "General");
        assert_eq!(r.display_location(), "N/A");
        assert_eq!(r.display_provider(), "Provider");
        let r = record(json!({"type": "Dev", "location": "Dhaka", "providerName": "Pat"}));
        assert_eq!(r.display_category(), "Dev");
        assert_eq!(r.display_location(), "Dhaka");
        assert_eq!(r.display_provider(), "Pat");
    }

    #[test]
    fn price_reads_number_string_or_zero() {
        assert!((record(json!({"price": 150})).effective_price() - 150.0).abs() < f64::EPSILON);
        assert!((record(json!({"price": "49.5"})).effective_price() - 49.5).abs() < f64::EPSILON);
        assert!((record(json!({"price": " 20 "})).effective_price() - 20.0).abs() < f64::EPSILON);
        assert!(record(json!({"price": "free"})).effective_price().abs() < f64::EPSILON);
        assert!(record(json!({"price": {"odd": true}})).effective_price().abs() < f64::EPSILON);
        assert!(record(json!({})).effective_price().abs() < f64::EPSILON);
    }

    #[test]
    fn review_count_falls_back_to_fetched() {
        assert_eq!(record(json!({"reviewCount": 3})).review_count_or(9), 3);
        assert_eq!(record(json!({"reviewCount": 0})).review_count_or(9), 0);
        assert_eq!(record(json!({})).review_count_or(9), 9);
    }

    #[test]
    fn timestamps_parse_rfc3339_only() {
        assert!(parse_timestamp("2026-03-05T10:00:00.000Z").is_some());
        assert!(parse_timestamp("2026-03-05T10:00:00+02:00").is_some());
        assert!(parse_timestamp("2026-03-05").is_none());
        assert!(parse_timestamp("next tuesday").is_none());
    }

    #[test]
    fn new_service_checks_fields_in_form_order() {
        let now = Utc.with_ymd_and_hms(2026, 3, 5, 10, 0, 0).unwrap();
        let mut form = ListingForm {
            name: "  ".to_string(),
            description: "desc".to_string(),
            price: "50".to_string(),
            category: "Design".to_string(),
            location: "Remote".to_string(),
            ..ListingForm::default()
        };
        assert_eq!(
            NewService::from_form(&form, &session(), now),
            Err(ListingError::MissingName)
        );
        form.name = "Logo".to_string();
        form.price = "0".to_string();
        assert_eq!(
            NewService::from_form(&form, &session(), now),
            Err(ListingError::InvalidPrice)
        );
        form.price = "cheap".to_string();
        assert_eq!(
            NewService::from_form(&form, &session(), now),
            Err(ListingError::InvalidPrice)
        );
        form.price = "50".to_string();
        form.category = String::new();
        assert_eq!(
            NewService::from_form(&form, &session(), now),
            Err(ListingError::MissingCategory)
        );
    }

    #[test]
    fn new_service_stamps_defaults_and_session() {
        let now = Utc.with_ymd_and_hms(2026, 3, 5, 10, 0, 0).unwrap();
        let form = ListingForm {
            name: "Logo".to_string(),
            description: "A logo".to_string(),
            price: "75.5".to_string(),
            category: "Design".to_string(),
            location: "Remote".to_string(),
            ..ListingForm::default()
        };
        let payload = NewService::from_form(&form, &session(), now).unwrap();
        assert_eq!(payload.image, PLACEHOLDER_IMAGE);
        assert_eq!(payload.status, DEFAULT_STATUS);
        assert_eq!(payload.provider_email, "provider@example.com");
        assert_eq!(payload.provider_name, "Pat Provider");
        assert_eq!(payload.created_at, "2026-03-05T10:00:00.000Z");
        assert!((payload.price - 75.5).abs() < f64::EPSILON);

        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("providerEmail").is_some());
        assert!(body.get("createdAt").is_some());
    }

    #[test]
    fn anonymous_provider_label_when_no_display_name() {
        let now = Utc.with_ymd_and_hms(2026, 3, 5, 10, 0, 0).unwrap();
        let form = ListingForm {
            name: "Logo".to_string(),
            description: "A logo".to_string(),
            price: "10".to_string(),
            category: "Design".to_string(),
            location: "Remote".to_string(),
            ..ListingForm::default()
        };
        let mut anon = session();
        anon.display_name = None;
        let payload = NewService::from_form(&form, &anon, now).unwrap();
        assert_eq!(payload.provider_name, "Anonymous Provider");
    }

    #[test]
    fn update_prefills_from_record() {
        let r = record(json!({
            "name": "Logo Design",
            "details": "Old-style description",
            "type": "Design",
            "price": "120",
            "image": "https://img.example/logo.png"
        }));
        let update = ServiceUpdate::from_record(&r);
        assert_eq!(update.title, "Logo Design");
        assert_eq!(update.description, "Old-style description");
        assert_eq!(update.category, "Design");
        assert_eq!(update.status, DEFAULT_STATUS);
        assert!((update.price - 120.0).abs() < f64::EPSILON);
        assert_eq!(update.duration, "");
        assert_eq!(update.location, "");
    }
}
