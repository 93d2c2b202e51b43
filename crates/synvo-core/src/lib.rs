use thiserror::Error;

pub mod app_config;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod review;
pub mod service;
pub mod stats;
pub mod user;

pub use app_config::AppConfig;
pub use booking::{BookingError, BookingRecord, NewBooking, DEFAULT_BOOKING_STATUS};
pub use catalog::{
    derive_facets, CatalogCriteria, CatalogFeatures, CatalogPage, CatalogView, Facets, SortMode,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use review::{average_rating, NewReview, ReviewError, ReviewRecord};
pub use service::{
    parse_timestamp, ListingError, ListingForm, LooseNumber, NewService, RecordId, ServiceRecord,
    ServiceUpdate,
};
pub use stats::{AdminStats, ProviderStats};
pub use user::{display_role, ProfileUpdate, RoleUpdate, Session, UserRecord};

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    /// An environment variable was set but its value could not be parsed.
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
