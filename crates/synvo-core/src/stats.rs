//! Aggregate statistics for the provider and admin dashboards.

use chrono::{Days, NaiveDate};

use crate::booking::BookingRecord;
use crate::service::{parse_timestamp, ServiceRecord, DEFAULT_STATUS};
use crate::user::{display_role, UserRecord};

/// Price bucket labels, in ascending bound order.
pub const PRICE_BUCKETS: [&str; 5] = ["$0-50", "$51-100", "$101-200", "$201-500", "$500+"];

fn bucket_index(price: f64) -> usize {
    if price <= 50.0 {
        0
    } else if price <= 100.0 {
        1
    } else if price <= 200.0 {
        2
    } else if price <= 500.0 {
        3
    } else {
        4
    }
}

/// Increments `key` in a first-seen-ordered tally.
fn tally(entries: &mut Vec<(String, usize)>, key: &str) {
    if let Some(entry) = entries.iter_mut().find(|(k, _)| k == key) {
        entry.1 += 1;
    } else {
        entries.push((key.to_string(), 1));
    }
}

/// Provider-dashboard aggregates over the provider's listings and the
/// session's bookings.
#[derive(Debug, Clone)]
pub struct ProviderStats {
    pub total_services: usize,
    pub active_services: usize,
    pub total_bookings: usize,
    pub total_revenue: f64,
    /// Listings per effective category, first-seen order.
    pub services_by_category: Vec<(String, usize)>,
    /// Listing counts per price bucket, one entry per [`PRICE_BUCKETS`] label.
    pub price_buckets: Vec<(String, usize)>,
    /// Bookings per `YYYY-MM` key, ascending, at most the last 6 months.
    pub bookings_by_month: Vec<(String, usize)>,
    /// Newest listings first (missing dates sort last), at most 10.
    pub recent_services: Vec<ServiceRecord>,
}

impl ProviderStats {
    #[must_use]
    pub fn compute(services: &[ServiceRecord], bookings: &[BookingRecord]) -> Self {
        // Strict comparison: a record without a status is not counted active.
        let active_services = services
            .iter()
            .filter(|s| s.status.as_deref() == Some(DEFAULT_STATUS))
            .count();

        let total_revenue = services
            .iter()
            .map(|service| {
                let Some(id) = service.id() else { return 0.0 };
                let count = bookings
                    .iter()
                    .filter(|b| b.service_ref().as_deref() == Some(id.as_str()))
                    .count();
                #[allow(clippy::cast_precision_loss)]
                let count = count as f64;
                service.effective_price() * count
            })
            .sum();

        let mut services_by_category = Vec::new();
        let mut price_buckets: Vec<(String, usize)> = PRICE_BUCKETS
            .iter()
            .map(|label| ((*label).to_string(), 0))
            .collect();
        for service in services {
            tally(&mut services_by_category, service.effective_category());
            price_buckets[bucket_index(service.effective_price())].1 += 1;
        }

        let mut monthly: Vec<(String, usize)> = Vec::new();
        for booking in bookings {
            if let Some(day) = booking.booking_day() {
                tally(&mut monthly, &day.format("%Y-%m").to_string());
            }
        }
        monthly.sort_by(|a, b| a.0.cmp(&b.0));
        let bookings_by_month = if monthly.len() > 6 {
            monthly.split_off(monthly.len() - 6)
        } else {
            monthly
        };

        let mut by_created: Vec<&ServiceRecord> = services.iter().collect();
        by_created.sort_by(|a, b| {
            let a_ts = a.created_at.as_deref().and_then(parse_timestamp);
            let b_ts = b.created_at.as_deref().and_then(parse_timestamp);
            b_ts.cmp(&a_ts)
        });
        let recent_services = by_created.into_iter().take(10).cloned().collect();

        Self {
            total_services: services.len(),
            active_services,
            total_bookings: bookings.len(),
            total_revenue,
            services_by_category,
            price_buckets,
            bookings_by_month,
            recent_services,
        }
    }
}

/// Admin-dashboard aggregates over the whole marketplace.
#[derive(Debug, Clone)]
pub struct AdminStats {
    pub total_users: usize,
    pub total_services: usize,
    pub total_bookings: usize,
    pub total_revenue: f64,
    /// Users per role, first-seen order, labels capitalized.
    pub users_by_role: Vec<(String, usize)>,
    /// Top five categories by listing count, descending; ties keep
    /// first-seen order.
    pub top_categories: Vec<(String, usize)>,
    /// Bookings per day over the trailing week including `today`, oldest
    /// first, zero-filled, labeled like `Aug 25`.
    pub bookings_last_week: Vec<(String, usize)>,
    /// First 20 users in fetch order.
    pub recent_users: Vec<UserRecord>,
}

impl AdminStats {
    #[must_use]
    pub fn compute(
        users: &[UserRecord],
        services: &[ServiceRecord],
        bookings: &[BookingRecord],
        today: NaiveDate,
    ) -> Self {
        let total_revenue = bookings
            .iter()
            .map(|booking| {
                let Some(service_id) = booking.service_ref() else {
                    return 0.0;
                };
                services
                    .iter()
                    .find(|s| s.id().as_deref() == Some(service_id.as_str()))
                    .map_or(0.0, ServiceRecord::effective_price)
            })
            .sum();

        let mut roles = Vec::new();
        for user in users {
            tally(&mut roles, user.effective_role());
        }
        let users_by_role = roles
            .into_iter()
            .map(|(role, count)| (display_role(&role), count))
            .collect();

        let mut top_categories = Vec::new();
        for service in services {
            tally(&mut top_categories, service.effective_category());
        }
        top_categories.sort_by(|a, b| b.1.cmp(&a.1));
        top_categories.truncate(5);

        let bookings_last_week = (0u64..7)
            .rev()
            .map(|back| {
                let day = today - Days::new(back);
                let count = bookings
                    .iter()
                    .filter(|b| b.booking_day() == Some(day))
                    .count();
                (day.format("%b %-d").to_string(), count)
            })
            .collect();

        let recent_users = users.iter().take(20).cloned().collect();

        Self {
            total_users: users.len(),
            total_services: services.len(),
            total_bookings: bookings.len(),
            total_revenue,
            users_by_role,
            top_categories,
            bookings_last_week,
            recent_users,
        }
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
