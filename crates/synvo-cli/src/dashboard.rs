//! Provider dashboard command handler.

use synvo_client::SynvoClient;
use synvo_core::stats::ProviderStats;
use synvo_core::user::Session;

/// Print the provider overview: listing and booking totals, revenue, and
/// the category, price, and monthly breakdowns.
///
/// # Errors
///
/// Returns an error if either fetch fails.
pub(crate) async fn run_dashboard(client: &SynvoClient, session: &Session) -> anyhow::Result<()> {
    let services = client.services_by_provider(&session.email).await?;
    let bookings = client.bookings_by_client(&session.email).await?;
    let stats = ProviderStats::compute(&services, &bookings);

    println!("Dashboard for {}", session.email);
    println!();
    println!(
        "Services:  {} total, {} active",
        stats.total_services, stats.active_services
    );
    println!("Bookings:  {}", stats.total_bookings);
    println!("Revenue:   ${}", stats.total_revenue);

    if !stats.services_by_category.is_empty() {
        println!();
        println!("Services by category:");
        for (category, count) in &stats.services_by_category {
            println!("  {category:<20}{count:>4}");
        }
    }

    println!();
    println!("Price distribution:");
    for (bucket, count) in &stats.price_buckets {
        println!("  {bucket:<20}{count:>4}");
    }

    if !stats.bookings_by_month.is_empty() {
        println!();
        println!("Bookings by month:");
        for (month, count) in &stats.bookings_by_month {
            println!("  {month:<20}{count:>4}");
        }
    }

    if !stats.recent_services.is_empty() {
        println!();
        println!("Recent services:");
        for service in &stats.recent_services {
            println!(
                "  {} ({}, ${})",
                service.effective_name(),
                service.effective_status(),
                service.effective_price()
            );
        }
    }

    Ok(())
}
