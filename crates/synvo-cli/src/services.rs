//! Service catalog command handlers for the CLI.
//!
//! Browse fetches the catalog once and runs the whole search, filter, sort,
//! and paging pipeline locally; the remaining subcommands are thin wrappers
//! over the per-listing endpoints.

use chrono::Utc;
use clap::Subcommand;

use synvo_client::SynvoClient;
use synvo_core::catalog::{derive_facets, CatalogFeatures, CatalogView, SortMode};
use synvo_core::review::average_rating;
use synvo_core::service::{ListingForm, NewService, ServiceRecord, ServiceUpdate};
use synvo_core::user::Session;

/// Sub-commands available under `services`.
#[derive(Debug, Subcommand)]
pub enum ServicesCommands {
    /// Browse the catalog with search, filters, sorting, and paging
    Browse {
        /// Case-insensitive search over name, description, and provider
        #[arg(long, default_value = "")]
        query: String,
        /// Category facet ("All" disables the filter)
        #[arg(long, default_value = "All")]
        category: String,
        /// Location facet ("All" disables the filter)
        #[arg(long, default_value = "All")]
        location: String,
        /// Lower price bound, inclusive
        #[arg(long)]
        min_price: Option<String>,
        /// Upper price bound, inclusive
        #[arg(long)]
        max_price: Option<String>,
        /// Sort order: default, price-low, price-high, name-asc, name-desc
        #[arg(long, default_value = "default")]
        sort: String,
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Page size (defaults to SYNVO_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<usize>,
        /// Facet filters only: skip search, price bounds, sorting, and paging
        #[arg(long)]
        simple: bool,
    },
    /// Show the server-side top-rated strip
    Featured {
        /// Maximum number of services to show
        #[arg(long, default_value = "6")]
        limit: usize,
    },
    /// Show one listing with its reviews and rating
    Show {
        /// Listing id
        id: String,
    },
    /// Create a listing owned by the signed-in provider
    Add {
        /// Service name
        #[arg(long)]
        name: String,
        /// Service description
        #[arg(long)]
        description: String,
        /// Price (must be greater than 0)
        #[arg(long)]
        price: String,
        /// Category
        #[arg(long)]
        category: String,
        /// Location
        #[arg(long)]
        location: String,
        /// Image URL (a placeholder is used when omitted)
        #[arg(long, default_value = "")]
        image: String,
        /// Listing status
        #[arg(long, default_value = "Active")]
        status: String,
    },
    /// Update a listing, keeping unspecified fields as stored
    Update {
        /// Listing id
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New price
        #[arg(long)]
        price: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New status
        #[arg(long)]
        status: Option<String>,
        /// New image URL
        #[arg(long)]
        image: Option<String>,
        /// New duration text
        #[arg(long)]
        duration: Option<String>,
        /// New location
        #[arg(long)]
        location: Option<String>,
    },
    /// Delete a listing
    Delete {
        /// Listing id
        id: String,
    },
    /// List the signed-in provider's own listings
    Mine,
}

/// Clips display text to `max` characters, appending `...` when clipped.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

fn print_service_table(records: &[&ServiceRecord]) {
    let header = format!(
        "{:<28}{:<16}{:<14}{:>8}  PROVIDER",
        "SERVICE", "CATEGORY", "LOCATION", "PRICE"
    );
    println!("{header}");
    for service in records {
        println!(
            "{:<28}{:<16}{:<14}{:>8}  {}",
            truncate(service.effective_name(), 25),
            service.display_category(),
            service.display_location(),
            format!("${}", service.effective_price()),
            service.display_provider()
        );
    }
}

/// Fetch the catalog and print one page of it through the filter pipeline.
///
/// # Errors
///
/// Returns an error if the sort mode is unknown or the catalog fetch fails.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn run_browse(
    client: &SynvoClient,
    page_size: usize,
    query: &str,
    category: &str,
    location: &str,
    min_price: Option<&str>,
    max_price: Option<&str>,
    sort: &str,
    page: usize,
    simple: bool,
) -> anyhow::Result<()> {
    let sort = sort.parse::<SortMode>().map_err(|e| anyhow::anyhow!(e))?;

    let records = client.list_services().await?;
    let facets = derive_facets(&records);

    let features = if simple {
        CatalogFeatures::facets_only()
    } else {
        CatalogFeatures::full()
    };
    let mut view = CatalogView::new(features);
    view.criteria.page_size = page_size;
    view.criteria.set_query(query);
    view.criteria.set_category(category);
    view.criteria.set_location(location);
    view.criteria.set_min_price(min_price.unwrap_or(""));
    view.criteria.set_max_price(max_price.unwrap_or(""));
    view.criteria.set_sort(sort);
    view.criteria.set_page(page);

    let shown = view.page(&records);

    println!("Categories: {}", facets.categories.join(", "));
    println!("Locations:  {}", facets.locations.join(", "));
    println!();

    if shown.records.is_empty() {
        println!("no services match the current filters; relax a filter or drop it");
        return Ok(());
    }

    print_service_table(&shown.records);

    if let Some((from, to)) = shown.showing_range() {
        println!();
        println!(
            "Showing {from}-{to} of {} services (page {}/{})",
            shown.total_filtered, shown.page, shown.page_count
        );
    }

    Ok(())
}

/// Print the server-sorted top-rated strip.
///
/// # Errors
///
/// Returns an error if the fetch fails.
pub(crate) async fn run_featured(client: &SynvoClient, limit: usize) -> anyhow::Result<()> {
    let records = client.featured_services(limit).await?;
    if records.is_empty() {
        println!("no featured services yet");
        return Ok(());
    }

    let header = format!(
        "{:<28}{:<16}{:>6}{:>9}  PROVIDER",
        "SERVICE", "CATEGORY", "RATING", "PRICE"
    );
    println!("{header}");
    for service in &records {
        let rating = service
            .stored_rating()
            .map_or_else(|| "\u{2014}".to_string(), |r| format!("{r:.1}"));
        println!(
            "{:<28}{:<16}{:>6}{:>9}  {}",
            truncate(service.effective_name(), 25),
            service.display_category(),
            rating,
            format!("${}", service.effective_price()),
            service.display_provider()
        );
    }

    Ok(())
}

/// Print one listing in full, with its reviews and displayed rating.
///
/// # Errors
///
/// Returns an error if either fetch fails or the id is unknown.
pub(crate) async fn run_show(client: &SynvoClient, id: &str) -> anyhow::Result<()> {
    let service = client.get_service(id).await?;
    let reviews = client.service_reviews(id).await?;

    let rating = average_rating(&service, &reviews);
    let review_count = service.review_count_or(reviews.len());

    println!("{}", service.effective_name());
    let description = service.effective_description();
    if !description.is_empty() {
        println!("{description}");
    }
    println!();
    println!("Category: {}", service.display_category());
    println!("Location: {}", service.display_location());
    println!("Price:    ${}", service.effective_price());
    println!("Status:   {}", service.effective_status());
    println!("Provider: {}", service.display_provider());
    if rating > 0.0 {
        println!("Rating:   {rating:.1}/5 ({review_count} reviews)");
    } else {
        println!("Rating:   no ratings yet");
    }

    if !reviews.is_empty() {
        println!();
        println!("Reviews:");
        for review in &reviews {
            let comment = review.comment.as_deref().unwrap_or("");
            println!(
                "  [{}/5] {}: {comment}",
                review.effective_rating(),
                review.reviewer_label()
            );
        }
    }

    Ok(())
}

/// Validate the form fields and create the listing.
///
/// # Errors
///
/// Returns an error for the first failing validation (blank name,
/// description, category, or location, or a non-positive price) or if the
/// create request fails.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn run_add(
    client: &SynvoClient,
    session: &Session,
    name: String,
    description: String,
    price: String,
    category: String,
    location: String,
    image: String,
    status: String,
) -> anyhow::Result<()> {
    let form = ListingForm {
        name,
        description,
        price,
        category,
        location,
        image,
        status,
    };
    let listing = NewService::from_form(&form, session, Utc::now())?;
    client.create_service(&listing).await?;
    println!(
        "created service '{}' (${}) in {}",
        listing.name, listing.price, listing.category
    );
    Ok(())
}

/// Read-modify-write update: prefill every field from the stored record,
/// then overlay the flags that were passed.
///
/// # Errors
///
/// Returns an error if the record fetch fails, `--price` is not a number,
/// or the update request fails.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn run_update(
    client: &SynvoClient,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    price: Option<String>,
    category: Option<String>,
    status: Option<String>,
    image: Option<String>,
    duration: Option<String>,
    location: Option<String>,
) -> anyhow::Result<()> {
    let service = client.get_service(id).await?;
    let mut update = ServiceUpdate::from_record(&service);

    if let Some(title) = title {
        update.title = title;
    }
    if let Some(description) = description {
        update.description = description;
    }
    if let Some(price) = price {
        update.price = price
            .trim()
            .parse::<f64>()
            .map_err(|_| anyhow::anyhow!("--price must be a number, got '{price}'"))?;
    }
    if let Some(category) = category {
        update.category = category;
    }
    if let Some(status) = status {
        update.status = status;
    }
    if let Some(image) = image {
        update.image = image;
    }
    if let Some(duration) = duration {
        update.duration = duration;
    }
    if let Some(location) = location {
        update.location = location;
    }

    client.update_service(id, &update).await?;
    println!("updated service '{}'", update.title);
    Ok(())
}

/// Delete a listing by id.
///
/// # Errors
///
/// Returns an error if the delete request fails.
pub(crate) async fn run_delete(client: &SynvoClient, id: &str) -> anyhow::Result<()> {
    client.delete_service(id).await?;
    println!("deleted service {id}");
    Ok(())
}

/// List the signed-in provider's own listings with their ids.
///
/// # Errors
///
/// Returns an error if the fetch fails.
pub(crate) async fn run_mine(client: &SynvoClient, session: &Session) -> anyhow::Result<()> {
    let records = client.services_by_provider(&session.email).await?;
    if records.is_empty() {
        println!(
            "no listings yet for {}; create one with `synvo services add`",
            session.email
        );
        return Ok(());
    }

    let header = format!(
        "{:<28}{:<26}{:<12}{:>8}  RATING",
        "SERVICE", "ID", "STATUS", "PRICE"
    );
    println!("{header}");
    for service in &records {
        let id = service.id().unwrap_or_else(|| "\u{2014}".to_string());
        let rating = service
            .stored_rating()
            .map_or_else(|| "\u{2014}".to_string(), |r| format!("{r:.1}"));
        println!(
            "{:<28}{:<26}{:<12}{:>8}  {}",
            truncate(service.effective_name(), 25),
            id,
            service.effective_status(),
            format!("${}", service.effective_price()),
            rating
        );
    }

    Ok(())
}
