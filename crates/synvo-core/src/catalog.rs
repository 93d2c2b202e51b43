//! The catalog filter/sort/paginate pipeline.
//!
//! Every listing view in the product is a variation of one transform: take
//! the fetched collection, apply the active criteria, sort, and slice out a
//! page. This module implements that transform as a pure function over
//! borrowed records, parameterized by which stages a given view enables.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::service::ServiceRecord;

/// Synthetic facet value meaning "no filtering on this facet".
pub const ALL_FACET: &str = "All";

/// Page size used when configuration supplies none.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// How the filtered collection is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Keep fetch order.
    #[default]
    Default,
    PriceLow,
    PriceHigh,
    NameAsc,
    NameDesc,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(SortMode::Default),
            "price-low" => Ok(SortMode::PriceLow),
            "price-high" => Ok(SortMode::PriceHigh),
            "name-asc" => Ok(SortMode::NameAsc),
            "name-desc" => Ok(SortMode::NameDesc),
            other => Err(format!(
                "unknown sort mode '{other}' (expected default, price-low, price-high, name-asc, or name-desc)"
            )),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortMode::Default => "default",
            SortMode::PriceLow => "price-low",
            SortMode::PriceHigh => "price-high",
            SortMode::NameAsc => "name-asc",
            SortMode::NameDesc => "name-desc",
        };
        f.write_str(name)
    }
}

/// Which pipeline stages a view runs. Disabled stages pass records through
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct CatalogFeatures {
    pub search: bool,
    pub facet_filters: bool,
    pub price_bounds: bool,
    pub sort: bool,
    pub paginate: bool,
}

impl CatalogFeatures {
    /// Every stage enabled: the full listing page.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            search: true,
            facet_filters: true,
            price_bounds: true,
            sort: true,
            paginate: true,
        }
    }

    /// Category and location facets only: the embedded grid view.
    #[must_use]
    pub const fn facets_only() -> Self {
        Self {
            search: false,
            facet_filters: true,
            price_bounds: false,
            sort: false,
            paginate: false,
        }
    }
}

impl Default for CatalogFeatures {
    fn default() -> Self {
        Self::full()
    }
}

/// The user-selected criteria for one catalog view.
///
/// Mutate through the setters: changing any filter or the sort resets
/// pagination to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCriteria {
    pub query: String,
    pub category: String,
    pub location: String,
    /// Raw text; parsed leniently, invalid input imposes no bound.
    pub min_price: String,
    pub max_price: String,
    pub sort: SortMode,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for CatalogCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_FACET.to_string(),
            location: ALL_FACET.to_string(),
            min_price: String::new(),
            max_price: String::new(),
            sort: SortMode::Default,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogCriteria {
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 1;
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_string();
        self.page = 1;
    }

    pub fn set_location(&mut self, location: &str) {
        self.location = location.to_string();
        self.page = 1;
    }

    pub fn set_min_price(&mut self, min_price: &str) {
        self.min_price = min_price.to_string();
        self.page = 1;
    }

    pub fn set_max_price(&mut self, max_price: &str) {
        self.max_price = max_price.to_string();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.page = 1;
    }

    /// Moves to `page` (clamped to at least 1) without touching filters.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Resets every criterion except the page size to its default.
    pub fn clear_filters(&mut self) {
        *self = Self {
            page_size: self.page_size,
            ..Self::default()
        };
    }
}

/// Parses a raw price-bound input. Blank or unparseable text imposes no
/// bound.
#[must_use]
pub fn parse_price_bound(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Facet option lists derived from a fetched collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facets {
    /// Distinct category values in first-seen order, `"All"` first.
    pub categories: Vec<String>,
    /// Distinct location values in first-seen order, `"All"` first.
    pub locations: Vec<String>,
}

/// Derives the facet lists for a collection, using the effective category
/// and location of each record.
#[must_use]
pub fn derive_facets(records: &[ServiceRecord]) -> Facets {
    let mut categories = vec![ALL_FACET.to_string()];
    let mut locations = vec![ALL_FACET.to_string()];
    let mut seen_categories: HashSet<&str> = HashSet::from([ALL_FACET]);
    let mut seen_locations: HashSet<&str> = HashSet::from([ALL_FACET]);
    for record in records {
        let category = record.effective_category();
        if seen_categories.insert(category) {
            categories.push(category.to_string());
        }
        let location = record.effective_location();
        if seen_locations.insert(location) {
            locations.push(location.to_string());
        }
    }
    Facets {
        categories,
        locations,
    }
}

/// Runs the enabled filter stages over `records`, borrowing the survivors
/// in their original relative order. The source is never mutated.
#[must_use]
pub fn apply_filters<'a>(
    records: &'a [ServiceRecord],
    criteria: &CatalogCriteria,
    features: CatalogFeatures,
) -> Vec<&'a ServiceRecord> {
    let mut kept: Vec<&ServiceRecord> = records.iter().collect();

    if features.search {
        let query = criteria.query.trim().to_lowercase();
        if !query.is_empty() {
            kept.retain(|r| {
                r.effective_name().to_lowercase().contains(&query)
                    || r.effective_description().to_lowercase().contains(&query)
                    || r.effective_provider_name().to_lowercase().contains(&query)
            });
        }
    }
    if features.facet_filters {
        if criteria.category != ALL_FACET {
            kept.retain(|r| r.effective_category() == criteria.category);
        }
        if criteria.location != ALL_FACET {
            kept.retain(|r| r.effective_location() == criteria.location);
        }
    }
    if features.price_bounds {
        if let Some(min) = parse_price_bound(&criteria.min_price) {
            kept.retain(|r| r.effective_price() >= min);
        }
        if let Some(max) = parse_price_bound(&criteria.max_price) {
            kept.retain(|r| r.effective_price() <= max);
        }
    }
    kept
}

/// Reorders `records` in place. Ties keep their relative order;
/// [`SortMode::Default`] leaves the slice untouched.
pub fn sort_records(records: &mut [&ServiceRecord], sort: SortMode) {
    match sort {
        SortMode::Default => {}
        SortMode::PriceLow => {
            records.sort_by(|a, b| a.effective_price().total_cmp(&b.effective_price()));
        }
        SortMode::PriceHigh => {
            records.sort_by(|a, b| b.effective_price().total_cmp(&a.effective_price()));
        }
        SortMode::NameAsc => {
            records.sort_by(|a, b| {
                a.effective_name()
                    .to_lowercase()
                    .cmp(&b.effective_name().to_lowercase())
            });
        }
        SortMode::NameDesc => {
            records.sort_by(|a, b| {
                b.effective_name()
                    .to_lowercase()
                    .cmp(&a.effective_name().to_lowercase())
            });
        }
    }
}

/// One configured catalog view: the feature set it runs plus its current
/// criteria.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    pub features: CatalogFeatures,
    pub criteria: CatalogCriteria,
}

impl CatalogView {
    #[must_use]
    pub fn new(features: CatalogFeatures) -> Self {
        Self {
            features,
            criteria: CatalogCriteria::default(),
        }
    }

    /// Runs the pipeline over `records` and produces the page to display.
    #[must_use]
    pub fn page<'a>(&self, records: &'a [ServiceRecord]) -> CatalogPage<'a> {
        let mut filtered = apply_filters(records, &self.criteria, self.features);
        if self.features.sort {
            sort_records(&mut filtered, self.criteria.sort);
        }
        let total_filtered = filtered.len();

        if self.features.paginate {
            let size = self.criteria.page_size.max(1);
            let page = self.criteria.page.max(1);
            let page_count = total_filtered.div_ceil(size);
            let offset = (page - 1).saturating_mul(size);
            let on_page: Vec<&ServiceRecord> =
                filtered.into_iter().skip(offset).take(size).collect();
            CatalogPage {
                records: on_page,
                total_unfiltered: records.len(),
                total_filtered,
                page,
                page_count,
                offset,
            }
        } else {
            // Unpaginated views show everything as one page; an empty
            // result still reads as zero pages.
            let page_count = usize::from(total_filtered > 0);
            CatalogPage {
                records: filtered,
                total_unfiltered: records.len(),
                total_filtered,
                page: 1,
                page_count,
                offset: 0,
            }
        }
    }
}

/// What the pipeline hands the presentation layer.
#[derive(Debug)]
pub struct CatalogPage<'a> {
    /// Records on the current page, in display order.
    pub records: Vec<&'a ServiceRecord>,
    /// Collection size before any filtering.
    pub total_unfiltered: usize,
    /// Result size after filtering, across all pages.
    pub total_filtered: usize,
    /// 1-based current page.
    pub page: usize,
    /// Ceiling of filtered size over page size; 0 when nothing matched.
    pub page_count: usize,
    offset: usize,
}

impl CatalogPage<'_> {
    /// 1-based inclusive bounds for "Showing X-Y of Z" messaging; `None`
    /// when the page is empty.
    #[must_use]
    pub fn showing_range(&self) -> Option<(usize, usize)> {
        if self.records.is_empty() {
            None
        } else {
            Some((self.offset + 1, self.offset + self.records.len()))
        }
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
