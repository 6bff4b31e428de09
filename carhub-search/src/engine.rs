use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use carhub_core::repository::{
    BookingRepository, CarRepository, DateBasedPriceRepository, LocationRepository, SupplierRepository,
};
use carhub_core::{BookingStatus, CoreError, CoreResult, SearchCarsResponse, SearchQuery, Supplier};
use tracing::{debug, info};
use uuid::Uuid;

use crate::assembler::assemble;
use crate::conflict::{exclude_blocked, pay_blocked_ids};
use crate::eligibility::filter_eligible;
use crate::location::expand_location;
use crate::predicate::{build_predicate, PredicateOutcome};
use crate::quota::limit_per_supplier;
use crate::ranker::{paginate, rank};

/// The read-only stores a search consults.
#[derive(Clone)]
pub struct Stores {
    pub cars: Arc<dyn CarRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub suppliers: Arc<dyn SupplierRepository>,
    pub prices: Arc<dyn DateBasedPriceRepository>,
}

impl Stores {
    /// All five stores served by one backend.
    pub fn from_backend<S>(store: Arc<S>) -> Self
    where
        S: CarRepository
            + BookingRepository
            + LocationRepository
            + SupplierRepository
            + DateBasedPriceRepository
            + 'static,
    {
        Self {
            cars: store.clone(),
            bookings: store.clone(),
            locations: store.clone(),
            suppliers: store.clone(),
            prices: store,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Deadline shared by every store call of one search.
    pub timeout: Duration,
    pub max_page_size: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(5), max_page_size: 100 }
    }
}

/// Storefront car search: filter, expand, exclude, cap, rank and page.
///
/// Holds no state between calls, so one engine serves any number of
/// concurrent searches. Bookings are read once per search; a booking
/// committed after that read does not affect the returned page.
pub struct SearchEngine {
    stores: Stores,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(stores: Stores, config: SearchConfig) -> Self {
        Self { stores, config }
    }

    pub async fn search(&self, query: SearchQuery) -> CoreResult<SearchCarsResponse> {
        let started = Instant::now();
        if query.page.size > self.config.max_page_size {
            return Err(CoreError::ValidationError(format!(
                "size must not exceed {}, got {}",
                self.config.max_page_size, query.page.size
            )));
        }
        let deadline = tokio::time::Instant::now() + self.config.timeout;

        // 1. Location expansion
        let locations = self
            .within(deadline, expand_location(self.stores.locations.as_ref(), query.pickup_location))
            .await?;
        debug!("Pickup location {} expanded to {} locations", query.pickup_location, locations.len());

        // 2. Predicate
        let predicate = match build_predicate(&query, &locations) {
            PredicateOutcome::Match(predicate) => predicate,
            PredicateOutcome::Empty(reason) => {
                info!("Search short-circuited to an empty result: {:?}", reason);
                return Ok(SearchCarsResponse::empty());
            }
        };

        // 3. Candidates
        let cars = self.within(deadline, self.stores.cars.find_cars(&predicate)).await?;
        debug!("{} candidate cars matched {} clauses", cars.len(), predicate.clauses.len());
        if cars.is_empty() {
            return Ok(SearchCarsResponse::empty());
        }

        // 4. Supplier eligibility
        let supplier_ids = distinct(cars.iter().map(|c| c.supplier));
        let suppliers: HashMap<Uuid, Supplier> = self
            .within(deadline, self.stores.suppliers.find_by_ids(&supplier_ids))
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let cars = filter_eligible(cars, &suppliers, query.period.days());
        debug!("{} cars left after supplier eligibility ({} days)", cars.len(), query.period.days());

        // 5. Booking conflicts
        let watched = pay_blocked_ids(&cars);
        let cars = if watched.is_empty() {
            cars
        } else {
            let bookings = self
                .within(
                    deadline,
                    self.stores.bookings.find_conflicting(&watched, &BookingStatus::CONFLICTING, &query.period),
                )
                .await?;
            exclude_blocked(cars, &bookings, &query.period)
        };
        debug!("{} cars left after booking conflicts", cars.len());

        // 6. Supplier quota
        let cars = limit_per_supplier(cars, &suppliers);
        debug!("{} cars left after supplier quotas", cars.len());

        // 7. Rank and page
        let (page, total_records) = paginate(rank(cars), &query.page);

        // 8. Assemble
        let page_ids: Vec<Uuid> = page.iter().map(|c| c.id).collect();
        let prices = if page_ids.is_empty() {
            Vec::new()
        } else {
            self.within(deadline, self.stores.prices.find_by_car_ids(&page_ids)).await?
        };
        let response = assemble(page, total_records, &suppliers, prices)?;

        info!(
            "Search returned {} of {} cars (page {}, size {}) in {:?}",
            response.result_data.len(),
            total_records,
            query.page.page,
            query.page.size,
            started.elapsed()
        );
        Ok(response)
    }

    async fn within<T, E, F>(&self, deadline: tokio::time::Instant, call: F) -> CoreResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<CoreError>,
    {
        match tokio::time::timeout_at(deadline, call).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(CoreError::Timeout(self.config.timeout.as_millis() as u64)),
        }
    }
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen: HashSet<Uuid> = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}
