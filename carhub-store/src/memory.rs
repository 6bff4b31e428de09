use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use carhub_core::repository::{
    BookingRepository, CarRepository, DateBasedPriceRepository, LocationRepository, SupplierRepository,
};
use carhub_core::search::RentalPeriod;
use carhub_core::{Booking, BookingStatus, Car, CarPredicate, DateBasedPrice, Location, StoreError, Supplier};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Full data set served by [`MemoryStore`]. Vectors keep insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub cars: Vec<Car>,
    pub suppliers: Vec<Supplier>,
    pub locations: Vec<Location>,
    pub bookings: Vec<Booking>,
    pub date_based_prices: Vec<DateBasedPrice>,
}

/// In-process store for local runs and tests.
///
/// Every read clones the current `Arc<Snapshot>` and works on it, so a
/// single read never observes a half-applied write.
pub struct MemoryStore {
    snapshot: RwLock<Arc<Snapshot>>,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot: RwLock::new(Arc::new(snapshot)) }
    }

    /// Loads a JSON seed file shaped like [`Snapshot`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read seed file {}: {}", path.display(), e))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        info!(
            "Loaded seed {}: {} cars, {} suppliers, {} locations, {} bookings",
            path.display(),
            snapshot.cars.len(),
            snapshot.suppliers.len(),
            snapshot.locations.len(),
            snapshot.bookings.len()
        );
        Ok(Self::new(snapshot))
    }

    async fn current(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }

    /// Swaps in a whole new data set.
    pub async fn replace(&self, snapshot: Snapshot) {
        *self.snapshot.write().await = Arc::new(snapshot);
    }

    pub async fn insert_booking(&self, booking: Booking) {
        let mut guard = self.snapshot.write().await;
        let mut next = Snapshot::clone(&guard);
        next.bookings.push(booking);
        *guard = Arc::new(next);
    }
}

#[async_trait]
impl CarRepository for MemoryStore {
    async fn find_cars(&self, predicate: &CarPredicate) -> Result<Vec<Car>, StoreError> {
        let snapshot = self.current().await;
        Ok(snapshot.cars.iter().filter(|car| predicate.matches(car)).cloned().collect())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn find_conflicting(
        &self,
        car_ids: &[Uuid],
        statuses: &[BookingStatus],
        period: &RentalPeriod,
    ) -> Result<Vec<Booking>, StoreError> {
        let snapshot = self.current().await;
        Ok(snapshot
            .bookings
            .iter()
            .filter(|b| car_ids.contains(&b.car))
            .filter(|b| statuses.contains(&b.status) && b.status != BookingStatus::Cancelled)
            .filter(|b| !(b.to < period.from || b.from > period.to))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.current().await.locations.iter().any(|l| l.id == id))
    }

    async fn children_of(&self, id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let snapshot = self.current().await;
        Ok(snapshot
            .locations
            .iter()
            .filter(|l| l.parent_location == Some(id))
            .map(|l| l.id)
            .collect())
    }
}

#[async_trait]
impl SupplierRepository for MemoryStore {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Supplier>, StoreError> {
        let snapshot = self.current().await;
        Ok(snapshot.suppliers.iter().filter(|s| ids.contains(&s.id)).cloned().collect())
    }
}

#[async_trait]
impl DateBasedPriceRepository for MemoryStore {
    async fn find_by_car_ids(&self, car_ids: &[Uuid]) -> Result<Vec<DateBasedPrice>, StoreError> {
        let snapshot = self.current().await;
        let mut prices: Vec<DateBasedPrice> = snapshot
            .date_based_prices
            .iter()
            .filter(|p| car_ids.contains(&p.car))
            .cloned()
            .collect();
        prices.sort_by_key(|p| p.start_date);
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    fn booking(car: Uuid, from: u32, to: u32, status: BookingStatus) -> Booking {
        Booking { id: Uuid::new_v4(), car, supplier: Uuid::new_v4(), from: day(from), to: day(to), status }
    }

    #[tokio::test]
    async fn test_conflicting_bookings_use_inclusive_overlap() {
        let car = Uuid::new_v4();
        let store = MemoryStore::new(Snapshot {
            bookings: vec![
                booking(car, 1, 5, BookingStatus::Paid),
                booking(car, 5, 8, BookingStatus::Reserved),
                booking(car, 11, 12, BookingStatus::Deposit),
                booking(car, 6, 7, BookingStatus::Pending),
                booking(car, 6, 7, BookingStatus::Cancelled),
            ],
            ..Default::default()
        });

        let period = RentalPeriod { from: day(5), to: day(10) };
        let found = store
            .find_conflicting(&[car], &BookingStatus::CONFLICTING, &period)
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|b| b.status.is_conflicting()));
    }

    #[tokio::test]
    async fn test_children_are_direct_only() {
        let root = Location { id: Uuid::new_v4(), name: "Portugal".into(), parent_location: None };
        let city = Location { id: Uuid::new_v4(), name: "Lisbon".into(), parent_location: Some(root.id) };
        let airport = Location { id: Uuid::new_v4(), name: "LIS".into(), parent_location: Some(city.id) };
        let store = MemoryStore::new(Snapshot {
            locations: vec![root.clone(), city.clone(), airport],
            ..Default::default()
        });

        assert!(store.exists(root.id).await.unwrap());
        assert!(!store.exists(Uuid::new_v4()).await.unwrap());
        assert_eq!(store.children_of(root.id).await.unwrap(), vec![city.id]);
    }

    #[tokio::test]
    async fn test_insert_booking_is_visible_to_later_reads() {
        let car = Uuid::new_v4();
        let store = MemoryStore::new(Snapshot::default());
        let period = RentalPeriod { from: day(1), to: day(3) };

        assert!(store.find_conflicting(&[car], &BookingStatus::CONFLICTING, &period).await.unwrap().is_empty());
        store.insert_booking(booking(car, 2, 2, BookingStatus::Paid)).await;
        assert_eq!(store.find_conflicting(&[car], &BookingStatus::CONFLICTING, &period).await.unwrap().len(), 1);

        store.replace(Snapshot::default()).await;
        assert!(store.find_conflicting(&[car], &BookingStatus::CONFLICTING, &period).await.unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_parses_partial_seed() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"locations":[{"id":"6f1c9a52-5d3e-4a7b-9c1d-2e3f4a5b6c7d","name":"Porto"}]}"#,
        )
        .unwrap();
        assert_eq!(snapshot.locations.len(), 1);
        assert!(snapshot.cars.is_empty());
    }
}
