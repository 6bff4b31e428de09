use async_trait::async_trait;
use uuid::Uuid;

use crate::booking::{Booking, BookingStatus};
use crate::car::Car;
use crate::predicate::CarPredicate;
use crate::pricing::DateBasedPrice;
use crate::search::RentalPeriod;
use crate::supplier::Supplier;

/// Error returned by every store; search passes it through unmodified.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Read access to the car set
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Cars satisfying `predicate`, in the store's stable insertion order.
    async fn find_cars(&self, predicate: &CarPredicate) -> Result<Vec<Car>, StoreError>;
}

/// Read access to bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Bookings on any of `car_ids` with a status in `statuses` whose
    /// interval overlaps `period`, endpoints inclusive.
    async fn find_conflicting(
        &self,
        car_ids: &[Uuid],
        statuses: &[BookingStatus],
        period: &RentalPeriod,
    ) -> Result<Vec<Booking>, StoreError>;
}

/// Read access to the location tree
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn exists(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Direct children only.
    async fn children_of(&self, id: Uuid) -> Result<Vec<Uuid>, StoreError>;
}

/// Read access to supplier accounts
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Supplier>, StoreError>;
}

/// Read access to date-based price overrides
#[async_trait]
pub trait DateBasedPriceRepository: Send + Sync {
    async fn find_by_car_ids(&self, car_ids: &[Uuid]) -> Result<Vec<DateBasedPrice>, StoreError>;
}
