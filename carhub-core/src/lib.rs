pub mod booking;
pub mod car;
pub mod location;
pub mod predicate;
pub mod pricing;
pub mod repository;
pub mod search;
pub mod supplier;

pub use booking::{Booking, BookingStatus};
pub use car::Car;
pub use location::Location;
pub use predicate::{CarClause, CarPredicate};
pub use pricing::DateBasedPrice;
pub use repository::StoreError;
pub use search::{SearchCarsRequest, SearchCarsResponse, SearchQuery};
pub use supplier::{Supplier, SupplierSummary};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Store error: {0}")]
    StoreError(#[source] StoreError),
    #[error("Search deadline of {0} ms exceeded")]
    Timeout(u64),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::StoreError(err)
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
