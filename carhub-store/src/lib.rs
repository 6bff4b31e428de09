pub mod app_config;
pub mod booking_repo;
pub mod car_repo;
pub mod database;
pub mod location_repo;
pub mod memory;
pub mod price_repo;
pub mod supplier_repo;

pub use booking_repo::PgBookingRepository;
pub use car_repo::PgCarRepository;
pub use database::DbClient;
pub use location_repo::PgLocationRepository;
pub use memory::MemoryStore;
pub use price_repo::PgDateBasedPriceRepository;
pub use supplier_repo::PgSupplierRepository;

use carhub_core::StoreError;

/// Decodes a TEXT column holding one of the domain's camelCase enum names.
pub(crate) fn parse_enum<T: serde::de::DeserializeOwned>(value: &str) -> Result<T, StoreError> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|e| format!("unexpected enum value {:?}: {}", value, e).into())
}

/// Non-negative INTEGER column as `u32`; negatives clamp to zero.
pub(crate) fn non_negative(value: Option<i32>) -> Option<u32> {
    value.map(|v| u32::try_from(v).unwrap_or(0))
}
