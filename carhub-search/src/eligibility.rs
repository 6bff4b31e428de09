use std::collections::HashMap;

use carhub_core::{Car, Supplier};
use uuid::Uuid;

/// A supplier can rent for `requested_days` unless blacklisted or below its minimum.
pub fn is_eligible(supplier: &Supplier, requested_days: i64) -> bool {
    if supplier.blacklisted {
        return false;
    }
    match supplier.minimum_rental_days {
        Some(min) => requested_days >= i64::from(min),
        None => true,
    }
}

/// Drops cars whose supplier is ineligible. A car whose supplier record is
/// missing from `suppliers` is dropped too.
pub fn filter_eligible(cars: Vec<Car>, suppliers: &HashMap<Uuid, Supplier>, requested_days: i64) -> Vec<Car> {
    cars.into_iter()
        .filter(|car| {
            suppliers
                .get(&car.supplier)
                .is_some_and(|supplier| is_eligible(supplier, requested_days))
        })
        .collect()
}
