use std::collections::{HashMap, HashSet};

use carhub_core::{Car, Supplier};
use uuid::Uuid;

/// Caps each supplier's share of the result at its `supplier_car_limit`.
///
/// Truncation keeps the first cars of each supplier in the order received,
/// before any price sort, so it is "first N encountered", not "N cheapest".
/// Suppliers keep the relative position of their first car. A limit of zero
/// removes the supplier entirely; no limit (or no supplier record) is unbounded.
pub fn limit_per_supplier(cars: Vec<Car>, suppliers: &HashMap<Uuid, Supplier>) -> Vec<Car> {
    let mut groups: Vec<(Uuid, Vec<Car>)> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for car in cars {
        let slot = *index.entry(car.supplier).or_insert_with(|| {
            groups.push((car.supplier, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(car);
    }

    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut limited = Vec::new();

    for (supplier_id, group) in groups {
        let max = suppliers
            .get(&supplier_id)
            .and_then(|s| s.supplier_car_limit)
            .map_or(usize::MAX, |limit| limit as usize);

        for car in group.into_iter().take(max) {
            if seen.insert(car.id) {
                limited.push(car);
            }
        }
    }

    limited
}
