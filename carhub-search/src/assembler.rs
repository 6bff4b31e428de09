use std::collections::HashMap;

use carhub_core::search::{CarResult, PageInfo};
use carhub_core::{Car, CoreError, CoreResult, DateBasedPrice, SearchCarsResponse, Supplier, SupplierSummary};
use uuid::Uuid;

/// Builds the response envelope for one page of ranked cars.
///
/// Prices are attached as stored, grouped per car and ordered by start date.
pub fn assemble(
    page: Vec<Car>,
    total_records: usize,
    suppliers: &HashMap<Uuid, Supplier>,
    prices: Vec<DateBasedPrice>,
) -> CoreResult<SearchCarsResponse> {
    let mut prices_by_car: HashMap<Uuid, Vec<DateBasedPrice>> = HashMap::new();
    for price in prices {
        prices_by_car.entry(price.car).or_default().push(price);
    }

    let mut result_data = Vec::with_capacity(page.len());
    for car in page {
        // Eligibility already dropped cars without a supplier record.
        let supplier = suppliers.get(&car.supplier).map(SupplierSummary::from).ok_or_else(|| {
            CoreError::StoreError(format!("supplier {} of car {} vanished mid-search", car.supplier, car.id).into())
        })?;
        let mut car_prices = prices_by_car.remove(&car.id).unwrap_or_default();
        car_prices.sort_by_key(|p| p.start_date);
        result_data.push(CarResult::new(car, supplier, car_prices));
    }

    Ok(SearchCarsResponse { result_data, page_info: PageInfo { total_records } })
}
