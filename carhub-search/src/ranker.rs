use std::cmp::Ordering;

use carhub_core::search::PageRequest;
use carhub_core::Car;

/// Cheapest first; equal prices fall back to car id so pages never shuffle.
pub fn rank(mut cars: Vec<Car>) -> Vec<Car> {
    cars.sort_by(compare);
    cars
}

fn compare(a: &Car, b: &Car) -> Ordering {
    a.daily_price.total_cmp(&b.daily_price).then_with(|| a.id.cmp(&b.id))
}

/// Slices one page out of ranked cars; the count is taken before slicing.
pub fn paginate(ranked: Vec<Car>, page: &PageRequest) -> (Vec<Car>, usize) {
    let total = ranked.len();
    let cars = ranked.into_iter().skip(page.skip()).take(page.size as usize).collect();
    (cars, total)
}
