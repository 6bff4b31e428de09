use std::collections::HashSet;

use carhub_core::search::RentalPeriod;
use carhub_core::{Booking, BookingStatus, Car};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Closed-interval overlap: touching endpoints count.
pub fn overlaps(a_from: DateTime<Utc>, a_to: DateTime<Utc>, b_from: DateTime<Utc>, b_to: DateTime<Utc>) -> bool {
    !(a_to < b_from || a_from > b_to)
}

/// Whether `booking` holds `car_id` during `period`.
pub fn is_blocking(booking: &Booking, car_id: Uuid, period: &RentalPeriod) -> bool {
    booking.car == car_id
        && booking.status.is_conflicting()
        && booking.status != BookingStatus::Cancelled
        && overlaps(booking.from, booking.to, period.from, period.to)
}

/// Only pay-blocked cars can be taken out by a booking.
pub fn is_blocked(car: &Car, bookings: &[Booking], period: &RentalPeriod) -> bool {
    car.blocks_on_pay() && bookings.iter().any(|b| is_blocking(b, car.id, period))
}

/// Ids of the cars whose bookings must be checked.
pub fn pay_blocked_ids(cars: &[Car]) -> Vec<Uuid> {
    cars.iter().filter(|c| c.blocks_on_pay()).map(|c| c.id).collect()
}

pub fn exclude_blocked(cars: Vec<Car>, bookings: &[Booking], period: &RentalPeriod) -> Vec<Car> {
    let blocked: HashSet<Uuid> = cars
        .iter()
        .filter(|car| is_blocked(car, bookings, period))
        .map(|car| car.id)
        .collect();

    cars.into_iter().filter(|car| !blocked.contains(&car.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use carhub_core::car::{CarRange, CarType, FuelPolicy, GearboxType};
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    fn car(block_on_pay: Option<bool>) -> Car {
        Car {
            id: Uuid::new_v4(),
            name: "Fiat 500".to_string(),
            supplier: Uuid::new_v4(),
            locations: vec![],
            daily_price: 29.0,
            car_type: CarType::Gasoline,
            gearbox: GearboxType::Manual,
            fuel_policy: FuelPolicy::FullToFull,
            aircon: true,
            seats: 4,
            doors: 3,
            mileage: -1,
            deposit: 300.0,
            range: CarRange::Mini,
            multimedia: vec![],
            rating: None,
            image: None,
            available: true,
            fully_booked: None,
            coming_soon: None,
            block_on_pay,
        }
    }

    fn booking(car: &Car, from: DateTime<Utc>, to: DateTime<Utc>, status: BookingStatus) -> Booking {
        Booking { id: Uuid::new_v4(), car: car.id, supplier: car.supplier, from, to, status }
    }

    #[test]
    fn test_overlap_rule() {
        assert!(overlaps(day(1), day(5), day(3), day(4)));
        assert!(overlaps(day(1), day(5), day(5), day(8)));
        assert!(overlaps(day(5), day(8), day(1), day(5)));
        assert!(!overlaps(day(1), day(5), day(6), day(8)));
        assert!(!overlaps(day(10), day(12), day(1), day(5)));
    }

    #[test]
    fn test_touching_boundary_blocks() {
        let c = car(Some(true));
        let bookings = vec![booking(&c, day(1), day(3), BookingStatus::Paid)];
        let period = RentalPeriod { from: day(3), to: day(6) };
        assert!(is_blocked(&c, &bookings, &period));
    }

    #[test]
    fn test_cancelled_booking_never_blocks() {
        let c = car(Some(true));
        let bookings = vec![booking(&c, day(3), day(4), BookingStatus::Cancelled)];
        let period = RentalPeriod { from: day(3), to: day(4) };
        assert!(!is_blocked(&c, &bookings, &period));
    }

    #[test]
    fn test_only_conflicting_statuses_block() {
        let c = car(Some(true));
        let period = RentalPeriod { from: day(3), to: day(4) };
        for (status, blocks) in [
            (BookingStatus::Void, false),
            (BookingStatus::Pending, false),
            (BookingStatus::Deposit, true),
            (BookingStatus::Paid, true),
            (BookingStatus::Reserved, true),
        ] {
            let bookings = vec![booking(&c, day(1), day(5), status)];
            assert_eq!(is_blocked(&c, &bookings, &period), blocks, "{:?}", status);
        }
    }

    #[test]
    fn test_car_without_block_on_pay_is_never_blocked() {
        let period = RentalPeriod { from: day(3), to: day(4) };
        for flag in [None, Some(false)] {
            let c = car(flag);
            let bookings = vec![booking(&c, day(1), day(5), BookingStatus::Reserved)];
            assert!(!is_blocked(&c, &bookings, &period));
        }
    }

    #[test]
    fn test_booking_on_other_car_does_not_block() {
        let c = car(Some(true));
        let other = car(Some(true));
        let bookings = vec![booking(&other, day(1), day(5), BookingStatus::Reserved)];
        let kept = exclude_blocked(vec![c.clone()], &bookings, &RentalPeriod { from: day(3), to: day(4) });
        assert_eq!(kept, vec![c]);
    }

    #[test]
    fn test_scenarios_b_and_c() {
        let c = car(Some(true));
        let bookings = vec![booking(&c, day(1), day(5), BookingStatus::Reserved)];

        let kept = exclude_blocked(vec![c.clone()], &bookings, &RentalPeriod { from: day(3), to: day(4) });
        assert!(kept.is_empty());

        let kept = exclude_blocked(vec![c.clone()], &bookings, &RentalPeriod { from: day(10), to: day(12) });
        assert_eq!(kept.len(), 1);
    }
}
