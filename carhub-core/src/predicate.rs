use serde::Serialize;
use uuid::Uuid;

use crate::car::{Car, CarMultimedia, CarRange, CarType, FuelPolicy, GearboxType};

/// One independent condition a car must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CarClause {
    TypeIn(Vec<CarType>),
    GearboxIn(Vec<GearboxType>),
    Available,
    NotFullyBooked,
    NotComingSoon,
    FuelPolicyIn(Vec<FuelPolicy>),
    Aircon,
    DoorsMoreThan(i32),
    SeatsMoreThan(i32),
    SeatsEqual(i32),
    LimitedMileage,
    UnlimitedMileage,
    DepositAtMost(f64),
    RangeIn(Vec<CarRange>),
    HasMultimedia(CarMultimedia),
    RatingAtLeast(f64),
    /// Holds an already normalized keyword.
    NameContains(String),
}

impl CarClause {
    pub fn matches(&self, car: &Car) -> bool {
        match self {
            CarClause::TypeIn(types) => types.contains(&car.car_type),
            CarClause::GearboxIn(gearboxes) => gearboxes.contains(&car.gearbox),
            CarClause::Available => car.available,
            CarClause::NotFullyBooked => !car.is_fully_booked(),
            CarClause::NotComingSoon => !car.is_coming_soon(),
            CarClause::FuelPolicyIn(policies) => policies.contains(&car.fuel_policy),
            CarClause::Aircon => car.aircon,
            CarClause::DoorsMoreThan(n) => car.doors > *n,
            CarClause::SeatsMoreThan(n) => car.seats > *n,
            CarClause::SeatsEqual(n) => car.seats == *n,
            CarClause::LimitedMileage => !car.has_unlimited_mileage(),
            CarClause::UnlimitedMileage => car.has_unlimited_mileage(),
            CarClause::DepositAtMost(max) => car.deposit <= *max,
            CarClause::RangeIn(ranges) => ranges.contains(&car.range),
            CarClause::HasMultimedia(feature) => car.multimedia.contains(feature),
            CarClause::RatingAtLeast(min) => car.rating.is_some_and(|r| r >= *min),
            CarClause::NameContains(keyword) => normalize_keyword(&car.name).contains(keyword.as_str()),
        }
    }
}

/// Conjunction evaluated against the car set by every car store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarPredicate {
    pub suppliers: Vec<Uuid>,
    pub locations: Vec<Uuid>,
    pub clauses: Vec<CarClause>,
}

impl CarPredicate {
    pub fn new(suppliers: Vec<Uuid>, locations: Vec<Uuid>) -> Self {
        Self { suppliers, locations, clauses: Vec::new() }
    }

    pub fn and(mut self, clause: CarClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn matches(&self, car: &Car) -> bool {
        self.suppliers.contains(&car.supplier)
            && car.locations.iter().any(|l| self.locations.contains(l))
            && self.clauses.iter().all(|c| c.matches(car))
    }
}

/// Case-insensitive form used on both sides of a keyword comparison.
pub fn normalize_keyword(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car() -> Car {
        Car {
            id: Uuid::new_v4(),
            name: "Peugeot 208 GT".to_string(),
            supplier: Uuid::new_v4(),
            locations: vec![Uuid::new_v4()],
            daily_price: 40.0,
            car_type: CarType::Gasoline,
            gearbox: GearboxType::Manual,
            fuel_policy: FuelPolicy::FullToFull,
            aircon: true,
            seats: 5,
            doors: 5,
            mileage: 300,
            deposit: 800.0,
            range: CarRange::Midi,
            multimedia: vec![CarMultimedia::Bluetooth],
            rating: None,
            image: None,
            available: true,
            fully_booked: None,
            coming_soon: Some(false),
            block_on_pay: None,
        }
    }

    #[test]
    fn test_predicate_requires_supplier_and_location() {
        let car = car();
        let predicate = CarPredicate::new(vec![car.supplier], car.locations.clone());
        assert!(predicate.matches(&car));

        let wrong_supplier = CarPredicate::new(vec![Uuid::new_v4()], car.locations.clone());
        assert!(!wrong_supplier.matches(&car));

        let wrong_location = CarPredicate::new(vec![car.supplier], vec![Uuid::new_v4()]);
        assert!(!wrong_location.matches(&car));
    }

    #[test]
    fn test_missing_rating_never_meets_floor() {
        let car = car();
        assert!(!CarClause::RatingAtLeast(0.0).matches(&car));
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let car = car();
        let clause = CarClause::NameContains(normalize_keyword("  208 gt "));
        assert!(clause.matches(&car));
        assert!(!CarClause::NameContains(normalize_keyword("clio")).matches(&car));
    }

    #[test]
    fn test_empty_membership_list_matches_nothing() {
        assert!(!CarClause::TypeIn(vec![]).matches(&car()));
    }
}
