use carhub_core::predicate::normalize_keyword;
use carhub_core::search::{MileageFilter, SeatFilter};
use carhub_core::{CarClause, CarPredicate, SearchQuery};
use uuid::Uuid;

/// Why a search was answered without touching the car store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoSuppliers,
    NoMileageSelected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredicateOutcome {
    Match(CarPredicate),
    Empty(EmptyReason),
}

/// Compiles a search into the car predicate, one clause per filter that is set.
pub fn build_predicate(query: &SearchQuery, locations: &[Uuid]) -> PredicateOutcome {
    if query.suppliers.is_empty() {
        return PredicateOutcome::Empty(EmptyReason::NoSuppliers);
    }

    let mut predicate = CarPredicate::new(query.suppliers.clone(), locations.to_vec());

    if let Some(types) = &query.car_types {
        predicate = predicate.and(CarClause::TypeIn(types.clone()));
    }
    if let Some(gearboxes) = &query.gearboxes {
        predicate = predicate.and(CarClause::GearboxIn(gearboxes.clone()));
    }
    predicate = predicate.and(CarClause::Available).and(CarClause::NotFullyBooked);

    // includeAlreadyBookedCars does not lift the unconditional clause above.
    if !query.include_already_booked_cars {
        predicate = predicate.and(CarClause::NotFullyBooked);
    }
    if !query.include_coming_soon_cars {
        predicate = predicate.and(CarClause::NotComingSoon);
    }

    if let Some(policies) = &query.fuel_policies {
        predicate = predicate.and(CarClause::FuelPolicyIn(policies.clone()));
    }

    if query.specs.aircon == Some(true) {
        predicate = predicate.and(CarClause::Aircon);
    }
    if query.specs.more_than_four_doors == Some(true) {
        predicate = predicate.and(CarClause::DoorsMoreThan(4));
    }
    if query.specs.more_than_five_seats == Some(true) {
        predicate = predicate.and(CarClause::SeatsMoreThan(5));
    }

    match query.mileage {
        MileageFilter::Any => {}
        MileageFilter::LimitedOnly => predicate = predicate.and(CarClause::LimitedMileage),
        MileageFilter::UnlimitedOnly => predicate = predicate.and(CarClause::UnlimitedMileage),
        MileageFilter::MatchNone => return PredicateOutcome::Empty(EmptyReason::NoMileageSelected),
    }

    if let Some(deposit) = query.deposit {
        predicate = predicate.and(CarClause::DepositAtMost(deposit));
    }
    if let Some(ranges) = &query.ranges {
        predicate = predicate.and(CarClause::RangeIn(ranges.clone()));
    }
    for feature in &query.multimedia {
        predicate = predicate.and(CarClause::HasMultimedia(*feature));
    }
    if let Some(rating) = query.rating {
        predicate = predicate.and(CarClause::RatingAtLeast(rating));
    }
    match query.seats {
        Some(SeatFilter::MoreThanFive) => predicate = predicate.and(CarClause::SeatsMoreThan(5)),
        Some(SeatFilter::Exactly(n)) => predicate = predicate.and(CarClause::SeatsEqual(n)),
        None => {}
    }
    if let Some(keyword) = &query.keyword {
        predicate = predicate.and(CarClause::NameContains(normalize_keyword(keyword)));
    }

    PredicateOutcome::Match(predicate)
}
