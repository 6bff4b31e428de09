use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::car::{Car, CarMultimedia, CarRange, CarType, FuelPolicy, GearboxType};
use crate::pricing::DateBasedPrice;
use crate::supplier::SupplierSummary;
use crate::{CoreError, CoreResult};

/// Wire value meaning "filter not set" for the numeric filters.
pub const UNSET: i64 = -1;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn unset() -> i64 {
    UNSET
}

// ============================================================================
// Wire Request
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Mileage {
    Limited,
    Unlimited,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CarSpecs {
    pub aircon: Option<bool>,
    pub more_than_four_doors: Option<bool>,
    pub more_than_five_seats: Option<bool>,
}

/// Storefront search body, as posted by the web and mobile clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCarsRequest {
    #[serde(default)]
    pub suppliers: Vec<Uuid>,
    pub pickup_location: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub car_type: Option<Vec<CarType>>,
    pub gearbox: Option<Vec<GearboxType>>,
    pub mileage: Option<Vec<Mileage>>,
    #[serde(default = "unset")]
    pub deposit: i64,
    pub car_specs: Option<CarSpecs>,
    pub ranges: Option<Vec<CarRange>>,
    pub multimedia: Option<Vec<CarMultimedia>>,
    #[serde(default = "unset")]
    pub rating: i64,
    #[serde(default = "unset")]
    pub seats: i64,
    pub fuel_policy: Option<Vec<FuelPolicy>>,
    pub keyword: Option<String>,
    #[serde(default)]
    pub include_already_booked_cars: bool,
    #[serde(default)]
    pub include_coming_soon_cars: bool,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl Default for SearchCarsRequest {
    fn default() -> Self {
        Self {
            suppliers: Vec::new(),
            pickup_location: None,
            from: None,
            to: None,
            car_type: None,
            gearbox: None,
            mileage: None,
            deposit: UNSET,
            car_specs: None,
            ranges: None,
            multimedia: None,
            rating: UNSET,
            seats: UNSET,
            fuel_policy: None,
            keyword: None,
            include_already_booked_cars: false,
            include_coming_soon_cars: false,
            page: None,
            size: None,
        }
    }
}

// ============================================================================
// Typed Query
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MileageFilter {
    /// Two or more entries were sent, or the filter was omitted.
    Any,
    LimitedOnly,
    UnlimitedOnly,
    /// An explicitly empty selection: the whole search yields nothing.
    MatchNone,
}

impl MileageFilter {
    fn from_selection(selection: Option<&[Mileage]>) -> Self {
        let Some(selection) = selection else {
            return MileageFilter::Any;
        };
        // Decided by length: two or more entries never narrow the search.
        match selection {
            [] => MileageFilter::MatchNone,
            [Mileage::Limited] => MileageFilter::LimitedOnly,
            [Mileage::Unlimited] => MileageFilter::UnlimitedOnly,
            _ => MileageFilter::Any,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatFilter {
    Exactly(i32),
    /// The "6" bucket on the storefront.
    MoreThanFive,
}

/// Seat filter value the storefront sends for "6 or more".
pub const SEATS_BUCKET_MORE_THAN_FIVE: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPeriod {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl RentalPeriod {
    /// Whole rental days, rounding any partial day up.
    pub fn days(&self) -> i64 {
        let ms = (self.to - self.from).num_milliseconds().max(0);
        (ms + DAY_MS - 1) / DAY_MS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-indexed.
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn skip(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.size as usize)
    }
}

/// Validated search with every sentinel replaced by an explicit option.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub suppliers: Vec<Uuid>,
    pub pickup_location: Uuid,
    pub period: RentalPeriod,
    pub car_types: Option<Vec<CarType>>,
    pub gearboxes: Option<Vec<GearboxType>>,
    pub mileage: MileageFilter,
    pub deposit: Option<f64>,
    pub specs: CarSpecs,
    pub ranges: Option<Vec<CarRange>>,
    pub multimedia: Vec<CarMultimedia>,
    pub rating: Option<f64>,
    pub seats: Option<SeatFilter>,
    pub fuel_policies: Option<Vec<FuelPolicy>>,
    pub keyword: Option<String>,
    pub include_already_booked_cars: bool,
    pub include_coming_soon_cars: bool,
    pub page: PageRequest,
}

impl TryFrom<SearchCarsRequest> for SearchQuery {
    type Error = CoreError;

    fn try_from(req: SearchCarsRequest) -> CoreResult<Self> {
        let from = req.from.ok_or_else(|| CoreError::ValidationError("from is required".into()))?;
        let to = req.to.ok_or_else(|| CoreError::ValidationError("to is required".into()))?;
        if to < from {
            return Err(CoreError::ValidationError("to must not be before from".into()));
        }
        let pickup_location = req
            .pickup_location
            .ok_or_else(|| CoreError::ValidationError("pickupLocation is required".into()))?;

        let page = positive(req.page, "page")?;
        let size = positive(req.size, "size")?;

        let seats = match req.seats {
            n if n <= UNSET => None,
            SEATS_BUCKET_MORE_THAN_FIVE => Some(SeatFilter::MoreThanFive),
            n => Some(SeatFilter::Exactly(i32::try_from(n).map_err(|_| {
                CoreError::ValidationError(format!("seats out of range: {}", n))
            })?)),
        };

        Ok(Self {
            suppliers: req.suppliers,
            pickup_location,
            period: RentalPeriod { from, to },
            car_types: req.car_type,
            gearboxes: req.gearbox,
            mileage: MileageFilter::from_selection(req.mileage.as_deref()),
            deposit: (req.deposit > UNSET).then_some(req.deposit as f64),
            specs: req.car_specs.unwrap_or_default(),
            ranges: req.ranges,
            multimedia: req.multimedia.unwrap_or_default(),
            rating: (req.rating > UNSET).then_some(req.rating as f64),
            seats,
            fuel_policies: req.fuel_policy,
            keyword: req.keyword.filter(|k| !k.trim().is_empty()),
            include_already_booked_cars: req.include_already_booked_cars,
            include_coming_soon_cars: req.include_coming_soon_cars,
            page: PageRequest { page, size },
        })
    }
}

fn positive(value: Option<i64>, field: &str) -> CoreResult<u32> {
    let value = value.ok_or_else(|| CoreError::ValidationError(format!("{} is required", field)))?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| CoreError::ValidationError(format!("{} must be a positive integer, got {}", field, value)))
}

// ============================================================================
// Wire Response
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_records: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchCarsResponse {
    pub result_data: Vec<CarResult>,
    pub page_info: PageInfo,
}

impl SearchCarsResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A car row with its supplier projection and date-based prices attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarResult {
    pub id: Uuid,
    pub name: String,
    pub supplier: SupplierSummary,
    pub locations: Vec<Uuid>,
    pub daily_price: f64,
    #[serde(rename = "type")]
    pub car_type: CarType,
    pub gearbox: GearboxType,
    pub fuel_policy: FuelPolicy,
    pub aircon: bool,
    pub seats: i32,
    pub doors: i32,
    pub mileage: i32,
    pub deposit: f64,
    pub range: CarRange,
    pub multimedia: Vec<CarMultimedia>,
    pub rating: Option<f64>,
    pub image: Option<String>,
    pub available: bool,
    pub fully_booked: Option<bool>,
    pub coming_soon: Option<bool>,
    pub block_on_pay: Option<bool>,
    pub date_based_prices: Vec<DateBasedPrice>,
}

impl CarResult {
    pub fn new(car: Car, supplier: SupplierSummary, date_based_prices: Vec<DateBasedPrice>) -> Self {
        Self {
            id: car.id,
            name: car.name,
            supplier,
            locations: car.locations,
            daily_price: car.daily_price,
            car_type: car.car_type,
            gearbox: car.gearbox,
            fuel_policy: car.fuel_policy,
            aircon: car.aircon,
            seats: car.seats,
            doors: car.doors,
            mileage: car.mileage,
            deposit: car.deposit,
            range: car.range,
            multimedia: car.multimedia,
            rating: car.rating,
            image: car.image,
            available: car.available,
            fully_booked: car.fully_booked,
            coming_soon: car.coming_soon,
            block_on_pay: car.block_on_pay,
            date_based_prices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> SearchCarsRequest {
        SearchCarsRequest {
            suppliers: vec![Uuid::new_v4()],
            pickup_location: Some(Uuid::new_v4()),
            from: Some(Utc.with_ymd_and_hms(2024, 3, 3, 10, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap()),
            page: Some(1),
            size: Some(10),
            ..Default::default()
        }
    }

    #[test]
    fn test_request_deserialization_sentinels() {
        let json = r#"
            {
                "suppliers": [],
                "pickupLocation": "3f0c8a52-8b4e-4d5c-a1b9-2f6e7d8c9a01",
                "from": "2024-03-03T10:00:00Z",
                "to": "2024-03-04T10:00:00Z",
                "mileage": ["limited"],
                "carSpecs": { "aircon": true }
            }
        "#;
        let req: SearchCarsRequest = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(req.deposit, UNSET);
        assert_eq!(req.seats, UNSET);
        assert_eq!(req.mileage, Some(vec![Mileage::Limited]));
        assert_eq!(req.car_specs.unwrap().aircon, Some(true));
    }

    #[test]
    fn test_missing_dates_are_rejected() {
        let req = SearchCarsRequest { from: None, ..request() };
        assert!(matches!(SearchQuery::try_from(req), Err(CoreError::ValidationError(_))));

        let req = SearchCarsRequest { to: None, ..request() };
        assert!(matches!(SearchQuery::try_from(req), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_non_positive_paging_is_rejected() {
        let req = SearchCarsRequest { page: Some(0), ..request() };
        assert!(matches!(SearchQuery::try_from(req), Err(CoreError::ValidationError(_))));

        let req = SearchCarsRequest { size: Some(-3), ..request() };
        assert!(matches!(SearchQuery::try_from(req), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_sentinels_become_options() {
        let query = SearchQuery::try_from(SearchCarsRequest { seats: 6, deposit: 0, ..request() }).unwrap();
        assert_eq!(query.seats, Some(SeatFilter::MoreThanFive));
        assert_eq!(query.deposit, Some(0.0));
        assert_eq!(query.rating, None);

        let query = SearchQuery::try_from(SearchCarsRequest { seats: 5, ..request() }).unwrap();
        assert_eq!(query.seats, Some(SeatFilter::Exactly(5)));
    }

    #[test]
    fn test_mileage_selection() {
        let with = |m: Option<Vec<Mileage>>| {
            SearchQuery::try_from(SearchCarsRequest { mileage: m, ..request() }).unwrap().mileage
        };
        assert_eq!(with(None), MileageFilter::Any);
        assert_eq!(with(Some(vec![])), MileageFilter::MatchNone);
        assert_eq!(with(Some(vec![Mileage::Unlimited])), MileageFilter::UnlimitedOnly);
        assert_eq!(with(Some(vec![Mileage::Limited, Mileage::Unlimited])), MileageFilter::Any);
        assert_eq!(with(Some(vec![Mileage::Limited])), MileageFilter::LimitedOnly);
        assert_eq!(with(Some(vec![Mileage::Limited, Mileage::Limited])), MileageFilter::Any);
    }

    #[test]
    fn test_rental_days_round_up() {
        let from = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let period = RentalPeriod { from, to: from + chrono::Duration::hours(49) };
        assert_eq!(period.days(), 3);

        let period = RentalPeriod { from, to: from + chrono::Duration::days(2) };
        assert_eq!(period.days(), 2);

        let period = RentalPeriod { from, to: from };
        assert_eq!(period.days(), 0);
    }

    #[test]
    fn test_page_skip() {
        assert_eq!(PageRequest { page: 1, size: 10 }.skip(), 0);
        assert_eq!(PageRequest { page: 3, size: 10 }.skip(), 20);
    }
}
