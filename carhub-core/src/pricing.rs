use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Daily price override for a date range, owned by exactly one car.
/// Search carries these through untouched; resolving them is pricing's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateBasedPrice {
    pub id: Uuid,
    pub car: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub daily_price: f64,
}
