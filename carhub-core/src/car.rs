use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored mileage value meaning "no per-day cap".
pub const UNLIMITED_MILEAGE: i32 = -1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CarType {
    Diesel,
    Gasoline,
    Electric,
    Hybrid,
    PlugInHybrid,
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum GearboxType {
    Manual,
    Automatic,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FuelPolicy {
    LikeForLike,
    FreeTank,
    FullToFull,
    FullToEmpty,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CarRange {
    Mini,
    Midi,
    Maxi,
    Scooter,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CarMultimedia {
    Touchscreen,
    Bluetooth,
    AndroidAuto,
    AppleCarPlay,
}

/// A rentable car as the storefront search reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    pub name: String,
    pub supplier: Uuid,
    pub locations: Vec<Uuid>,
    pub daily_price: f64,
    #[serde(rename = "type")]
    pub car_type: CarType,
    pub gearbox: GearboxType,
    pub fuel_policy: FuelPolicy,
    pub aircon: bool,
    pub seats: i32,
    pub doors: i32,
    /// Per-day cap in km, or [`UNLIMITED_MILEAGE`].
    pub mileage: i32,
    pub deposit: f64,
    pub range: CarRange,
    #[serde(default)]
    pub multimedia: Vec<CarMultimedia>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    pub available: bool,
    #[serde(default)]
    pub fully_booked: Option<bool>,
    #[serde(default)]
    pub coming_soon: Option<bool>,
    #[serde(default)]
    pub block_on_pay: Option<bool>,
}

impl Car {
    pub fn has_unlimited_mileage(&self) -> bool {
        self.mileage == UNLIMITED_MILEAGE
    }

    /// Unset and `false` both count as "not fully booked".
    pub fn is_fully_booked(&self) -> bool {
        self.fully_booked.unwrap_or(false)
    }

    pub fn is_coming_soon(&self) -> bool {
        self.coming_soon.unwrap_or(false)
    }

    pub fn blocks_on_pay(&self) -> bool {
        self.block_on_pay.unwrap_or(false)
    }
}
