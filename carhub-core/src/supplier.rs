use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user in the supplier role, restricted to the fields search reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    pub full_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub blacklisted: bool,
    /// `None` means no minimum.
    #[serde(default)]
    pub minimum_rental_days: Option<u32>,
    /// `None` means unbounded; `Some(0)` excludes the supplier entirely.
    #[serde(default)]
    pub supplier_car_limit: Option<u32>,
    #[serde(default)]
    pub price_change_rate: Option<f64>,
}

/// Public projection attached to every search result row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSummary {
    pub id: Uuid,
    pub full_name: String,
    pub avatar: Option<String>,
    pub price_change_rate: Option<f64>,
}

impl From<&Supplier> for SupplierSummary {
    fn from(supplier: &Supplier) -> Self {
        Self {
            id: supplier.id,
            full_name: supplier.full_name.clone(),
            avatar: supplier.avatar.clone(),
            price_change_rate: supplier.price_change_rate,
        }
    }
}
