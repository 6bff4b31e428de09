use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    /// Only one level of parent/child is used when expanding a pickup location.
    #[serde(default)]
    pub parent_location: Option<Uuid>,
}
