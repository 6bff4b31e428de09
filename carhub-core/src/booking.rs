use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BookingStatus {
    Void,
    Pending,
    Deposit,
    Paid,
    Reserved,
    Cancelled,
}

impl BookingStatus {
    /// Statuses that hold a car against other renters.
    pub const CONFLICTING: [BookingStatus; 3] =
        [BookingStatus::Paid, BookingStatus::Reserved, BookingStatus::Deposit];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Void => "void",
            BookingStatus::Pending => "pending",
            BookingStatus::Deposit => "deposit",
            BookingStatus::Paid => "paid",
            BookingStatus::Reserved => "reserved",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_conflicting(&self) -> bool {
        Self::CONFLICTING.contains(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub car: Uuid,
    pub supplier: Uuid,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_statuses() {
        assert!(BookingStatus::Paid.is_conflicting());
        assert!(BookingStatus::Reserved.is_conflicting());
        assert!(BookingStatus::Deposit.is_conflicting());
        assert!(!BookingStatus::Pending.is_conflicting());
        assert!(!BookingStatus::Void.is_conflicting());
        assert!(!BookingStatus::Cancelled.is_conflicting());
    }

    #[test]
    fn test_status_wire_name_matches_as_str() {
        let value = serde_json::to_value(BookingStatus::Reserved).unwrap();
        assert_eq!(value.as_str(), Some(BookingStatus::Reserved.as_str()));
    }
}
