use async_trait::async_trait;
use carhub_core::repository::BookingRepository;
use carhub_core::search::RentalPeriod;
use carhub_core::{Booking, BookingStatus, StoreError};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::parse_enum;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    car: Uuid,
    supplier: Uuid,
    from_date: DateTime<Utc>,
    to_date: DateTime<Utc>,
    status: String,
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn find_conflicting(
        &self,
        car_ids: &[Uuid],
        statuses: &[BookingStatus],
        period: &RentalPeriod,
    ) -> Result<Vec<Booking>, StoreError> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();

        // Plain read under the pool's read-committed default; no row locks.
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
            SELECT id, car, supplier, from_date, to_date, status
            FROM bookings
            WHERE car = ANY($1)
              AND status = ANY($2)
              AND status <> 'cancelled'
              AND NOT (to_date < $3 OR from_date > $4)
            "#,
        )
        .bind(car_ids)
        .bind(&statuses)
        .bind(period.from)
        .bind(period.to)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(Booking {
                    id: row.id,
                    car: row.car,
                    supplier: row.supplier,
                    from: row.from_date,
                    to: row.to_date,
                    status: parse_enum(&row.status)?,
                })
            })
            .collect()
    }
}
