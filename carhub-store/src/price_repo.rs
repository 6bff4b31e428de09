use async_trait::async_trait;
use carhub_core::repository::DateBasedPriceRepository;
use carhub_core::{DateBasedPrice, StoreError};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgDateBasedPriceRepository {
    pool: PgPool,
}

impl PgDateBasedPriceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PriceRow {
    id: Uuid,
    car: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    daily_price: f64,
}

#[async_trait]
impl DateBasedPriceRepository for PgDateBasedPriceRepository {
    async fn find_by_car_ids(&self, car_ids: &[Uuid]) -> Result<Vec<DateBasedPrice>, StoreError> {
        let rows: Vec<PriceRow> = sqlx::query_as(
            "SELECT id, car, start_date, end_date, daily_price FROM date_based_prices WHERE car = ANY($1) ORDER BY start_date",
        )
        .bind(car_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| DateBasedPrice {
                id: row.id,
                car: row.car,
                start_date: row.start_date,
                end_date: row.end_date,
                daily_price: row.daily_price,
            })
            .collect())
    }
}
