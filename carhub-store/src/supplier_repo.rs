use async_trait::async_trait;
use carhub_core::repository::SupplierRepository;
use carhub_core::{StoreError, Supplier};
use sqlx::PgPool;
use uuid::Uuid;

use crate::non_negative;

pub struct PgSupplierRepository {
    pool: PgPool,
}

impl PgSupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SupplierRow {
    id: Uuid,
    full_name: String,
    avatar: Option<String>,
    blacklisted: bool,
    minimum_rental_days: Option<i32>,
    supplier_car_limit: Option<i32>,
    price_change_rate: Option<f64>,
}

#[async_trait]
impl SupplierRepository for PgSupplierRepository {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Supplier>, StoreError> {
        let rows: Vec<SupplierRow> = sqlx::query_as(
            r#"
            SELECT id, full_name, avatar, blacklisted, minimum_rental_days, supplier_car_limit, price_change_rate
            FROM suppliers
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Supplier {
                id: row.id,
                full_name: row.full_name,
                avatar: row.avatar,
                blacklisted: row.blacklisted,
                minimum_rental_days: non_negative(row.minimum_rental_days),
                supplier_car_limit: non_negative(row.supplier_car_limit),
                price_change_rate: row.price_change_rate,
            })
            .collect())
    }
}
