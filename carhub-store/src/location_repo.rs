use async_trait::async_trait;
use carhub_core::repository::LocationRepository;
use carhub_core::StoreError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM locations WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn children_of(&self, id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let children: Vec<Uuid> = sqlx::query_scalar(
            "SELECT id FROM locations WHERE parent_location = $1 ORDER BY name, id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(children)
    }
}
