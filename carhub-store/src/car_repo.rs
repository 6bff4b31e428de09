use async_trait::async_trait;
use carhub_core::repository::CarRepository;
use carhub_core::{Car, CarPredicate, StoreError};
use sqlx::PgPool;
use uuid::Uuid;

use crate::parse_enum;

pub struct PgCarRepository {
    pool: PgPool,
}

impl PgCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CarRow {
    id: Uuid,
    name: String,
    supplier: Uuid,
    locations: Vec<Uuid>,
    daily_price: f64,
    car_type: String,
    gearbox: String,
    fuel_policy: String,
    aircon: bool,
    seats: i32,
    doors: i32,
    mileage: i32,
    deposit: f64,
    car_range: String,
    multimedia: Vec<String>,
    rating: Option<f64>,
    image: Option<String>,
    available: bool,
    fully_booked: Option<bool>,
    coming_soon: Option<bool>,
    block_on_pay: Option<bool>,
}

impl TryFrom<CarRow> for Car {
    type Error = StoreError;

    fn try_from(row: CarRow) -> Result<Self, StoreError> {
        Ok(Car {
            id: row.id,
            name: row.name,
            supplier: row.supplier,
            locations: row.locations,
            daily_price: row.daily_price,
            car_type: parse_enum(&row.car_type)?,
            gearbox: parse_enum(&row.gearbox)?,
            fuel_policy: parse_enum(&row.fuel_policy)?,
            aircon: row.aircon,
            seats: row.seats,
            doors: row.doors,
            mileage: row.mileage,
            deposit: row.deposit,
            range: parse_enum(&row.car_range)?,
            multimedia: row.multimedia.iter().map(|m| parse_enum(m)).collect::<Result<_, _>>()?,
            rating: row.rating,
            image: row.image,
            available: row.available,
            fully_booked: row.fully_booked,
            coming_soon: row.coming_soon,
            block_on_pay: row.block_on_pay,
        })
    }
}

#[async_trait]
impl CarRepository for PgCarRepository {
    async fn find_cars(&self, predicate: &CarPredicate) -> Result<Vec<Car>, StoreError> {
        // Supplier and location narrow the scan; the full predicate runs on the rows.
        let rows: Vec<CarRow> = sqlx::query_as(
            r#"
            SELECT id, name, supplier, locations, daily_price, car_type, gearbox, fuel_policy,
                   aircon, seats, doors, mileage, deposit, car_range, multimedia, rating, image,
                   available, fully_booked, coming_soon, block_on_pay
            FROM cars
            WHERE supplier = ANY($1)
              AND locations && $2
              AND available = TRUE
            ORDER BY created_at, id
            "#,
        )
        .bind(predicate.suppliers.as_slice())
        .bind(predicate.locations.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let mut cars = Vec::with_capacity(rows.len());
        for row in rows {
            let car = Car::try_from(row)?;
            if predicate.matches(&car) {
                cars.push(car);
            }
        }

        Ok(cars)
    }
}
