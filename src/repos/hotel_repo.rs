/*
 * Responsibility
 * - Hotel record persistence behind the HotelStore trait
 * - Partition key = owner_id, sort key = id; records are insert-only
 * - Postgres (sqlx) for deployments, in-memory for development and tests
 */
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

/// Object key used when a hotel was added without an image.
pub const NO_FILE_SENTINEL: &str = "Empty";

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Hotel {
    pub owner_id: String,
    pub id: String,
    pub name: String,
    pub city: String,
    pub price: i32,
    pub rating: i32,
    pub file_name: String,
}

#[async_trait]
pub trait HotelStore: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Every record whose owner_id equals `owner_id`. Unpaginated.
    async fn scan_by_owner(&self, owner_id: &str) -> Result<Vec<Hotel>, RepoError>;

    // Insert a new record. An existing (owner_id, id) is a conflict, never an overwrite.
    async fn put(&self, hotel: &Hotel) -> Result<(), RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgHotelStore {
    db: PgPool,
}

impl PgHotelStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HotelStore for PgHotelStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn scan_by_owner(&self, owner_id: &str) -> Result<Vec<Hotel>, RepoError> {
        let rows = sqlx::query_as::<_, Hotel>(
            r#"
            SELECT owner_id, id, name, city, price, rating, file_name
            FROM hotels
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn put(&self, hotel: &Hotel) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO hotels (owner_id, id, name, city, price, rating, file_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&hotel.owner_id)
        .bind(&hotel.id)
        .bind(&hotel.name)
        .bind(&hotel.city)
        .bind(hotel.price)
        .bind(hotel.rating)
        .bind(&hotel.file_name)
        .execute(&self.db)
        .await
        .map_err(|e| RepoError::from_sqlx(e, &hotel.owner_id, &hotel.id))?;

        Ok(())
    }
}

/// In-process store keyed by (owner_id, id).
#[derive(Clone, Debug, Default)]
pub struct MemoryHotelStore {
    records: Arc<RwLock<BTreeMap<(String, String), Hotel>>>,
}

impl MemoryHotelStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    #[cfg(test)]
    pub fn all(&self) -> Vec<Hotel> {
        self.records
            .read()
            .map(|r| r.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HotelStore for MemoryHotelStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn scan_by_owner(&self, owner_id: &str) -> Result<Vec<Hotel>, RepoError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .values()
            .filter(|h| h.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn put(&self, hotel: &Hotel) -> Result<(), RepoError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let key = (hotel.owner_id.clone(), hotel.id.clone());
        if records.contains_key(&key) {
            return Err(RepoError::Conflict {
                owner_id: hotel.owner_id.clone(),
                id: hotel.id.clone(),
            });
        }
        records.insert(key, hotel.clone());
        Ok(())
    }
}

fn poisoned<T>(_: T) -> RepoError {
    RepoError::Poisoned
}
