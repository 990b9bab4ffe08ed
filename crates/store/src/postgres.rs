use async_trait::async_trait;
use common::{MenuItemId, OwnerId, RestaurantId};
use rust_decimal::Decimal;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::gateway::{OwnedWrite, RestaurantStore};
use crate::records::{MenuItemChanges, MenuItemRecord, RestaurantChanges, RestaurantRecord};
use crate::Result;

/// PostgreSQL-backed store implementation.
///
/// Mutations that span more than one statement run inside a
/// transaction, with the parent restaurant row locked first, so the
/// fused ownership check and the write cannot interleave with a
/// concurrent delete or update of the same aggregate.
#[derive(Clone)]
pub struct PostgresRestaurantStore {
    pool: PgPool,
}

impl PostgresRestaurantStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        tracing::info!("running database migrations");
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_restaurant(row: PgRow) -> Result<RestaurantRecord> {
        Ok(RestaurantRecord {
            id: RestaurantId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            phone_number: row.try_get("phone_number")?,
            email: row.try_get("email")?,
            owner_id: OwnerId::from_uuid(row.try_get::<Uuid, _>("owner_id")?),
        })
    }

    fn row_to_menu_item(row: PgRow) -> Result<MenuItemRecord> {
        Ok(MenuItemRecord {
            id: MenuItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get::<Decimal, _>("price")?,
            available: row.try_get("available")?,
            restaurant_id: RestaurantId::from_uuid(row.try_get::<Uuid, _>("restaurant_id")?),
        })
    }
}

#[async_trait]
impl RestaurantStore for PostgresRestaurantStore {
    async fn insert_restaurant(&self, record: RestaurantRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO restaurants (id, name, address, phone_number, email, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.name)
        .bind(&record.address)
        .bind(&record.phone_number)
        .bind(&record.email)
        .bind(record.owner_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_restaurant(&self, id: RestaurantId) -> Result<Option<RestaurantRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, address, phone_number, email, owner_id
            FROM restaurants
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_restaurant).transpose()
    }

    async fn find_restaurant_owned(
        &self,
        id: RestaurantId,
        owner_id: OwnerId,
    ) -> Result<Option<RestaurantRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, address, phone_number, email, owner_id
            FROM restaurants
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_restaurant).transpose()
    }

    async fn restaurant_exists(&self, id: RestaurantId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM restaurants WHERE id = $1)")
                .bind(id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list_restaurants(&self) -> Result<Vec<RestaurantRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, address, phone_number, email, owner_id
            FROM restaurants
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_restaurant).collect()
    }

    async fn list_restaurants_by_owner(
        &self,
        owner_id: OwnerId,
    ) -> Result<Vec<RestaurantRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, address, phone_number, email, owner_id
            FROM restaurants
            WHERE owner_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_restaurant).collect()
    }

    async fn update_restaurant(
        &self,
        id: RestaurantId,
        owner_id: OwnerId,
        changes: RestaurantChanges,
    ) -> Result<Option<RestaurantRecord>> {
        // Single conditional statement: the fused predicate and the
        // overwrite cannot be split by a concurrent writer.
        let row = sqlx::query(
            r#"
            UPDATE restaurants
            SET name = $3, address = $4, phone_number = $5, email = $6
            WHERE id = $1 AND owner_id = $2
            RETURNING id, name, address, phone_number, email, owner_id
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .bind(&changes.name)
        .bind(&changes.address)
        .bind(&changes.phone_number)
        .bind(&changes.email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_restaurant).transpose()
    }

    async fn delete_restaurant(&self, id: RestaurantId, owner_id: OwnerId) -> Result<bool> {
        // Menu items are removed by the FK's ON DELETE CASCADE, so the
        // fused predicate and the cascade are one atomic statement.
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1 AND owner_id = $2")
            .bind(id.as_uuid())
            .bind(owner_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_menu_item(
        &self,
        record: MenuItemRecord,
        owner_id: OwnerId,
    ) -> Result<Option<MenuItemRecord>> {
        let mut tx = self.pool.begin().await?;

        // Lock the parent row while the fused predicate holds so a
        // concurrent restaurant delete cannot slip between the check
        // and the insert.
        let parent: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM restaurants WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(record.restaurant_id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        if parent.is_none() {
            return Ok(None);
        }

        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, description, price, available, restaurant_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.price)
        .bind(record.available)
        .bind(record.restaurant_id.as_uuid())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(record))
    }

    async fn find_menu_item(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
    ) -> Result<Option<MenuItemRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price, available, restaurant_id
            FROM menu_items
            WHERE id = $1 AND restaurant_id = $2
            "#,
        )
        .bind(item_id.as_uuid())
        .bind(restaurant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_menu_item).transpose()
    }

    async fn list_menu_items(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItemRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, available, restaurant_id
            FROM menu_items
            WHERE restaurant_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(restaurant_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_menu_item).collect()
    }

    async fn update_menu_item(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
        owner_id: OwnerId,
        changes: MenuItemChanges,
    ) -> Result<OwnedWrite<MenuItemRecord>> {
        let mut tx = self.pool.begin().await?;

        // Parent ownership strictly before item existence.
        let parent: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM restaurants WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(restaurant_id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        if parent.is_none() {
            return Ok(OwnedWrite::RestaurantMissing);
        }

        let row = sqlx::query(
            r#"
            UPDATE menu_items
            SET name = $3, description = $4, price = $5, available = $6
            WHERE id = $1 AND restaurant_id = $2
            RETURNING id, name, description, price, available, restaurant_id
            "#,
        )
        .bind(item_id.as_uuid())
        .bind(restaurant_id.as_uuid())
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.price)
        .bind(changes.available)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(OwnedWrite::ItemMissing);
        };

        let record = Self::row_to_menu_item(row)?;
        tx.commit().await?;
        Ok(OwnedWrite::Applied(record))
    }

    async fn delete_menu_item(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
        owner_id: OwnerId,
    ) -> Result<OwnedWrite<()>> {
        let mut tx = self.pool.begin().await?;

        let parent: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM restaurants WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(restaurant_id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        if parent.is_none() {
            return Ok(OwnedWrite::RestaurantMissing);
        }

        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1 AND restaurant_id = $2")
            .bind(item_id.as_uuid())
            .bind(restaurant_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(OwnedWrite::ItemMissing);
        }

        tx.commit().await?;
        Ok(OwnedWrite::Applied(()))
    }
}
