use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::domain::{DATE_FORMAT, NewSpending, Spending, SpendingId};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying spending entries.
///
/// Every mutation is a single SQL statement, so SQLite applies it atomically
/// and serialises it against concurrent writers.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Store a validated entry and return it with its assigned id.
    pub async fn insert_spending(&self, spending: &NewSpending) -> Result<Spending> {
        let row = sqlx::query(
            r#"
            INSERT INTO spending (date, location, item, amount)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(spending.date.format(DATE_FORMAT).to_string())
        .bind(&spending.location)
        .bind(&spending.item)
        .bind(spending.amount)
        .fetch_one(&self.pool)
        .await
        .context("Failed to save spending")?;

        Ok(Spending {
            id: row.get("id"),
            date: spending.date,
            location: spending.location.clone(),
            item: spending.item.clone(),
            amount: spending.amount,
        })
    }

    /// Get an entry by id.
    pub async fn get_spending(&self, id: SpendingId) -> Result<Option<Spending>> {
        let row = sqlx::query(
            r#"
            SELECT id, date, location, item, amount
            FROM spending
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch spending")?;

        row.as_ref().map(Self::row_to_spending).transpose()
    }

    /// List all entries in insertion order.
    pub async fn list_spending(&self) -> Result<Vec<Spending>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, location, item, amount
            FROM spending
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list spending")?;

        rows.iter().map(Self::row_to_spending).collect()
    }

    /// Delete an entry and return it, or `None` if no entry had that id.
    pub async fn delete_spending(&self, id: SpendingId) -> Result<Option<Spending>> {
        let row = sqlx::query(
            r#"
            DELETE FROM spending
            WHERE id = ?
            RETURNING id, date, location, item, amount
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to delete spending")?;

        row.as_ref().map(Self::row_to_spending).transpose()
    }

    /// Count stored entries.
    pub async fn count_spending(&self) -> Result<i64> {
        let count: i64 = sqlx::query("SELECT COUNT(*) as count FROM spending")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count spending")?
            .get("count");
        Ok(count)
    }

    fn row_to_spending(row: &sqlx::sqlite::SqliteRow) -> Result<Spending> {
        let date_str: String = row.get("date");

        Ok(Spending {
            id: row.get("id"),
            date: NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
                .with_context(|| format!("Invalid stored date: {}", date_str))?,
            location: row.get("location"),
            item: row.get("item"),
            amount: row.get("amount"),
        })
    }
}
