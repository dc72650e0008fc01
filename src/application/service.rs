use crate::domain::{
    MonthlySummary, NewSpending, Spending, SpendingDraft, SpendingId, monthly_summary,
};
use crate::storage::Repository;

use super::AppError;

/// Application service owning the spending ledger.
/// This is the primary interface for any client (HTTP API, CLI, import/export).
pub struct SpendingService {
    repo: Repository,
}

impl SpendingService {
    /// Create a new service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Open (or create) the database at the given path and ensure the schema exists.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Ledger operations
    // ========================

    /// Record a validated entry. The store assigns the id.
    pub async fn create_spending(&self, spending: NewSpending) -> Result<Spending, AppError> {
        let spending = self.repo.insert_spending(&spending).await?;
        tracing::info!(
            id = spending.id,
            date = %spending.date,
            amount = spending.amount,
            "recorded spending"
        );
        Ok(spending)
    }

    /// Validate a client draft and record it. Nothing is stored when validation fails.
    pub async fn create_from_draft(&self, draft: &SpendingDraft) -> Result<Spending, AppError> {
        let spending = draft.validate()?;
        self.create_spending(spending).await
    }

    /// List all entries, oldest first.
    pub async fn list_spending(&self) -> Result<Vec<Spending>, AppError> {
        Ok(self.repo.list_spending().await?)
    }

    /// Get a single entry.
    pub async fn get_spending(&self, id: SpendingId) -> Result<Spending, AppError> {
        self.repo
            .get_spending(id)
            .await?
            .ok_or(AppError::SpendingNotFound(id))
    }

    /// Delete an entry, returning what was removed.
    pub async fn delete_spending(&self, id: SpendingId) -> Result<Spending, AppError> {
        let deleted = self
            .repo
            .delete_spending(id)
            .await?
            .ok_or(AppError::SpendingNotFound(id))?;
        tracing::info!(id, "deleted spending");
        Ok(deleted)
    }

    /// Number of entries currently stored.
    pub async fn count_spending(&self) -> Result<i64, AppError> {
        Ok(self.repo.count_spending().await?)
    }

    // ========================
    // Aggregation
    // ========================

    /// Monthly totals recomputed from the current entry set.
    /// The entries are read in one query, so a summary never mixes states.
    pub async fn monthly_summary(&self) -> Result<Vec<MonthlySummary>, AppError> {
        let spendings = self.repo.list_spending().await?;
        Ok(monthly_summary(&spendings)?)
    }
}
