// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use spendbook::api::{AppState, create_router};
use spendbook::application::SpendingService;
use spendbook::domain::{NewSpending, Spending};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(SpendingService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = SpendingService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to create a router backed by a temporary database
pub async fn test_app() -> Result<(Router, Arc<SpendingService>, TempDir)> {
    let (service, temp_dir) = test_service().await?;
    let service = Arc::new(service);
    let app = create_router(AppState::new(service.clone(), "test-pod"), true);
    Ok((app, service, temp_dir))
}

/// Helper to build a validated entry
pub fn new_spending(date: &str, location: &str, item: &str, amount: i64) -> NewSpending {
    NewSpending::new(date, location, item, amount).unwrap()
}

/// Test fixture: the two entries used throughout the examples
pub struct SampleSpendings;

impl SampleSpendings {
    /// Coffee in Tokyo (500) and lunch in Osaka (1200), both January 2024
    pub async fn create_january(service: &SpendingService) -> Result<(Spending, Spending)> {
        let coffee = service
            .create_spending(new_spending("2024-01-05", "Tokyo", "Coffee", 500))
            .await?;
        let lunch = service
            .create_spending(new_spending("2024-01-20", "Osaka", "Lunch", 1200))
            .await?;
        Ok((coffee, lunch))
    }
}
