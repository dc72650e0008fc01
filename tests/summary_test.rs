mod common;

use anyhow::Result;
use common::{SampleSpendings, new_spending, test_service};

#[tokio::test]
async fn test_monthly_summary_example() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let (coffee, _) = SampleSpendings::create_january(&service).await?;

    let summary = service.monthly_summary().await?;
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].month.to_string(), "2024-01");
    assert_eq!(summary[0].total, 1700);

    service.delete_spending(coffee.id).await?;

    let summary = service.monthly_summary().await?;
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].month.to_string(), "2024-01");
    assert_eq!(summary[0].total, 1200);

    Ok(())
}

#[tokio::test]
async fn test_months_without_entries_have_no_row() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service
        .create_spending(new_spending("2024-01-31", "Tokyo", "Rent", 80000))
        .await?;
    service
        .create_spending(new_spending("2024-04-01", "Tokyo", "Rent", 80000))
        .await?;

    let months: Vec<String> = service
        .monthly_summary()
        .await?
        .iter()
        .map(|row| row.month.to_string())
        .collect();
    assert_eq!(months, vec!["2024-01", "2024-04"]);

    Ok(())
}

#[tokio::test]
async fn test_totals_match_exact_sums() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let entries = [
        ("2023-11-03", 1),
        ("2023-11-30", 999_999),
        ("2023-12-01", 333),
        ("2023-12-15", 333),
        ("2023-12-31", 334),
        ("2024-02-29", 0),
    ];
    for (date, amount) in entries {
        service
            .create_spending(new_spending(date, "Somewhere", "Something", amount))
            .await?;
    }

    let summary = service.monthly_summary().await?;
    let rows: Vec<(String, i64)> = summary
        .iter()
        .map(|row| (row.month.to_string(), row.total))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("2023-11".to_string(), 1_000_000),
            ("2023-12".to_string(), 1000),
            ("2024-02".to_string(), 0),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_month_disappears_when_last_entry_deleted() -> Result<()> {
    let (service, _temp) = test_service().await?;
    SampleSpendings::create_january(&service).await?;
    let march = service
        .create_spending(new_spending("2024-03-03", "Sapporo", "Ramen", 1000))
        .await?;

    assert_eq!(service.monthly_summary().await?.len(), 2);

    service.delete_spending(march.id).await?;

    let summary = service.monthly_summary().await?;
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].month.to_string(), "2024-01");

    Ok(())
}

#[tokio::test]
async fn test_list_and_summary_are_idempotent() -> Result<()> {
    let (service, _temp) = test_service().await?;
    SampleSpendings::create_january(&service).await?;
    service
        .create_spending(new_spending("2024-02-14", "Tokyo", "Chocolate", 1500))
        .await?;

    assert_eq!(service.list_spending().await?, service.list_spending().await?);
    assert_eq!(
        service.monthly_summary().await?,
        service.monthly_summary().await?
    );

    Ok(())
}
