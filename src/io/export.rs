use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::application::SpendingService;
use crate::domain::{DATE_FORMAT, MonthlySummary, Spending};

/// Ledger snapshot written by the JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub spending: Vec<Spending>,
    pub monthly_summary: Vec<MonthlySummary>,
}

/// Exporter for converting ledger data to CSV or JSON
pub struct Exporter<'a> {
    service: &'a SpendingService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a SpendingService) -> Self {
        Self { service }
    }

    /// Export entries to CSV. The output can be fed back to the importer.
    pub async fn export_spending_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let spendings = self.service.list_spending().await?;
        write_spending_csv(writer, &spendings)
    }

    /// Export monthly totals to CSV
    pub async fn export_summary_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let summary = self.service.monthly_summary().await?;
        write_summary_csv(writer, &summary)
    }

    /// Export entries as a JSON array
    pub async fn export_spending_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let spendings = self.service.list_spending().await?;
        serde_json::to_writer_pretty(&mut writer, &spendings)?;
        writer.flush()?;
        Ok(spendings.len())
    }

    /// Export monthly totals as a JSON array
    pub async fn export_summary_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let summary = self.service.monthly_summary().await?;
        serde_json::to_writer_pretty(&mut writer, &summary)?;
        writer.flush()?;
        Ok(summary.len())
    }

    /// Export entries and totals as one JSON snapshot
    pub async fn export_full_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let spending = self.service.list_spending().await?;
        let monthly_summary = crate::domain::monthly_summary(&spending)?;

        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            spending,
            monthly_summary,
        };

        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.flush()?;

        Ok(snapshot)
    }
}

/// Write entries as CSV with an `id,date,location,item,amount` header.
pub fn write_spending_csv<W: Write>(writer: W, spendings: &[Spending]) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["id", "date", "location", "item", "amount"])?;

    for spending in spendings {
        csv_writer.write_record([
            spending.id.to_string(),
            spending.date.format(DATE_FORMAT).to_string(),
            spending.location.clone(),
            spending.item.clone(),
            spending.amount.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(spendings.len())
}

/// Write monthly totals as CSV with a `month,total` header.
pub fn write_summary_csv<W: Write>(writer: W, summary: &[MonthlySummary]) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["month", "total"])?;

    for row in summary {
        csv_writer.write_record([row.month.to_string(), row.total.to_string()])?;
    }

    csv_writer.flush()?;
    Ok(summary.len())
}
