use anyhow::Result;
use serde::Deserialize;
use std::io::Read;

use crate::application::SpendingService;
use crate::domain::{NewSpending, parse_amount};

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
}

/// One CSV row. Extra columns (such as `id` from an export) are ignored;
/// the store always assigns fresh ids.
#[derive(Debug, Deserialize)]
struct CsvSpending {
    date: String,
    location: String,
    item: String,
    amount: String,
}

/// Importer for loading entries into the ledger
pub struct Importer<'a> {
    service: &'a SpendingService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a SpendingService) -> Self {
        Self { service }
    }

    /// Import entries from CSV with a `date,location,item,amount` header.
    /// Invalid rows are reported and skipped; valid rows are recorded in file order.
    pub async fn import_spending_csv<R: Read>(
        &self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut imported = 0;
        let mut errors = Vec::new();

        for result in csv_reader.records() {
            // quoted fields may span lines, so take the line the record starts on
            let line = match &result {
                Ok(record) => record.position().map(|p| p.line()),
                Err(e) => e.position().map(|p| p.line()),
            }
            .unwrap_or_default() as usize;

            let parsed =
                result.and_then(|record| record.deserialize::<CsvSpending>(Some(&headers)));
            let row = match parsed {
                Ok(row) => row,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let amount = match parse_amount(&row.amount) {
                Ok(a) => a,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("amount".to_string()),
                        error: format!("Invalid amount: {}", e),
                    });
                    continue;
                }
            };

            let spending = match NewSpending::new(&row.date, &row.location, &row.item, amount) {
                Ok(s) => s,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            if options.dry_run {
                imported += 1;
                continue;
            }

            match self.service.create_spending(spending).await {
                Ok(_) => imported += 1,
                Err(e) => errors.push(ImportError {
                    line,
                    field: None,
                    error: format!("Spending creation failed: {}", e),
                }),
            }
        }

        Ok(ImportResult { imported, errors })
    }
}
