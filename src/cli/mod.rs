use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};

use crate::api::{ServerConfig, run_server};
use crate::application::SpendingService;
use crate::domain::{
    DATE_FORMAT, MonthlySummary, NewSpending, Spending, SpendingId, format_amount, parse_amount,
};
use crate::io::{Exporter, ImportOptions, Importer, write_spending_csv, write_summary_csv};

/// spendbook - Expense ledger with monthly totals
#[derive(Parser)]
#[command(name = "spendbook")]
#[command(about = "Record expenses and see what each month cost you")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "SPENDBOOK_DATABASE", default_value = "spendbook.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportType {
    Spending,
    Summary,
    Full,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, env = "SPENDBOOK_BIND", default_value = "0.0.0.0:8080")]
        bind: String,

        /// Name reported by /ping
        #[arg(long, env = "POD_NAME", default_value = "local")]
        instance_name: String,

        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,
    },

    /// Record a spending entry
    Add {
        /// Amount in whole currency units (e.g., "1200" or "1,200")
        amount: String,

        /// Where the money was spent
        #[arg(short, long)]
        location: String,

        /// What was bought
        #[arg(short, long)]
        item: String,

        /// Date of the spending (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List all entries, oldest first
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show a single entry
    Show {
        /// Entry ID
        id: SpendingId,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: SpendingId,
    },

    /// Show totals per month
    Summary {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Export data to CSV or JSON
    Export {
        /// What to export
        #[arg(value_enum)]
        export_type: ExportType,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv or json (default: csv, json for full)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Import entries from CSV (header: date,location,item,amount)
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Validate and report without importing
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let service = SpendingService::init(&self.database)
            .await
            .with_context(|| format!("Failed to open database {}", self.database))?;

        match self.command {
            Commands::Init => {
                println!("Database initialized: {}", self.database);
            }

            Commands::Serve {
                bind,
                instance_name,
                no_cors,
            } => {
                let config = ServerConfig {
                    bind,
                    instance_name,
                    enable_cors: !no_cors,
                };
                run_server(config, service).await?;
            }

            Commands::Add {
                amount,
                location,
                item,
                date,
            } => {
                let amount = parse_amount(&amount).context("Invalid amount")?;
                let date = date.unwrap_or_else(|| Local::now().format(DATE_FORMAT).to_string());
                let spending = NewSpending::new(&date, &location, &item, amount)?;
                let spending = service.create_spending(spending).await?;
                println!(
                    "Recorded #{}: {} | {} | {} | {}",
                    spending.id,
                    spending.date,
                    spending.location,
                    spending.item,
                    format_amount(spending.amount)
                );
            }

            Commands::List { format } => {
                let spendings = service.list_spending().await?;
                print_spending(&spendings, format)?;
            }

            Commands::Show { id } => {
                let spending = service.get_spending(id).await?;
                println!("Spending #{}", spending.id);
                println!("  Date:     {}", spending.date);
                println!("  Location: {}", spending.location);
                println!("  Item:     {}", spending.item);
                println!("  Amount:   {}", format_amount(spending.amount));
            }

            Commands::Delete { id } => {
                let spending = service.delete_spending(id).await?;
                println!(
                    "Deleted #{}: {} | {} | {}",
                    spending.id,
                    spending.date,
                    spending.item,
                    format_amount(spending.amount)
                );
            }

            Commands::Summary { format } => {
                let summary = service.monthly_summary().await?;
                print_summary(&summary, format)?;
            }

            Commands::Export {
                export_type,
                output,
                format,
            } => {
                run_export_command(&service, export_type, output, format).await?;
            }

            Commands::Import { input, dry_run } => {
                run_import_command(&service, input, dry_run).await?;
            }
        }

        Ok(())
    }
}

fn print_spending(spendings: &[Spending], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(spendings)?);
        }
        OutputFormat::Csv => {
            write_spending_csv(std::io::stdout(), spendings)?;
        }
        OutputFormat::Table => {
            if spendings.is_empty() {
                println!("No spendings found.");
                return Ok(());
            }
            println!(
                "{:>6} {:<10} {:<20} {:<20} {:>14}",
                "ID", "DATE", "LOCATION", "ITEM", "AMOUNT"
            );
            println!("{}", "-".repeat(74));
            for s in spendings {
                println!(
                    "{:>6} {:<10} {:<20} {:<20} {:>14}",
                    s.id,
                    s.date,
                    truncate(&s.location, 20),
                    truncate(&s.item, 20),
                    format_amount(s.amount)
                );
            }
        }
    }
    Ok(())
}

fn print_summary(summary: &[MonthlySummary], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Csv => {
            write_summary_csv(std::io::stdout(), summary)?;
        }
        OutputFormat::Table => {
            if summary.is_empty() {
                println!("No summary data available.");
                return Ok(());
            }
            println!("{:<8} {:>16}", "MONTH", "TOTAL");
            println!("{}", "-".repeat(25));
            for row in summary {
                println!("{:<8} {:>16}", row.month.to_string(), format_amount(row.total));
            }
        }
    }
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width - 1).collect();
    short.push('…');
    short
}

async fn run_export_command(
    service: &SpendingService,
    export_type: ExportType,
    output: Option<String>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let writer: Box<dyn std::io::Write> = match &output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file {}", path))?,
        ),
        None => Box::new(std::io::stdout()),
    };

    let exporter = Exporter::new(service);

    match (export_type, format) {
        (ExportType::Spending, None | Some(OutputFormat::Csv)) => {
            let count = exporter.export_spending_csv(writer).await?;
            eprintln!("Exported {} spendings", count);
        }
        (ExportType::Spending, Some(OutputFormat::Json)) => {
            let count = exporter.export_spending_json(writer).await?;
            eprintln!("Exported {} spendings", count);
        }
        (ExportType::Summary, None | Some(OutputFormat::Csv)) => {
            let count = exporter.export_summary_csv(writer).await?;
            eprintln!("Exported {} months", count);
        }
        (ExportType::Summary, Some(OutputFormat::Json)) => {
            let count = exporter.export_summary_json(writer).await?;
            eprintln!("Exported {} months", count);
        }
        (ExportType::Full, None | Some(OutputFormat::Json)) => {
            let snapshot = exporter.export_full_json(writer).await?;
            eprintln!(
                "Exported {} spendings across {} months",
                snapshot.spending.len(),
                snapshot.monthly_summary.len()
            );
        }
        (export_type, Some(format)) => {
            bail!("Cannot export {:?} as {:?}", export_type, format);
        }
    }

    Ok(())
}

async fn run_import_command(
    service: &SpendingService,
    input: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let reader: Box<dyn std::io::Read> = match &input {
        Some(path) => Box::new(
            std::fs::File::open(path)
                .with_context(|| format!("Failed to open input file {}", path))?,
        ),
        None => Box::new(std::io::stdin()),
    };

    let importer = Importer::new(service);
    let result = importer
        .import_spending_csv(reader, ImportOptions { dry_run })
        .await?;

    if dry_run {
        println!("Dry run complete");
    } else {
        println!("Import complete");
    }
    println!("  Imported: {}", result.imported);
    println!("  Errors:   {}", result.errors.len());

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in result.errors.iter().take(10) {
            match &error.field {
                Some(field) => println!("  Line {} ({}): {}", error.line, field, error.error),
                None => println!("  Line {}: {}", error.line, error.error),
            }
        }
        if result.errors.len() > 10 {
            println!("  ... and {} more errors", result.errors.len() - 10);
        }
    }

    Ok(())
}
