//! Console table and CSV/JSON export of a result set.

use crate::inventory::types::KeyRecord;
use crate::utils::format::or_na;
use crate::utils::time::last_used_human;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output format for `search`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// One row of the console table.
#[derive(Debug, Tabled)]
struct KeyRow {
    #[tabled(rename = "UserName")]
    user_name: String,
    #[tabled(rename = "Access Key ID")]
    access_key_id: String,
    #[tabled(rename = "Last Used")]
    last_used: String,
    #[tabled(rename = "Last Service Used")]
    last_service: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&KeyRecord> for KeyRow {
    fn from(record: &KeyRecord) -> Self {
        Self {
            user_name: record.user_name.clone(),
            access_key_id: record.access_key_id.clone(),
            last_used: last_used_human(record.last_used.as_ref(), record.last_used_days),
            last_service: or_na(record.last_service.as_deref()),
            region: or_na(record.last_region.as_deref()),
            status: record.status.clone(),
        }
    }
}

/// Flat row for CSV and JSON exports
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    user_name: &'a str,
    access_key_id: &'a str,
    status: &'a str,
    created: Option<DateTime<Utc>>,
    last_used: Option<DateTime<Utc>>,
    last_used_days: i64,
    last_service: Option<&'a str>,
    last_region: Option<&'a str>,
}

impl<'a> From<&'a KeyRecord> for ExportRow<'a> {
    fn from(record: &'a KeyRecord) -> Self {
        Self {
            user_name: &record.user_name,
            access_key_id: &record.access_key_id,
            status: &record.status,
            created: record.created,
            last_used: record.last_used,
            last_used_days: record.last_used_days,
            last_service: record.last_service.as_deref(),
            last_region: record.last_region.as_deref(),
        }
    }
}

/// CSV header, written even when there are no rows
pub const EXPORT_COLUMNS: [&str; 8] = [
    "user_name",
    "access_key_id",
    "status",
    "created",
    "last_used",
    "last_used_days",
    "last_service",
    "last_region",
];

/// Render records as a bordered ASCII table.
pub fn render_table(records: &[KeyRecord]) -> String {
    let rows: Vec<KeyRow> = records.iter().map(KeyRow::from).collect();
    Table::new(rows).with(Style::ascii()).to_string()
}

/// Write records to `writer` in the requested format.
pub fn write_report<W: Write>(
    records: &[KeyRecord],
    format: ReportFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        ReportFormat::Table => {
            writeln!(writer, "{}", render_table(records))?;
        }
        ReportFormat::Csv => {
            let mut csv_writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer);
            csv_writer
                .write_record(EXPORT_COLUMNS)
                .context("Failed to write CSV header")?;
            for record in records {
                csv_writer
                    .serialize(ExportRow::from(record))
                    .context("Failed to write CSV row")?;
            }
            csv_writer.flush()?;
        }
        ReportFormat::Json => {
            let rows: Vec<ExportRow<'_>> = records.iter().map(ExportRow::from).collect();
            serde_json::to_writer_pretty(&mut writer, &rows).context("Failed to write JSON")?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
