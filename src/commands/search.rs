//! Access key search command.
//!
//! Scans every IAM user in the account, lists their access keys and
//! reports those matching the filters.
//!
//! # Usage
//!
//! ```bash
//! # Every access key in the account
//! cleanup-aws-access-keys search
//!
//! # Active keys not used for 90 days or more
//! cleanup-aws-access-keys search --status active --last-used 90
//!
//! # Keys that were never used, exported as CSV
//! cleanup-aws-access-keys search --last-used -1 --format csv --output never_used.csv
//! ```
//!
//! # Requirements
//!
//! AWS credentials from the standard chain (`AWS_PROFILE`, environment
//! variables, SSO, instance profile) with `iam:ListUsers`,
//! `iam:ListAccessKeys` and `iam:GetAccessKeyLastUsed`.

use crate::iam_api::{AccessKeyApi, IamClient};
use crate::inventory::report::{write_report, ReportFormat};
use crate::inventory::search::search_keys;
use crate::inventory::types::{KeyRecord, SearchFilters, SearchReport, NEVER_USED};
use crate::utils::format::format_number;
use crate::utils::progress::ProgressBar;
use crate::utils::time::unix_date;
use anyhow::{Context, Result};
use chrono::{Local, Utc};
use std::fs::File;
use std::io::{self, BufWriter, Write};

pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROJECT_URL: &str = "https://github.com/tuladhar/cleanup-aws-access-keys";

pub const NO_KEYS_FOUND: &str = "No access key(s) found.";

pub async fn run(
    filters: &SearchFilters,
    format: ReportFormat,
    output: Option<&str>,
) -> Result<()> {
    let client = IamClient::from_env().await;
    if let Some(region) = client.region() {
        eprintln!("AWS Region: {}", region);
    }

    execute(&client, filters, format, output, &mut io::stdout().lock()).await?;
    Ok(())
}

/// Search and emit the report, writing stdout output to `out`.
///
/// An empty result still produces a report when a file or a machine
/// format is requested, so a stale export is never left behind.
pub async fn execute<A, W>(
    api: &A,
    filters: &SearchFilters,
    format: ReportFormat,
    output: Option<&str>,
    out: &mut W,
) -> Result<SearchReport>
where
    A: AccessKeyApi,
    W: Write,
{
    let report = scan(api, filters).await?;

    if report.records.is_empty() {
        if output.is_none() && format == ReportFormat::Table {
            writeln!(out, "{}", NO_KEYS_FOUND)?;
            return Ok(report);
        }
        eprintln!("{}", NO_KEYS_FOUND);
    }

    emit_report(&report.records, format, output, out)?;
    Ok(report)
}

/// Print the banner, run the search with a spinner, and summarise.
///
/// Shared by `search` and the lifecycle commands.
pub async fn scan<A: AccessKeyApi>(api: &A, filters: &SearchFilters) -> Result<SearchReport> {
    let started = Local::now();
    eprintln!(
        "Starting {} v{} ({}) at {}",
        PROGRAM_NAME,
        VERSION,
        PROJECT_URL,
        unix_date(&started)
    );
    for line in describe_filters(filters) {
        eprintln!("{}", line);
    }
    eprintln!();

    let progress = ProgressBar::new_spinner("Scanning IAM users");
    let result = search_keys(api, filters, started.with_timezone(&Utc), &progress).await;
    progress.finish_and_clear();
    let report = result.context("Access key search failed")?;

    eprintln!("=== Summary ===");
    eprintln!("Users scanned: {}", format_number(report.users_scanned));
    eprintln!("Access keys inspected: {}", format_number(report.keys_scanned));
    eprintln!("Access keys matched: {}", format_number(report.records.len()));
    if report.lookup_failures > 0 {
        eprintln!(
            "⚠️  Last-used lookups failed: {}",
            format_number(report.lookup_failures)
        );
    }
    eprintln!();

    Ok(report)
}

/// Human description of the active filters, one line each
pub fn describe_filters(filters: &SearchFilters) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(user) = &filters.username {
        lines.push(format!("Filtering by username: {}", user));
    }
    if let Some(status) = filters.status {
        lines.push(format!("Filtering by status: {}", status));
    }
    match filters.last_used {
        NEVER_USED => lines.push("Filtering by last used: never".to_string()),
        0 => {}
        days => lines.push(format!("Filtering by last used: {} days or more", days)),
    }
    lines
}

/// Write the report to the file at `output`, or to `out` when no path is given
pub fn emit_report<W: Write>(
    records: &[KeyRecord],
    format: ReportFormat,
    output: Option<&str>,
    out: &mut W,
) -> Result<()> {
    if let Some(output_path) = output {
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create output file: {}", output_path))?;
        let mut writer = BufWriter::new(file);
        write_report(records, format, &mut writer)
            .and_then(|()| writer.flush().map_err(Into::into))
            .with_context(|| format!("Failed to write report to: {}", output_path))?;
        eprintln!("Report written to: {}", output_path);
    } else {
        write_report(records, format, out)?;
    }
    Ok(())
}
