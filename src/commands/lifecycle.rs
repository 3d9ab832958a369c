//! Activate, deactivate and delete commands.
//!
//! Each command runs the same search as `search`, shows the matched keys,
//! asks for confirmation (unless `--auto-approve`), then applies the action
//! to every matched key.
//!
//! # Usage
//!
//! ```bash
//! # Deactivate keys unused for 90+ days
//! cleanup-aws-access-keys deactivate --last-used 90
//!
//! # Re-enable a user's keys without prompting
//! cleanup-aws-access-keys activate --username devops --auto-approve
//!
//! # Delete inactive keys that were never used
//! cleanup-aws-access-keys delete --status inactive --last-used -1
//! ```
//!
//! `activate` only ever matches inactive keys and `deactivate` only active
//! keys, whatever `--status` says. `delete` honours `--status`.

use crate::commands::search::{scan, NO_KEYS_FOUND};
use crate::iam_api::{AccessKeyApi, IamClient};
use crate::inventory::actions::{apply_action, ActionSummary, KeyAction};
use crate::inventory::report::render_table;
use crate::inventory::types::SearchFilters;
use crate::utils::prompt::ask_approval;
use anyhow::Result;
use std::io::{self, BufRead, Write};

pub async fn run(action: KeyAction, filters: SearchFilters, auto_approve: bool) -> Result<()> {
    let client = IamClient::from_env().await;
    let stdin = io::stdin();
    let summary = execute(
        &client,
        action,
        filters,
        auto_approve,
        &mut stdin.lock(),
        &mut io::stdout(),
    )
    .await?;

    if let Some(summary) = summary {
        if !summary.failed.is_empty() {
            anyhow::bail!(
                "Failed to {} {} access key(s)",
                action.verb(),
                summary.failed.len()
            );
        }
    }
    Ok(())
}

/// Search, confirm and apply.
///
/// Returns `None` when nothing matched or the prompt was declined.
pub async fn execute<A, R, W>(
    api: &A,
    action: KeyAction,
    filters: SearchFilters,
    auto_approve: bool,
    input: &mut R,
    output: &mut W,
) -> Result<Option<ActionSummary>>
where
    A: AccessKeyApi,
    R: BufRead,
    W: Write,
{
    let filters = action.constrain(filters);
    let report = scan(api, &filters).await?;

    if report.records.is_empty() {
        writeln!(output, "{}", NO_KEYS_FOUND)?;
        return Ok(None);
    }

    writeln!(output, "{}", render_table(&report.records))?;

    if !auto_approve {
        writeln!(output)?;
        writeln!(output, "{}", action.question(report.records.len()))?;
        for warning in action.warnings() {
            writeln!(output, "{}", warning)?;
        }
        if !ask_approval(input, output)? {
            writeln!(output, "No access key(s) were changed.")?;
            return Ok(None);
        }
    }

    let summary = apply_action(api, action, &report.records, output).await?;
    writeln!(output)?;
    writeln!(
        output,
        "Successfully {} {} access key(s).",
        action.past_tense(),
        summary.succeeded
    )?;

    Ok(Some(summary))
}
