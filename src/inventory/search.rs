//! The search/filter/report pass.
//!
//! Users are paged through in API order. For each user the access keys are
//! listed, filtered by status, enriched with last-used metadata, and
//! filtered by age. Results keep the order IAM returned them in.

use crate::iam_api::AccessKeyApi;
use crate::inventory::types::{KeyRecord, SearchFilters, SearchReport};
use crate::utils::progress::ProgressBar;
use crate::utils::time::days_since;
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Scan the account and return every key that passes `filters`.
///
/// List failures abort the scan. A failed last-used lookup only skips
/// that key and is counted in [`SearchReport::lookup_failures`].
pub async fn search_keys<A: AccessKeyApi>(
    api: &A,
    filters: &SearchFilters,
    now: DateTime<Utc>,
    progress: &ProgressBar,
) -> Result<SearchReport> {
    let mut report = SearchReport::default();
    let mut marker: Option<String> = None;

    'pages: loop {
        let page = api.list_users_page(marker.take()).await?;

        for user_name in &page.user_names {
            if !filters.matches_user(user_name) {
                continue;
            }

            report.users_scanned += 1;
            progress.inc();

            let keys = api.list_access_keys(user_name).await?;
            for key in keys {
                report.keys_scanned += 1;

                if !filters.matches_status(&key.status) {
                    continue;
                }

                let usage = match api.get_access_key_last_used(&key.access_key_id).await {
                    Ok(usage) => usage,
                    Err(e) => {
                        progress.println(format!("⚠️  {}", e));
                        report.lookup_failures += 1;
                        continue;
                    }
                };

                let days = usage
                    .last_used
                    .as_ref()
                    .map_or(0, |ts| days_since(ts, &now));

                if !filters.matches_last_used(usage.last_used, days) {
                    continue;
                }

                report.records.push(KeyRecord {
                    user_name: key.user_name,
                    access_key_id: key.access_key_id,
                    status: key.status,
                    created: key.created,
                    last_used: usage.last_used,
                    last_used_days: days,
                    last_service: usage.service_name,
                    last_region: usage.region,
                });
            }

            // IAM user names are unique, nothing left to find
            if filters.is_target_user(user_name) {
                break 'pages;
            }
        }

        match page.next_marker {
            Some(next) => marker = Some(next),
            None => break,
        }
    }

    Ok(report)
}
