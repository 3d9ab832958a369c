//! # cleanup-aws-access-keys
//!
//! A cloud security tool to search and clean up unused AWS IAM access keys.
//!
//! ## Overview
//!
//! Long-lived IAM access keys that nobody uses any more are a liability.
//! This crate inventories every access key in an account, filters them by
//! how long ago they were last used, by owning user and by status, and then
//! activates, deactivates or deletes the matched set in bulk.
//!
//! ## Architecture
//!
//! - [`iam_api`] - The IAM calls the tool needs, behind the [`iam_api::AccessKeyApi`] trait
//! - [`inventory`] - Filters, the search pass, reporting and lifecycle actions
//! - [`commands`] - Command implementations wired to the CLI
//! - [`utils`] - Formatting, time arithmetic, progress and prompting helpers
//!
//! ## Example Usage
//!
//! ```bash
//! # List every access key
//! cleanup-aws-access-keys search
//!
//! # Active keys unused for 90 days or more
//! cleanup-aws-access-keys search --status active --last-used 90
//!
//! # Deactivate them after confirmation
//! cleanup-aws-access-keys deactivate --last-used 90
//!
//! # Delete keys that were never used, without prompting
//! cleanup-aws-access-keys delete --last-used -1 --auto-approve
//! ```
//!
//! ## Filters
//!
//! - `--last-used N` - keys last used at least N days ago (`-1` for never used)
//! - `--username NAME` - keys owned by this IAM user only
//! - `--status active|inactive` - keys with this status only
//!
//! Keys that were never used count as used 0 days ago, so `--last-used 30`
//! does not match them. Use `--last-used -1` to target them.
//!
//! ## Installation
//!
//! ```bash
//! cargo install --path .
//! ```

pub mod commands;
pub mod iam_api;
pub mod inventory;
pub mod utils;
