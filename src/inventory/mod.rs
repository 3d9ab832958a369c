//! Access key inventory: search, reporting and lifecycle actions.
//!
//! - [`types`] - Filters, matched key records and search reports
//! - [`search`] - The paginated fetch-filter-collect pass
//! - [`report`] - Console table and CSV/JSON export
//! - [`actions`] - Bulk activate/deactivate/delete on a result set

pub mod actions;
pub mod report;
pub mod search;
pub mod types;
