//! Utility functions and helpers.
//!
//! Shared by the command implementations:
//!
//! - [`format`] - Number and missing-value formatting
//! - [`progress`] - Spinner shown while scanning users
//! - [`prompt`] - Interactive yes/no confirmation
//! - [`time`] - Day arithmetic and timestamp display helpers
//!
//! # Examples
//!
//! ```
//! use cleanup_aws_access_keys::utils::time::last_used_human;
//!
//! assert_eq!(last_used_human(None, 0), "N/A");
//! ```

pub mod format;
pub mod progress;
pub mod prompt;
pub mod time;
