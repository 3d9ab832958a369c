//! Command implementations.
//!
//! - [`search`] - Report access keys matching the filters
//! - [`lifecycle`] - `activate`, `deactivate` and `delete` on the matched keys
//!
//! Every command performs a fresh scan of the account; nothing is cached
//! between invocations.

pub mod lifecycle;
pub mod search;
