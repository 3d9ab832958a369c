//! Bulk lifecycle actions on a search result set.

use crate::iam_api::{AccessKeyApi, IamResult};
use crate::inventory::types::{KeyRecord, KeyStatus, SearchFilters};
use std::io::{self, Write};

/// Mutating operation applied to every matched key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Activate,
    Deactivate,
    Delete,
}

impl KeyAction {
    /// Lower-case verb used in per-key failure messages
    pub fn verb(self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Delete => "delete",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Activate => "activated",
            Self::Deactivate => "deactivated",
            Self::Delete => "deleted",
        }
    }

    /// Status a key must have for the action to make sense.
    ///
    /// Delete applies to keys in either state.
    pub fn required_status(self) -> Option<KeyStatus> {
        match self {
            Self::Activate => Some(KeyStatus::Inactive),
            Self::Deactivate => Some(KeyStatus::Active),
            Self::Delete => None,
        }
    }

    /// Narrow user-supplied filters to the keys this action can touch.
    pub fn constrain(self, mut filters: SearchFilters) -> SearchFilters {
        if let Some(status) = self.required_status() {
            filters.status = Some(status);
        }
        filters
    }

    /// Lines printed under the confirmation question
    pub fn warnings(self) -> &'static [&'static str] {
        match self {
            Self::Activate => &[],
            Self::Deactivate => &[
                "WARNING: You can't use a disabled key to make AWS API calls but you can activate it again later.",
            ],
            Self::Delete => &[
                "NOTE: AWS recommends that you analyze the impact of deactivating the access key before permanently deleting it.",
                "WARNING: Any AWS API call made using this key will fail. You cannot recover an access key after you delete it.",
            ],
        }
    }

    /// Confirmation question for `count` keys
    pub fn question(self, count: usize) -> String {
        format!(
            "Are you sure you want to {} {} access key(s)?",
            self.verb().to_uppercase(),
            count
        )
    }

    async fn apply<A: AccessKeyApi>(self, api: &A, record: &KeyRecord) -> IamResult<()> {
        match self {
            Self::Activate => {
                api.update_access_key(&record.user_name, &record.access_key_id, KeyStatus::Active)
                    .await
            }
            Self::Deactivate => {
                api.update_access_key(
                    &record.user_name,
                    &record.access_key_id,
                    KeyStatus::Inactive,
                )
                .await
            }
            Self::Delete => {
                api.delete_access_key(&record.user_name, &record.access_key_id)
                    .await
            }
        }
    }
}

/// A key the action could not be applied to.
#[derive(Debug, Clone)]
pub struct ActionFailure {
    pub record: KeyRecord,
    pub message: String,
}

/// Outcome of [`apply_action`].
#[derive(Debug, Clone, Default)]
pub struct ActionSummary {
    pub succeeded: usize,
    pub failed: Vec<ActionFailure>,
}

/// Apply `action` to every record, one at a time.
///
/// A failure is reported to `out` and recorded but never stops the
/// remaining keys.
pub async fn apply_action<A: AccessKeyApi, W: Write>(
    api: &A,
    action: KeyAction,
    records: &[KeyRecord],
    out: &mut W,
) -> io::Result<ActionSummary> {
    let mut summary = ActionSummary::default();

    for record in records {
        match action.apply(api, record).await {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                writeln!(
                    out,
                    "Unable to {} access key {} for username {}: {}",
                    action.verb(),
                    record.access_key_id,
                    record.user_name,
                    e
                )?;
                summary.failed.push(ActionFailure {
                    record: record.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constrain_forces_status() {
        let filters = SearchFilters {
            status: Some(KeyStatus::Active),
            last_used: 30,
            ..Default::default()
        };

        let activate = KeyAction::Activate.constrain(filters.clone());
        assert_eq!(activate.status, Some(KeyStatus::Inactive));
        assert_eq!(activate.last_used, 30);

        let deactivate = KeyAction::Deactivate.constrain(SearchFilters::default());
        assert_eq!(deactivate.status, Some(KeyStatus::Active));
    }

    #[test]
    fn test_delete_keeps_user_status() {
        let filters = SearchFilters {
            status: Some(KeyStatus::Inactive),
            ..Default::default()
        };
        assert_eq!(
            KeyAction::Delete.constrain(filters).status,
            Some(KeyStatus::Inactive)
        );
        assert_eq!(
            KeyAction::Delete.constrain(SearchFilters::default()).status,
            None
        );
    }

    #[test]
    fn test_question_text() {
        assert_eq!(
            KeyAction::Delete.question(3),
            "Are you sure you want to DELETE 3 access key(s)?"
        );
        assert_eq!(
            KeyAction::Deactivate.question(1),
            "Are you sure you want to DEACTIVATE 1 access key(s)?"
        );
    }

    #[test]
    fn test_warnings() {
        assert!(KeyAction::Activate.warnings().is_empty());
        assert_eq!(KeyAction::Deactivate.warnings().len(), 1);
        assert_eq!(KeyAction::Delete.warnings().len(), 2);
        assert!(KeyAction::Delete.warnings()[1].contains("cannot recover"));
    }
}
