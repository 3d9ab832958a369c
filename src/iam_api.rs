//! IAM API client used for key discovery and lifecycle actions.
//!
//! [`AccessKeyApi`] is the seam between the search/action logic and AWS.
//! [`IamClient`] implements it on top of `aws-sdk-iam`, with credentials and
//! region resolved through the standard AWS configuration chain
//! (`AWS_PROFILE`, `AWS_ACCESS_KEY_ID`, shared config files, SSO, IMDS).

use crate::inventory::types::KeyStatus;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::primitives::DateTime as AwsDateTime;
use aws_sdk_iam::types::StatusType;
use aws_sdk_iam::Client;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// IAM is a global service; any commercial region resolves its endpoint.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Errors raised by the IAM API seam, one per call site.
#[derive(Debug, Error)]
pub enum IamError {
    #[error("failed to list IAM users: {0}")]
    ListUsers(String),

    #[error("failed to list access keys for user {user}: {message}")]
    ListAccessKeys { user: String, message: String },

    #[error("failed to get last used info for access key {key_id}: {message}")]
    GetLastUsed { key_id: String, message: String },

    #[error("failed to update access key {key_id} for user {user}: {message}")]
    UpdateAccessKey {
        user: String,
        key_id: String,
        message: String,
    },

    #[error("failed to delete access key {key_id} for user {user}: {message}")]
    DeleteAccessKey {
        user: String,
        key_id: String,
        message: String,
    },
}

pub type IamResult<T> = Result<T, IamError>;

/// One page of IAM user names.
#[derive(Debug, Clone, Default)]
pub struct UserPage {
    pub user_names: Vec<String>,
    /// Marker for the next page, `None` when this is the last page
    pub next_marker: Option<String>,
}

/// Access key metadata as returned by `ListAccessKeys`.
#[derive(Debug, Clone)]
pub struct AccessKeyInfo {
    pub user_name: String,
    pub access_key_id: String,
    /// Lower-cased status as reported by IAM ("active", "inactive", ...)
    pub status: String,
    pub created: Option<DateTime<Utc>>,
}

/// Result of `GetAccessKeyLastUsed`.
#[derive(Debug, Clone, Default)]
pub struct KeyLastUsed {
    pub last_used: Option<DateTime<Utc>>,
    pub service_name: Option<String>,
    pub region: Option<String>,
}

/// The subset of IAM the tool needs.
#[allow(async_fn_in_trait)]
pub trait AccessKeyApi {
    /// Fetch one page of users starting at `marker`.
    async fn list_users_page(&self, marker: Option<String>) -> IamResult<UserPage>;

    /// List every access key owned by `user_name`.
    async fn list_access_keys(&self, user_name: &str) -> IamResult<Vec<AccessKeyInfo>>;

    async fn get_access_key_last_used(&self, access_key_id: &str) -> IamResult<KeyLastUsed>;

    async fn update_access_key(
        &self,
        user_name: &str,
        access_key_id: &str,
        status: KeyStatus,
    ) -> IamResult<()>;

    async fn delete_access_key(&self, user_name: &str, access_key_id: &str) -> IamResult<()>;
}

/// IAM client backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct IamClient {
    client: Client,
}

impl IamClient {
    /// Wrap an already configured SDK client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS configuration chain.
    ///
    /// Falls back to [`DEFAULT_REGION`] when no region is configured.
    pub async fn from_env() -> Self {
        let region = RegionProviderChain::default_provider().or_else(DEFAULT_REGION);
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await;
        Self::new(Client::new(&config))
    }

    /// Region the client signs requests for
    pub fn region(&self) -> Option<String> {
        self.client.config().region().map(ToString::to_string)
    }
}

impl AccessKeyApi for IamClient {
    async fn list_users_page(&self, marker: Option<String>) -> IamResult<UserPage> {
        let out = self
            .client
            .list_users()
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| IamError::ListUsers(DisplayErrorContext(&e).to_string()))?;

        let user_names = out
            .users()
            .iter()
            .map(|u| u.user_name().to_string())
            .collect();
        let next_marker = if out.is_truncated() {
            out.marker().map(ToString::to_string)
        } else {
            None
        };

        Ok(UserPage {
            user_names,
            next_marker,
        })
    }

    async fn list_access_keys(&self, user_name: &str) -> IamResult<Vec<AccessKeyInfo>> {
        let mut keys = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let out = self
                .client
                .list_access_keys()
                .user_name(user_name)
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| IamError::ListAccessKeys {
                    user: user_name.to_string(),
                    message: DisplayErrorContext(&e).to_string(),
                })?;

            for meta in out.access_key_metadata() {
                let Some(access_key_id) = meta.access_key_id() else {
                    continue;
                };
                keys.push(AccessKeyInfo {
                    user_name: meta.user_name().unwrap_or(user_name).to_string(),
                    access_key_id: access_key_id.to_string(),
                    status: meta
                        .status()
                        .map(|s| s.as_str().to_lowercase())
                        .unwrap_or_default(),
                    created: meta.create_date().and_then(to_utc),
                });
            }

            match (out.is_truncated(), out.marker()) {
                (true, Some(next)) => marker = Some(next.to_string()),
                _ => break,
            }
        }

        Ok(keys)
    }

    async fn get_access_key_last_used(&self, access_key_id: &str) -> IamResult<KeyLastUsed> {
        let out = self
            .client
            .get_access_key_last_used()
            .access_key_id(access_key_id)
            .send()
            .await
            .map_err(|e| IamError::GetLastUsed {
                key_id: access_key_id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(out
            .access_key_last_used()
            .map(|lu| KeyLastUsed {
                last_used: lu.last_used_date().and_then(to_utc),
                service_name: non_placeholder(lu.service_name()),
                region: non_placeholder(lu.region()),
            })
            .unwrap_or_default())
    }

    async fn update_access_key(
        &self,
        user_name: &str,
        access_key_id: &str,
        status: KeyStatus,
    ) -> IamResult<()> {
        let status_type = match status {
            KeyStatus::Active => StatusType::Active,
            KeyStatus::Inactive => StatusType::Inactive,
        };

        self.client
            .update_access_key()
            .user_name(user_name)
            .access_key_id(access_key_id)
            .status(status_type)
            .send()
            .await
            .map_err(|e| IamError::UpdateAccessKey {
                user: user_name.to_string(),
                key_id: access_key_id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }

    async fn delete_access_key(&self, user_name: &str, access_key_id: &str) -> IamResult<()> {
        self.client
            .delete_access_key()
            .user_name(user_name)
            .access_key_id(access_key_id)
            .send()
            .await
            .map_err(|e| IamError::DeleteAccessKey {
                user: user_name.to_string(),
                key_id: access_key_id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }
}

fn to_utc(ts: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
}

/// IAM reports "N/A" for the service and region of never-used keys.
fn non_placeholder(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("N/A") {
        None
    } else {
        Some(trimmed.to_string())
    }
}
