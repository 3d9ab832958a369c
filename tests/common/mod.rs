//! In-memory IAM used by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use cleanup_aws_access_keys::iam_api::{
    AccessKeyApi, AccessKeyInfo, IamError, IamResult, KeyLastUsed, UserPage,
};
use cleanup_aws_access_keys::inventory::types::KeyStatus;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeIam {
    pages: Vec<Vec<String>>,
    keys: HashMap<String, Vec<AccessKeyInfo>>,
    usage: HashMap<String, KeyLastUsed>,
    broken_lookups: HashSet<String>,
    broken_actions: HashSet<String>,
    fail_list_users: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeIam {
    /// Users split into pages in the given order
    pub fn with_pages(pages: &[&[&str]]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|p| p.iter().map(|u| (*u).to_string()).collect())
                .collect(),
            ..Default::default()
        }
    }

    /// Add a key; `days_ago` of `None` means never used
    pub fn key(mut self, user: &str, id: &str, status: &str, days_ago: Option<i64>) -> Self {
        self.keys
            .entry(user.to_string())
            .or_default()
            .push(AccessKeyInfo {
                user_name: user.to_string(),
                access_key_id: id.to_string(),
                status: status.to_string(),
                created: Some(now() - Duration::days(400)),
            });
        let usage = match days_ago {
            Some(days) => KeyLastUsed {
                last_used: Some(now() - Duration::days(days) - Duration::minutes(5)),
                service_name: Some("s3".to_string()),
                region: Some("us-east-1".to_string()),
            },
            None => KeyLastUsed::default(),
        };
        self.usage.insert(id.to_string(), usage);
        self
    }

    pub fn broken_lookup(mut self, id: &str) -> Self {
        self.broken_lookups.insert(id.to_string());
        self
    }

    pub fn broken_action(mut self, id: &str) -> Self {
        self.broken_actions.insert(id.to_string());
        self
    }

    pub fn failing_list_users(mut self) -> Self {
        self.fail_list_users = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Key usage is placed a few minutes past whole days, so whole-day
/// counts stay exact for the duration of a test run.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

impl AccessKeyApi for FakeIam {
    async fn list_users_page(&self, marker: Option<String>) -> IamResult<UserPage> {
        self.record(format!("list_users:{}", marker.clone().unwrap_or_default()));
        if self.fail_list_users {
            return Err(IamError::ListUsers("AccessDenied".to_string()));
        }

        let index: usize = marker.map_or(0, |m| m.parse().unwrap());
        let user_names = self.pages.get(index).cloned().unwrap_or_default();
        let next_marker = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());
        Ok(UserPage {
            user_names,
            next_marker,
        })
    }

    async fn list_access_keys(&self, user_name: &str) -> IamResult<Vec<AccessKeyInfo>> {
        self.record(format!("list_keys:{}", user_name));
        Ok(self.keys.get(user_name).cloned().unwrap_or_default())
    }

    async fn get_access_key_last_used(&self, access_key_id: &str) -> IamResult<KeyLastUsed> {
        self.record(format!("last_used:{}", access_key_id));
        if self.broken_lookups.contains(access_key_id) {
            return Err(IamError::GetLastUsed {
                key_id: access_key_id.to_string(),
                message: "Throttling".to_string(),
            });
        }
        Ok(self.usage.get(access_key_id).cloned().unwrap_or_default())
    }

    async fn update_access_key(
        &self,
        user_name: &str,
        access_key_id: &str,
        status: KeyStatus,
    ) -> IamResult<()> {
        self.record(format!("update:{}:{}:{}", user_name, access_key_id, status));
        if self.broken_actions.contains(access_key_id) {
            return Err(IamError::UpdateAccessKey {
                user: user_name.to_string(),
                key_id: access_key_id.to_string(),
                message: "AccessDenied".to_string(),
            });
        }
        Ok(())
    }

    async fn delete_access_key(&self, user_name: &str, access_key_id: &str) -> IamResult<()> {
        self.record(format!("delete:{}:{}", user_name, access_key_id));
        if self.broken_actions.contains(access_key_id) {
            return Err(IamError::DeleteAccessKey {
                user: user_name.to_string(),
                key_id: access_key_id.to_string(),
                message: "NoSuchEntity".to_string(),
            });
        }
        Ok(())
    }
}
