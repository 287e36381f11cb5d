use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{AppError, AppResult, ConfigError};

/// 测试用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestUser {
    /// 登录用户名
    pub username: String,
    /// 登录后在角色选择页上选择的角色文本
    #[serde(default)]
    pub role: Option<String>,
}

/// `users.json`：用户键 → 用户
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: HashMap<String, TestUser>,
}

impl UserDirectory {
    pub fn from_json(content: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_json(&content)
    }

    pub fn get(&self, key: &str) -> AppResult<&TestUser> {
        self.users.get(key).ok_or_else(|| {
            ConfigError::UnknownUser {
                user: key.to_string(),
            }
            .into()
        })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_users_file() {
        let json = r#"{
            "Hub Manager State Registered at BCS01": {
                "username": "BCSS401",
                "role": "Hub Manager State Registered"
            },
            "Screening Centre Manager at BCS001": { "username": "BCSS118" }
        }"#;

        let users = UserDirectory::from_json(json).unwrap();
        assert_eq!(users.len(), 2);

        let hub = users.get("Hub Manager State Registered at BCS01").unwrap();
        assert_eq!(hub.username, "BCSS401");
        assert_eq!(hub.role.as_deref(), Some("Hub Manager State Registered"));

        assert!(users.get("Screening Centre Manager at BCS001").unwrap().role.is_none());
        assert!(matches!(
            users.get("nobody"),
            Err(AppError::Config(ConfigError::UnknownUser { .. }))
        ));
    }
}
