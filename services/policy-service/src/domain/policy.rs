//! Policy 实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// bundle 中策略文件的后缀
pub const POLICY_FILE_SUFFIX: &str = ".rego";

/// 已持久化的策略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: i64,
    pub name: String,
    pub rego_code: String,
    pub created_at: DateTime<Utc>,
}

/// 创建策略请求
///
/// `rego_code` 原样保存，服务不做任何语法校验；缺省字段按空字符串处理
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreatePolicy {
    pub name: String,
    pub rego_code: String,
}

impl CreatePolicy {
    pub fn new(name: impl Into<String>, rego_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rego_code: rego_code.into(),
        }
    }
}

/// 打包所需的策略内容（名称 + 源码）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySource {
    pub name: String,
    pub rego_code: String,
}

impl PolicySource {
    pub fn new(name: impl Into<String>, rego_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rego_code: rego_code.into(),
        }
    }

    /// bundle 内的文件名：`<name>.rego`
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, POLICY_FILE_SUFFIX)
    }
}

impl From<Policy> for PolicySource {
    fn from(policy: Policy) -> Self {
        Self {
            name: policy.name,
            rego_code: policy.rego_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(PolicySource::new("authz", "package authz").file_name(), "authz.rego");
        assert_eq!(PolicySource::new("", "package x").file_name(), ".rego");
    }

    #[test]
    fn test_policy_json_shape() {
        let policy = Policy {
            id: 7,
            name: "authz".to_string(),
            rego_code: "package authz".to_string(),
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
        };

        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "authz");
        assert_eq!(json["rego_code"], "package authz");
        assert_eq!(json["created_at"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_create_policy_ignores_server_fields() {
        let request: CreatePolicy = serde_json::from_str(
            r#"{"id": 99, "name": "a", "rego_code": "package a", "created_at": "x"}"#,
        )
        .unwrap();
        assert_eq!(request, CreatePolicy::new("a", "package a"));
    }

    #[test]
    fn test_create_policy_missing_fields_are_empty() {
        let request: CreatePolicy = serde_json::from_str(r#"{"name": "a"}"#).unwrap();
        assert_eq!(request, CreatePolicy::new("a", ""));

        let request: CreatePolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(request, CreatePolicy::default());
    }
}
