//! 集成测试公共工具

#![allow(dead_code)]

use std::io::Read;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use flate2::read::GzDecoder;
use policy_service::api::http::{AppState, router};
use policy_service::application::PolicyService;
use policy_service::domain::repositories::PolicyRepository;
use policy_service::domain::{CreatePolicy, Policy, PolicySource};
use rego_errors::{AppError, AppResult};
use tar::Archive;

/// 内存仓储，按插入顺序返回
#[derive(Default)]
pub struct InMemoryPolicyRepository {
    policies: Mutex<Vec<Policy>>,
}

impl InMemoryPolicyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.policies.lock().unwrap().len()
    }
}

#[async_trait]
impl PolicyRepository for InMemoryPolicyRepository {
    async fn insert(&self, policy: &CreatePolicy) -> AppResult<Policy> {
        let mut policies = self.policies.lock().unwrap();
        let stored = Policy {
            id: policies.len() as i64 + 1,
            name: policy.name.clone(),
            rego_code: policy.rego_code.clone(),
            created_at: Utc::now(),
        };
        policies.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> AppResult<Vec<PolicySource>> {
        let policies = self.policies.lock().unwrap();
        Ok(policies.iter().cloned().map(Into::into).collect())
    }
}

/// 始终失败的仓储，模拟数据库不可用
pub struct FailingPolicyRepository;

#[async_trait]
impl PolicyRepository for FailingPolicyRepository {
    async fn insert(&self, _policy: &CreatePolicy) -> AppResult<Policy> {
        Err(AppError::database("connection refused"))
    }

    async fn list(&self) -> AppResult<Vec<PolicySource>> {
        Err(AppError::database("connection refused"))
    }
}

pub fn app_with(repository: Arc<dyn PolicyRepository>) -> Router {
    let service = Arc::new(PolicyService::new(repository));
    router(AppState::new(service))
}

/// 解包为 (条目名, 内容) 列表
pub fn unpack(bytes: &[u8]) -> Vec<(String, String)> {
    let mut archive = Archive::new(GzDecoder::new(bytes));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            let mut body = String::new();
            entry.read_to_string(&mut body).unwrap();
            (name, body)
        })
        .collect()
}
