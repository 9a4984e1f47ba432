//! Policy Service - 服务入口
//!
//! 使用 rego-bootstrap 统一启动模式

use std::sync::Arc;

use policy_service::api::http::{AppState, router};
use policy_service::application::PolicyService;
use policy_service::infrastructure::persistence::{PostgresPolicyRepository, migrations};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rego_bootstrap::run("policy-service", &migrations(), |infra| {
        let repository = Arc::new(PostgresPolicyRepository::new(infra.postgres_pool()));
        let service = Arc::new(PolicyService::new(repository));
        router(AppState::new(service))
    })
    .await
}
