//! Policy 应用服务
//!
//! 编排仓储调用与 bundle 打包，负责日志和业务指标

use std::sync::Arc;

use rego_bootstrap::record_bundle_built;
use rego_errors::{AppError, AppResult};
use tracing::{error, info};

use crate::application::{Bundle, BundleAssembler};
use crate::domain::repositories::PolicyRepository;
use crate::domain::{CreatePolicy, Policy};

pub struct PolicyService {
    repository: Arc<dyn PolicyRepository>,
    assembler: BundleAssembler,
}

impl PolicyService {
    pub fn new(repository: Arc<dyn PolicyRepository>) -> Self {
        Self {
            repository,
            assembler: BundleAssembler::new(),
        }
    }

    /// 保存策略
    pub async fn create_policy(&self, request: CreatePolicy) -> AppResult<Policy> {
        let policy = self
            .repository
            .insert(&request)
            .await
            .inspect_err(|e| error!(name = %request.name, error = %e, "Error inserting policy"))?;

        info!(id = policy.id, name = %policy.name, "Policy created");
        Ok(policy)
    }

    /// 读取全部策略并打包
    ///
    /// 每次请求都重新读取整张表；压缩在阻塞线程池中执行
    pub async fn build_bundle(&self) -> AppResult<Bundle> {
        let policies = self
            .repository
            .list()
            .await
            .inspect_err(|e| error!(error = %e, "Error querying policies for bundle"))?;

        let assembler = self.assembler;
        let bundle = tokio::task::spawn_blocking(move || assembler.assemble(&policies))
            .await
            .map_err(|e| AppError::internal(format!("Bundle task failed: {}", e)))?
            .inspect_err(|e| error!(error = %e, "Error creating bundle"))?;

        record_bundle_built(bundle.entries, bundle.skipped.len(), bundle.bytes.len());
        info!(
            entries = bundle.entries,
            skipped = bundle.skipped.len(),
            bytes = bundle.bytes.len(),
            "Bundle assembled"
        );

        Ok(bundle)
    }
}
