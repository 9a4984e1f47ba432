//! Policy 仓储接口

use async_trait::async_trait;
use rego_errors::AppResult;

use crate::domain::{CreatePolicy, Policy, PolicySource};

/// Policy 仓储接口
///
/// 每个方法对应一条原子 SQL 语句，失败时返回 `AppError::Database`，调用方不重试
#[async_trait]
pub trait PolicyRepository: Send + Sync {
    /// 保存策略，返回包含存储端分配的 id 与创建时间的完整实体
    async fn insert(&self, policy: &CreatePolicy) -> AppResult<Policy>;

    /// 读取全部策略（不分页、不限量）
    async fn list(&self) -> AppResult<Vec<PolicySource>>;
}
