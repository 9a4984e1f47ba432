use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rego_bootstrap::DbQueryTimer;
use rego_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::debug;

use crate::domain::repositories::PolicyRepository;
use crate::domain::{CreatePolicy, Policy, PolicySource};

pub struct PostgresPolicyRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct InsertedRow {
    id: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PolicySourceRow {
    name: String,
    rego_code: String,
}

impl From<PolicySourceRow> for PolicySource {
    fn from(row: PolicySourceRow) -> Self {
        Self {
            name: row.name,
            rego_code: row.rego_code,
        }
    }
}

impl PostgresPolicyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PolicyRepository for PostgresPolicyRepository {
    async fn insert(&self, policy: &CreatePolicy) -> AppResult<Policy> {
        debug!("Inserting policy: {}", policy.name);

        let timer = DbQueryTimer::new("insert", "policies");
        let result = sqlx::query_as::<_, InsertedRow>(
            "INSERT INTO policies (name, rego_code) VALUES ($1, $2) RETURNING id, created_at",
        )
        .bind(&policy.name)
        .bind(&policy.rego_code)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result.is_ok());

        let row = result.map_err(|e| AppError::database(format!("Failed to insert policy: {}", e)))?;

        Ok(Policy {
            id: row.id,
            name: policy.name.clone(),
            rego_code: policy.rego_code.clone(),
            created_at: row.created_at,
        })
    }

    async fn list(&self) -> AppResult<Vec<PolicySource>> {
        let timer = DbQueryTimer::new("list", "policies");
        // 显式按 id 排序，保证 bundle 条目顺序稳定
        let result = sqlx::query_as::<_, PolicySourceRow>(
            "SELECT name, rego_code FROM policies ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await;
        timer.finish(result.is_ok());

        let rows = result.map_err(|e| AppError::database(format!("Failed to list policies: {}", e)))?;
        debug!("Loaded {} policies", rows.len());

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
