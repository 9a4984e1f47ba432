//! 基础设施资源管理

use rego_adapter_postgres::{PostgresConfig, check_connection, create_pool};
use rego_config::AppConfig;
use rego_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// 基础设施资源容器
///
/// 由 bootstrap 统一初始化，连接池在所有请求间共享
#[derive(Clone)]
pub struct Infrastructure {
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    ///
    /// 连接失败直接返回错误，不做重试
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let db = &config.database;
        let pg_config = PostgresConfig::from_components(
            &db.host,
            db.port(),
            &db.database,
            &db.user,
            Some(db.password.expose_secret().clone()),
        )
        .with_max_connections(db.max_connections);

        let postgres_pool = create_pool(&pg_config).await?;
        check_connection(&postgres_pool).await?;
        info!(
            host = %db.host,
            database = %db.database,
            max_connections = db.max_connections,
            "Successfully connected to the database"
        );

        Ok(Self { postgres_pool })
    }

    /// 获取 PostgreSQL 连接池（PgPool 内部为 Arc，克隆开销很小）
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }
}
