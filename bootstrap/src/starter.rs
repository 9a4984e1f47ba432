//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::sync::Arc;

use axum::{Router, middleware};
use rego_adapter_postgres::{Migration, MigrationManager};
use rego_config::AppConfig;
use rego_errors::AppError;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::health::{HealthChecker, health_routes};
use crate::http_metrics::{MetricsRecorder, track_http_metrics};
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 所有服务的统一入口点：
/// 1. 加载配置并初始化日志
/// 2. 安装 Prometheus recorder
/// 3. 创建连接池并确认数据库可达
/// 4. 应用迁移
/// 5. 调用 `router_builder` 构建业务路由，合并健康检查路由
/// 6. 监听固定端口，收到关闭信号后 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     rego_bootstrap::run("my-service", &migrations(), |infra| {
///         my_router(infra.postgres_pool())
///     })
///     .await
/// }
/// ```
pub async fn run<F>(
    app_name: &str,
    migrations: &[Migration],
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&Infrastructure) -> Router,
{
    let config = AppConfig::load(app_name)?;
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = Arc::new(MetricsRecorder::install()?);

    let infra = Infrastructure::from_config(&config)
        .await
        .inspect_err(|e| error!(error = %e, "Could not connect to database"))?;

    let result = MigrationManager::new(infra.postgres_pool())
        .migrate(migrations)
        .await?;
    if !result.is_success() {
        for failure in &result.errors {
            error!(
                version = failure.version,
                name = %failure.name,
                error = %failure.error,
                "Migration failed"
            );
        }
        return Err(AppError::database("Database migration failed").into());
    }
    info!(
        applied = result.applied_count(),
        skipped = result.skipped.len(),
        "Database schema up to date"
    );

    let checker = Arc::new(HealthChecker::new(infra.postgres_pool()));
    let app = router_builder(&infra)
        .merge(health_routes(checker, metrics))
        .route_layer(middleware::from_fn(track_http_metrics))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "{} listening", config.app_name);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");

    Ok(())
}
