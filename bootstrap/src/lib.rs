//! rego-bootstrap - 统一服务启动骨架
//!
//! 配置加载、日志、连接池、迁移、健康检查与 graceful shutdown

mod health;
mod http_metrics;
mod infrastructure;
mod runtime;
mod starter;

pub use health::*;
pub use infrastructure::*;
pub use http_metrics::*;
pub use runtime::*;
pub use starter::*;
