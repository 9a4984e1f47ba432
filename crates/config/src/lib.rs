//! rego-config - 配置加载库
//!
//! 所有配置均来自环境变量（可选 `.env` 文件），通过 figment 解析

use figment::{providers::Env, Figment};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

/// 数据库端口（固定，不可配置）
pub const DATABASE_PORT: u16 = 5432;

/// HTTP 监听端口（固定，不可配置）
pub const SERVER_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 数据库配置
///
/// 对应环境变量 `DB_HOST`、`DB_USER`、`DB_PASSWORD`、`DB_DATABASE`、`DB_MAX_CONNECTIONS`
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: Secret<String>,
    pub database: String,
    pub max_connections: u32,
}

/// 连接池参数，唯一需要按数字解析的数据库配置
#[derive(Debug, Deserialize)]
struct PoolSettings {
    #[serde(default = "default_max_connections")]
    max_connections: u32,
}

fn default_db_host() -> String {
    "postgres".to_string()
}

fn default_db_user() -> String {
    "admin".to_string()
}

fn default_db_password() -> Secret<String> {
    Secret::new("secret".to_string())
}

fn default_db_database() -> String {
    "policies_db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

impl DatabaseConfig {
    /// 从 `DB_*` 环境变量加载
    ///
    /// 字符串项按原文读取，`0123` 不会被当作数字改写
    pub fn from_env() -> Result<Self, ConfigError> {
        let pool: PoolSettings = Figment::new()
            .merge(Env::prefixed("DB_").only(&["max_connections"]))
            .extract()?;

        Ok(Self {
            host: Env::var("DB_HOST").unwrap_or_else(default_db_host),
            user: Env::var("DB_USER").unwrap_or_else(default_db_user),
            password: Env::var("DB_PASSWORD")
                .map(Secret::new)
                .unwrap_or_else(default_db_password),
            database: Env::var("DB_DATABASE").unwrap_or_else(default_db_database),
            max_connections: pool.max_connections,
        })
    }

    pub fn port(&self) -> u16 {
        DATABASE_PORT
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            user: default_db_user(),
            password: default_db_password(),
            database: default_db_database(),
            max_connections: default_max_connections(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: SERVER_PORT,
        }
    }
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// 遥测配置
///
/// 对应环境变量 `LOG_LEVEL`、`LOG_FORMAT`
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level", rename = "level")]
    pub log_level: String,
    #[serde(default, rename = "format")]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TelemetryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Figment::new().merge(Env::prefixed("LOG_")).extract()?)
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// 从环境变量加载配置（先读取 `.env`，已存在的环境变量优先）
    pub fn load(app_name: impl Into<String>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env(app_name)
    }

    /// 仅从当前进程环境加载
    pub fn from_env(app_name: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            app_name: app_name.into(),
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::default(),
            telemetry: TelemetryConfig::from_env()?,
        })
    }

    pub fn json_logs(&self) -> bool {
        self.telemetry.log_format == LogFormat::Json
    }
}

#[cfg(test)]
mod tests;
