//! Policy Service - 策略存储与 OPA bundle 分发
//!
//! `POST /policies` 保存策略，`GET /policies.tar.gz` 将所有策略打包为 gzip 压缩的 tar 包

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
