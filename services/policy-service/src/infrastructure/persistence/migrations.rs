//! 数据库迁移

use rego_adapter_postgres::Migration;

const CREATE_POLICIES: &str = r#"
CREATE TABLE IF NOT EXISTS policies (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    rego_code TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// 服务自带的迁移列表
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(1, "create_policies", CREATE_POLICIES)]
}
