use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rego_errors::{AppError, AppResult};
use tracing::warn;

use super::AppState;
use crate::domain::{CreatePolicy, Policy};

pub const BUNDLE_CONTENT_TYPE: &str = "application/gzip";
pub const BUNDLE_CONTENT_DISPOSITION: &str = r#"attachment; filename="policies.tar.gz""#;

/// POST /policies
///
/// 请求体解析失败时不访问存储，直接返回 400
pub(super) async fn create_policy(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Policy>)> {
    let request = decode_create_request(&body)
        .inspect_err(|e| warn!(error = %e, "Invalid create policy request"))?;

    let policy = state.policies.create_policy(request).await?;
    Ok((StatusCode::CREATED, Json(policy)))
}

/// 取请求体中的第一个 JSON 值，不检查 `Content-Type`
fn decode_create_request(body: &[u8]) -> AppResult<CreatePolicy> {
    match serde_json::Deserializer::from_slice(body)
        .into_iter::<CreatePolicy>()
        .next()
    {
        Some(Ok(request)) => Ok(request),
        Some(Err(e)) => Err(AppError::validation(format!("Invalid request payload: {}", e))),
        None => Err(AppError::validation("Invalid request payload: empty body")),
    }
}

/// GET /policies.tar.gz
///
/// 失败时只返回 500 状态码，不带响应体
pub(super) async fn get_bundle(State(state): State<AppState>) -> Response {
    match state.policies.build_bundle().await {
        Ok(bundle) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, BUNDLE_CONTENT_TYPE),
                (header::CONTENT_DISPOSITION, BUNDLE_CONTENT_DISPOSITION),
            ],
            bundle.bytes,
        )
            .into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
