//! HTTP 路由

mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::application::PolicyService;

pub use handlers::{BUNDLE_CONTENT_DISPOSITION, BUNDLE_CONTENT_TYPE};

/// 处理器共享状态
#[derive(Clone)]
pub struct AppState {
    pub policies: Arc<PolicyService>,
}

impl AppState {
    pub fn new(policies: Arc<PolicyService>) -> Self {
        Self { policies }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/policies",
            post(handlers::create_policy).layer(DefaultBodyLimit::disable()),
        )
        .route("/policies.tar.gz", get(handlers::get_bundle))
        .with_state(state)
}
