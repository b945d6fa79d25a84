//! HTTP 服务器模块
//!
//! 提供最大流计算的 REST API，返回完整执行轨迹供前端动画播放

use crate::algorithm::{EdmondsKarp, MaxFlowResult, RunError};
use crate::error::{Error, Result};
use crate::import::{parse_form, FormInput, GraphInput};
use crate::metrics::{self, RunOutcome};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 单个图允许的最大节点数
    pub max_nodes: usize,
    /// 迭代上限（None 使用算法默认值）
    pub max_iterations: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_nodes: 64,
            max_iterations: None,
        }
    }
}

impl ServerConfig {
    /// 请求指定的上限不能超过服务端配置
    fn effective_iteration_limit(&self, requested: Option<usize>) -> Option<usize> {
        match (requested, self.max_iterations) {
            (Some(requested), Some(configured)) => Some(requested.min(configured)),
            (requested, configured) => requested.or(configured),
        }
    }
}

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

/// 构建路由
pub fn router(config: ServerConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 指标和统计
        .route("/metrics", get(metrics_handler))
        .route("/stats", get(stats_handler))
        // 最大流
        .route("/max-flow", post(max_flow))
        .route("/max-flow/form", post(max_flow_form))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// 启动服务器
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = router(config);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::ServerError(format!("绑定地址失败: {}", e)))?;
    info!("FlowTrace 服务器启动于 http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::ServerError(format!("服务器错误: {}", e)))?;

    Ok(())
}

// ==================== 处理器 ====================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus 格式指标
async fn metrics_handler() -> Response {
    let prom = metrics::global_metrics().to_prometheus();

    (
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        prom.content,
    )
        .into_response()
}

/// 详细统计信息
async fn stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = metrics::global_metrics().snapshot();

    Json(serde_json::json!({
        "runs": {
            "total": snapshot.total_runs,
            "completed": snapshot.completed_runs,
            "rejected": snapshot.rejected_runs,
            "aborted": snapshot.aborted_runs,
            "avg_duration_ms": snapshot.avg_run_duration_ms,
        },
        "trace": {
            "augmentations": snapshot.augmentations,
            "steps": snapshot.steps_recorded,
        },
        "limits": {
            "max_nodes": state.config.max_nodes,
            "max_iterations": state.config.max_iterations,
        },
        "system": {
            "uptime_seconds": snapshot.uptime_seconds,
            "version": env!("CARGO_PKG_VERSION"),
        }
    }))
}

/// 最大流请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxFlowRequest {
    #[serde(flatten)]
    pub graph: GraphInput<f64>,
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

/// 表单格式的最大流请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRequest {
    #[serde(flatten)]
    pub form: FormInput,
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

/// 最大流
async fn max_flow(State(state): State<AppState>, Json(req): Json<MaxFlowRequest>) -> Response {
    run_max_flow(&state.config, &req.graph, req.max_iterations)
}

/// 最大流（表单输入）
async fn max_flow_form(State(state): State<AppState>, Json(req): Json<FormRequest>) -> Response {
    match parse_form::<f64>(&req.form) {
        Ok(graph) => run_max_flow(&state.config, &graph, req.max_iterations),
        Err(e) => {
            let metrics = metrics::global_metrics();
            let timer = metrics.record_run_start();
            metrics.record_run_complete(timer, RunOutcome::Rejected);
            error_response(StatusCode::BAD_REQUEST, &e)
        }
    }
}

fn run_max_flow(
    config: &ServerConfig,
    graph: &GraphInput<f64>,
    max_iterations: Option<usize>,
) -> Response {
    let metrics = metrics::global_metrics();
    let timer = metrics.record_run_start();

    let network = match graph
        .to_network()
        .and_then(|n| n.ensure_node_limit(config.max_nodes).map(|_| n))
    {
        Ok(network) => network,
        Err(e) => {
            warn!(error = %e, "max flow request rejected");
            metrics.record_run_complete(timer, RunOutcome::Rejected);
            return error_response(StatusCode::BAD_REQUEST, &e);
        }
    };

    let mut algo = EdmondsKarp::new(&network);
    if let Some(limit) = config.effective_iteration_limit(max_iterations) {
        algo = algo.with_iteration_limit(limit);
    }

    match algo.run() {
        Ok(result) => {
            metrics.record_trace(result.iterations, result.steps.len());
            metrics.record_run_complete(timer, RunOutcome::Completed);
            (StatusCode::OK, Json(ApiResponse::success(result))).into_response()
        }
        Err(RunError::IterationLimitExceeded { limit, partial }) => {
            metrics.record_trace(partial.iterations, partial.steps.len());
            metrics.record_run_complete(timer, RunOutcome::Aborted);
            let message = Error::IterationLimitExceeded {
                limit,
                flow: partial.max_flow.to_string(),
            }
            .to_string();
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<MaxFlowResult<f64>>::partial(*partial, &message)),
            )
                .into_response()
        }
        Err(RunError::Failed(e)) => {
            let status = if e.is_validation() {
                metrics.record_run_complete(timer, RunOutcome::Rejected);
                StatusCode::BAD_REQUEST
            } else {
                metrics.record_run_complete(timer, RunOutcome::Aborted);
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error_response(status, &e)
        }
    }
}

fn error_response(status: StatusCode, error: &Error) -> Response {
    (status, Json(ApiResponse::<()>::error(&error.to_string()))).into_response()
}

/// API 响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }

    /// 失败但附带部分结果
    pub fn partial(data: T, msg: &str) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(msg.to_string()),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}
