use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use wolf_scheduler_core::{Error, Field, prelude::*};

/// 应用状态
///
/// 日程的查重、冲突检查与追加不是原子的，所有修改都在同一把锁内完成。
#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<Mutex<Scheduler>>,
}

/// 健康检查响应
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// 错误响应
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

/// 是否返回完整列
#[derive(Deserialize)]
struct RowsQuery {
    #[serde(default)]
    full: bool,
}

#[derive(Serialize)]
struct RowsResponse<R> {
    title: Option<String>,
    rows: Vec<R>,
}

#[derive(Deserialize)]
struct AddCourseRequest {
    name: String,
    section: String,
}

#[derive(Deserialize)]
struct AddEventRequest {
    title: String,
    meeting_days: String,
    start_time: u16,
    end_time: u16,
    weekly_repeat: u8,
    event_details: Option<String>,
}

#[derive(Deserialize)]
struct RenameRequest {
    title: Option<String>,
}

pub fn create_app(scheduler: Scheduler) -> Router {
    let state = AppState {
        scheduler: Arc::new(Mutex::new(scheduler)),
    };

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/catalog", get(catalog_handler))
        .route("/catalog/{name}/{section}", get(find_course_handler))
        .route("/schedule", get(schedule_handler))
        .route("/schedule/courses", post(add_course_handler))
        .route("/schedule/events", post(add_event_handler))
        .route("/schedule/activities/{index}", delete(remove_activity_handler))
        .route("/schedule/title", put(rename_handler))
        .route("/schedule/reset", post(reset_handler))
        .route("/schedule/export", get(export_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// 根路径处理器
async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "Wolf Scheduler Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Course catalog and conflict-checked weekly schedule",
        "endpoints": {
            "health": "/health",
            "catalog": "/catalog",
            "schedule": "/schedule",
            "export": "/schedule/export"
        }
    }))
}

/// 健康检查处理器
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 列出课程目录
async fn catalog_handler(
    State(state): State<AppState>,
    Query(query): Query<RowsQuery>,
) -> Response {
    let scheduler = state.scheduler.lock().await;
    let catalog = scheduler.catalog();
    if query.full {
        Json(RowsResponse {
            title: None,
            rows: catalog.long_rows(),
        })
        .into_response()
    } else {
        Json(RowsResponse {
            title: None,
            rows: catalog.short_rows(),
        })
        .into_response()
    }
}

/// 按课程代码与班级号查找
async fn find_course_handler(
    State(state): State<AppState>,
    Path((name, section)): Path<(String, String)>,
) -> Response {
    let scheduler = state.scheduler.lock().await;
    match scheduler.find_course(&name, &section) {
        Some(course) => Json(course).into_response(),
        None => not_found(format!("Course {name}-{section} is not in the catalog")),
    }
}

/// 列出当前日程
async fn schedule_handler(
    State(state): State<AppState>,
    Query(query): Query<RowsQuery>,
) -> Response {
    let scheduler = state.scheduler.lock().await;
    let title = Some(scheduler.title().to_string());
    if query.full {
        Json(RowsResponse {
            title,
            rows: scheduler.full_schedule_rows(),
        })
        .into_response()
    } else {
        Json(RowsResponse {
            title,
            rows: scheduler.schedule_rows(),
        })
        .into_response()
    }
}

/// 选课
async fn add_course_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddCourseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let mut scheduler = state.scheduler.lock().await;
    let added = scheduler.add_course(&request.name, &request.section)?;
    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(serde_json::json!({ "added": added }))))
}

/// 添加个人事件
async fn add_event_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let details = request
        .event_details
        .ok_or(Error::InvalidField(Field::EventDetails))?;

    let mut scheduler = state.scheduler.lock().await;
    scheduler.add_event(
        &request.title,
        &request.meeting_days,
        request.start_time,
        request.end_time,
        request.weekly_repeat,
        &details,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "added": true })),
    ))
}

/// 按序号移除日程条目，负数或越界序号返回404
async fn remove_activity_handler(
    State(state): State<AppState>,
    Path(index): Path<i64>,
) -> impl IntoResponse {
    let mut scheduler = state.scheduler.lock().await;
    let removed = usize::try_from(index).is_ok_and(|i| scheduler.remove_activity(i));
    let status = if removed {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Json(serde_json::json!({ "removed": removed })))
}

/// 修改日程标题
async fn rename_handler(
    State(state): State<AppState>,
    payload: Result<Json<RenameRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let title = request
        .title
        .ok_or(Error::InvalidField(Field::ScheduleTitle))?;

    let mut scheduler = state.scheduler.lock().await;
    scheduler.set_title(title);
    tracing::info!("日程标题已修改为: {}", scheduler.title());
    Ok(Json(serde_json::json!({ "title": scheduler.title() })))
}

/// 清空日程
async fn reset_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut scheduler = state.scheduler.lock().await;
    scheduler.reset_schedule();
    Json(serde_json::json!({ "title": scheduler.title() }))
}

/// 导出日程记录
async fn export_handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let scheduler = state.scheduler.lock().await;
    let mut body = Vec::new();
    records::write_activity_records(&mut body, scheduler.schedule().activities())?;

    Ok((
        StatusCode::OK,
        [("Content-Type", "text/plain; charset=utf-8")],
        body,
    ))
}

fn not_found(message: String) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "未找到".to_string(),
            message,
        }),
    )
        .into_response()
}

/// 应用错误类型
#[derive(Debug)]
enum AppError {
    /// 排课核心返回的错误
    Scheduler(Error),
    /// 请求体无法解析为JSON或字段类型不符
    Request(JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Scheduler(e) if e.is_validation() => (StatusCode::BAD_REQUEST, "请求参数无效"),
            Self::Scheduler(Error::DuplicateEnrollment(_) | Error::DuplicateEvent(_)) => {
                (StatusCode::CONFLICT, "重复的日程条目")
            }
            Self::Scheduler(Error::Conflict { .. }) => (StatusCode::CONFLICT, "时间冲突"),
            Self::Scheduler(_) => (StatusCode::INTERNAL_SERVER_ERROR, "内部服务器错误"),
            Self::Request(JsonRejection::MissingJsonContentType(_)) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "请求参数无效")
            }
            Self::Request(_) => (StatusCode::BAD_REQUEST, "请求参数无效"),
        };

        let message = match self {
            Self::Scheduler(e) => e.to_string(),
            Self::Request(rejection) => rejection.body_text(),
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self::Scheduler(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Request(rejection)
    }
}
