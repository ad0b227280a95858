/// Task planner endpoints
///
/// This module provides the authenticated task endpoints. Every handler
/// hands its session token to the planner service, which resolves it
/// against the session gate before touching the task store.
///
/// # Endpoints
///
/// - `GET    /v1/tasks` - List tasks grouped by category
/// - `POST   /v1/tasks` - Add a task
/// - `GET    /v1/tasks/export` - Plain-text report of all tasks
/// - `POST   /v1/tasks/:id/toggle` - Flip completion state
/// - `PUT    /v1/tasks/:id` - Edit content/category
/// - `DELETE /v1/tasks/:id` - Delete a task
///
/// Category fields travel as raw strings, not as the enum: unknown values
/// are coerced (add) or ignored (edit) rather than rejected, so
/// deserialization must not fail on them.
use crate::{
    app::{AppState, SessionToken},
    error::ApiResult,
};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use seasonplan_shared::models::task::{Category, Task};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Task representation returned to clients
///
/// Owner id stays internal; the session already scopes every response to
/// its owner.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    /// Task ID
    pub id: Uuid,

    /// Task text
    pub content: String,

    /// Category identifier (e.g. "spring")
    pub category: Category,

    /// Completion state
    pub is_completed: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            content: task.content,
            category: task.category,
            is_completed: task.is_completed,
            created_at: task.created_at,
        }
    }
}

/// One category bucket in the list response
#[derive(Debug, Serialize)]
pub struct CategoryGroup {
    /// Category identifier
    pub category: Category,

    /// Display label (with emoji)
    pub label: &'static str,

    /// Tasks in this bucket, newest first
    pub tasks: Vec<TaskView>,
}

/// List tasks response
#[derive(Debug, Serialize)]
pub struct ListTasksResponse {
    /// All five category buckets in display order, empty ones included
    pub categories: Vec<CategoryGroup>,
}

/// Add task request
#[derive(Debug, Deserialize, Validate)]
pub struct AddTaskRequest {
    /// Task text
    #[validate(length(max = 500, message = "Content must be at most 500 characters"))]
    pub content: String,

    /// Category identifier; unknown values fall back to "general"
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "general".to_string()
}

/// Add task response
#[derive(Debug, Serialize)]
pub struct AddTaskResponse {
    /// Created task ID
    pub task_id: Uuid,
}

/// Toggle task response
#[derive(Debug, Serialize)]
pub struct ToggleTaskResponse {
    /// Task ID
    pub task_id: Uuid,

    /// Completion state after the flip
    pub is_completed: bool,
}

/// Edit task request
#[derive(Debug, Deserialize, Validate)]
pub struct EditTaskRequest {
    /// Replacement task text
    #[validate(length(max = 500, message = "Content must be at most 500 characters"))]
    pub content: String,

    /// Category identifier; unknown values keep the current category
    #[serde(default = "default_category")]
    pub category: String,
}

/// List all tasks of the session user, grouped into category buckets
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
pub async fn list_tasks(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<Json<ListTasksResponse>> {
    let grouped = state.planner.list_tasks(&token.0).await?;

    let categories = grouped
        .into_iter()
        .map(|(category, tasks)| CategoryGroup {
            category,
            label: category.label(),
            tasks: tasks.into_iter().map(TaskView::from).collect(),
        })
        .collect();

    Ok(Json(ListTasksResponse { categories }))
}

/// Add a task for the session user
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `422 Unprocessable Entity`: Blank content
pub async fn add_task(
    State(state): State<AppState>,
    token: SessionToken,
    Json(req): Json<AddTaskRequest>,
) -> ApiResult<(StatusCode, Json<AddTaskResponse>)> {
    req.validate()?;

    let task_id = state
        .planner
        .add_task(&token.0, &req.content, &req.category)
        .await?;

    Ok((StatusCode::CREATED, Json(AddTaskResponse { task_id })))
}

/// Flip a task's completion state
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: Unknown task id or a task owned by someone else
///   (indistinguishable by design)
pub async fn toggle_task(
    State(state): State<AppState>,
    token: SessionToken,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ToggleTaskResponse>> {
    let task = state.planner.toggle_task(&token.0, id).await?;

    Ok(Json(ToggleTaskResponse {
        task_id: task.id,
        is_completed: task.is_completed,
    }))
}

/// Edit a task's content and category
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: Unknown task id or a task owned by someone else
/// - `422 Unprocessable Entity`: Blank content (the task is unchanged)
pub async fn edit_task(
    State(state): State<AppState>,
    token: SessionToken,
    Path(id): Path<Uuid>,
    Json(req): Json<EditTaskRequest>,
) -> ApiResult<Json<TaskView>> {
    req.validate()?;

    let task = state
        .planner
        .edit_task(&token.0, id, &req.content, &req.category)
        .await?;

    Ok(Json(TaskView::from(task)))
}

/// Delete a task permanently
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: Unknown task id or a task owned by someone else
pub async fn delete_task(
    State(state): State<AppState>,
    token: SessionToken,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.planner.delete_task(&token.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Export the session user's tasks as a plain-text report
///
/// The body is the shareable report the web UI hands to the chat bot.
///
/// # Errors
///
/// - `401 Unauthorized`: No valid session
/// - `404 Not Found`: The user has no tasks yet
pub async fn export_tasks(
    State(state): State<AppState>,
    token: SessionToken,
) -> ApiResult<impl IntoResponse> {
    let report = state.planner.export_tasks(&token.0).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_task_request_defaults_category() {
        let req: AddTaskRequest = serde_json::from_str(r#"{"content":"Plant seeds"}"#).unwrap();
        assert_eq!(req.category, "general");

        let req: AddTaskRequest =
            serde_json::from_str(r#"{"content":"Plant seeds","category":"spring"}"#).unwrap();
        assert_eq!(req.category, "spring");
    }

    #[test]
    fn test_add_task_request_accepts_unknown_category() {
        // Unknown categories must survive deserialization; coercion happens
        // in the planner, not the DTO.
        let req: AddTaskRequest =
            serde_json::from_str(r#"{"content":"x","category":"monsoon"}"#).unwrap();
        assert_eq!(req.category, "monsoon");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_add_task_request_length_bound() {
        let req = AddTaskRequest {
            content: "a".repeat(501),
            category: "general".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_task_view_hides_owner() {
        let task = Task {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            content: "secret".to_string(),
            category: Category::General,
            is_completed: false,
            created_at: Utc::now(),
        };
        let owner_id = task.owner_id;

        let json = serde_json::to_string(&TaskView::from(task)).unwrap();
        assert!(!json.contains(&owner_id.to_string()));
    }
}
