//! Task endpoint handlers

use axum::extract::{Path, State};
use axum::response::Json;
use serde::Deserialize;

use super::{ApiResult, AppState, Envelope};
use crate::task::{GroupedTasks, NewTask, TaskPatch, TaskStatus, DEFAULT_TASK_TYPE};

fn default_task_type() -> String {
    DEFAULT_TASK_TYPE.to_string()
}

/// Body for `POST /api/tasks`
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default = "default_task_type")]
    pub task_type: String,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub time_estimate: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub links: Vec<String>,
}

/// Body for `POST /api/tasks/{id}/complete`
#[derive(Debug, Deserialize)]
pub struct CompleteTaskRequest {
    #[serde(default)]
    pub finish_date: String,
}

/// Body for `POST /api/tasks/{id}/subtasks`
#[derive(Debug, Deserialize)]
pub struct AddSubtaskRequest {
    #[serde(default)]
    pub title: String,
}

/// `GET /api/tasks` - all tasks grouped by lane
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<GroupedTasks>> {
    let grouped = state.service.all_tasks_ordered()?;
    Ok(Json(grouped))
}

/// `POST /api/tasks` - create a task
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> ApiResult<Json<Envelope>> {
    let task = state.service.add_task(NewTask {
        title: request.title.trim().to_string(),
        task_type: request.task_type,
        status: request.status,
        time_estimate: request.time_estimate,
        notes: request.notes,
        links: request.links,
    })?;
    Ok(Envelope::with_task("Task added successfully", task))
}

/// `GET /api/tasks/{id}` - one task
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope>> {
    let task = state.service.task(&id)?;
    Ok(Envelope::task_only(task))
}

/// `PUT /api/tasks/{id}` - patch allow-listed fields
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> ApiResult<Json<Envelope>> {
    let task = state.service.update_task(&id, &patch)?;
    Ok(Envelope::with_task("Task updated successfully", task))
}

/// `DELETE /api/tasks/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope>> {
    state.service.delete_task(&id)?;
    Ok(Envelope::message("Task deleted successfully"))
}

/// `POST /api/tasks/{id}/complete` - move to historical
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CompleteTaskRequest>,
) -> ApiResult<Json<Envelope>> {
    state
        .service
        .complete_task(&id, request.finish_date.trim())?;
    Ok(Envelope::message("Task completed successfully"))
}

/// `POST /api/tasks/{id}/current` - promote from backlog
pub async fn move_to_current(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope>> {
    state.service.move_to_current(&id)?;
    Ok(Envelope::message("Task moved to current"))
}

/// `POST /api/tasks/{id}/subtasks` - append a subtask
pub async fn add_subtask(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AddSubtaskRequest>,
) -> ApiResult<Json<Envelope>> {
    let task = state.service.add_subtask(&id, request.title.trim())?;
    Ok(Envelope::with_task("Subtask added successfully", task))
}

/// `POST /api/tasks/{id}/subtasks/{subtask_id}/toggle`
pub async fn toggle_subtask(
    State(state): State<AppState>,
    Path((id, subtask_id)): Path<(String, String)>,
) -> ApiResult<Json<Envelope>> {
    let task = state.service.toggle_subtask(&id, &subtask_id)?;
    Ok(Envelope::with_task("Subtask updated successfully", task))
}
