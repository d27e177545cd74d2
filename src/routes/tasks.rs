use crate::{
    error::AppError,
    models::{task::DeleteTaskRequest, CreateTaskRequest, UpdateTaskRequest},
    store::TaskStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;

/// Retrieves all tasks.
///
/// Each task carries its employee association resolved to `{id, name}`,
/// or `null` if the task is unassigned or the employee no longer exists.
///
/// ## Responses:
/// - `200 OK`: `{"tasks": [...]}`.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For database errors.
#[get("")]
pub async fn get_tasks(store: web::Data<TaskStore>) -> Result<impl Responder, AppError> {
    let tasks = store.list().await?;
    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

/// Creates a task assigned to an existing employee.
///
/// ## Request Body:
/// - `taskName`, `taskDescription`, `deadline`, `status`: all required.
/// - `id`: the assigned employee's identifier (required).
///
/// The employee lookup and the task insert run in one database transaction:
/// if the employee does not exist, nothing is persisted.
///
/// ## Responses:
/// - `201 Created`: `{"task": {...}}` with the employee name attached.
/// - `400 Bad Request`: A field is missing or `status` is not one of
///   `Pending`, `In Progress`, `Completed`.
/// - `404 Not Found`: The referenced employee does not exist.
/// - `401 Unauthorized` / `500 Internal Server Error`.
#[post("")]
pub async fn create_task(
    store: web::Data<TaskStore>,
    task_data: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let task = store.create(task_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({ "task": task })))
}

/// Retrieves a single task by its ID, with the employee's name and email
/// resolved by a direct lookup at read time.
///
/// ## Responses:
/// - `200 OK`: `{"task": {...}}`.
/// - `404 Not Found`: No task with this ID.
/// - `401 Unauthorized` / `500 Internal Server Error`.
#[get("/{id}")]
pub async fn get_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = store.get(task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// Partially updates a task. Only the provided fields change; a provided
/// `status` must be a valid enum value, and a provided employee `id` is
/// checked for existence inside the update transaction.
///
/// ## Responses:
/// - `200 OK`: `{"task": {...}}`.
/// - `400 Bad Request`: Invalid `status` value.
/// - `404 Not Found`: Task (or reassignment target employee) absent.
/// - `401 Unauthorized` / `500 Internal Server Error`.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    let task = store
        .update(task_id.into_inner(), task_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// Deletes a task.
///
/// If the assigned employee has an email on record, one cancellation notice
/// is attempted first; a relay failure is logged and never blocks the
/// deletion. The optional body may carry a `reason` included in the notice.
///
/// ## Responses:
/// - `200 OK`: `{"message", "emailSent", "employee"}`.
/// - `404 Not Found`: No task with this ID.
/// - `401 Unauthorized` / `500 Internal Server Error`.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
    body: Option<web::Json<DeleteTaskRequest>>,
) -> Result<impl Responder, AppError> {
    let reason = body.and_then(|b| b.into_inner().reason);
    let deletion = store.delete(task_id.into_inner(), reason).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully",
        "emailSent": deletion.email_sent,
        "employee": deletion.employee,
    })))
}
