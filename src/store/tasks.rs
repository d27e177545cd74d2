use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    CreateTaskRequest, EmployeeRef, Task, TaskStatus, TaskView, UpdateTaskRequest,
};
use crate::notify::{CancellationNotice, CancellationNotifier};
use crate::store::employees;

/// Outcome of a task deletion: whether a cancellation notice was attempted
/// and the employee association the task carried at the time.
#[derive(Debug)]
pub struct TaskDeletion {
    pub email_sent: bool,
    pub employee: Option<EmployeeRef>,
}

/// A task row joined with its employee association, as fetched in one query.
/// `employee_name`/`employee_email` are null both for unassigned tasks and
/// for tasks whose employee has since been deleted.
#[derive(Debug, FromRow)]
struct TaskJoinRow {
    id: Uuid,
    employee_id: Option<Uuid>,
    task_name: String,
    task_description: String,
    deadline: NaiveDate,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    employee_name: Option<String>,
    employee_email: Option<String>,
}

impl TaskJoinRow {
    fn into_view(self, include_email: bool) -> TaskView {
        let employee = match (self.employee_id, self.employee_name) {
            (Some(id), Some(name)) => Some(EmployeeRef {
                id,
                name,
                email: if include_email {
                    self.employee_email
                } else {
                    None
                },
            }),
            // Dangling or absent reference: surface no association.
            _ => None,
        };
        TaskView {
            id: self.id,
            task_name: self.task_name,
            task_description: self.task_description,
            deadline: self.deadline,
            status: self.status,
            employee,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const TASK_COLUMNS: &str =
    "id, employee_id, task_name, task_description, deadline, status, created_at, updated_at";

const TASK_JOIN_QUERY: &str = "SELECT t.id, t.employee_id, t.task_name, t.task_description, \
     t.deadline, t.status, t.created_at, t.updated_at, \
     e.name AS employee_name, e.email AS employee_email \
     FROM tasks t LEFT JOIN employees e ON e.id = t.employee_id";

fn parse_status(raw: &str) -> Result<TaskStatus, AppError> {
    raw.parse().map_err(|_| {
        AppError::ValidationError(
            "status must be one of Pending, In Progress, Completed".into(),
        )
    })
}

fn require<T>(field: Option<T>, name: &str) -> Result<T, AppError> {
    field.ok_or_else(|| AppError::ValidationError(format!("{} is required", name)))
}

/// Data access and orchestration for task records.
///
/// Creation and update run their employee lookup and task write inside one
/// transaction so a task is never persisted against an employee that does
/// not exist at that moment. Deletion sends a best-effort cancellation
/// notice through the injected notifier before removing the row.
#[derive(Clone)]
pub struct TaskStore {
    pool: PgPool,
    notifier: Arc<dyn CancellationNotifier>,
}

impl TaskStore {
    pub fn new(pool: PgPool, notifier: Arc<dyn CancellationNotifier>) -> Self {
        Self { pool, notifier }
    }

    /// All tasks with the employee name resolved. No pagination, no filtering.
    pub async fn list(&self) -> Result<Vec<TaskView>, AppError> {
        let rows = sqlx::query_as::<_, TaskJoinRow>(&format!(
            "{} ORDER BY t.created_at DESC",
            TASK_JOIN_QUERY
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_view(false)).collect())
    }

    /// Creates a task assigned to an existing employee.
    ///
    /// All five fields must be present and `status` must be a valid enum
    /// value. The employee lookup and the insert share one transaction: if
    /// the employee is absent the transaction aborts and nothing persists.
    pub async fn create(&self, req: CreateTaskRequest) -> Result<TaskView, AppError> {
        let employee_id = require(req.employee_id, "id")?;
        let task_name = require(req.task_name.filter(|s| !s.trim().is_empty()), "taskName")?;
        let task_description = require(
            req.task_description.filter(|s| !s.trim().is_empty()),
            "taskDescription",
        )?;
        let deadline = require(req.deadline, "deadline")?;
        let status = parse_status(&require(req.status, "status")?)?;

        let mut tx = self.pool.begin().await?;

        if !employees::exists_in_tx(&mut tx, employee_id).await? {
            tx.rollback().await?;
            return Err(AppError::NotFound("Employee not found".into()));
        }

        let task_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO tasks (id, employee_id, task_name, task_description, deadline, status)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(task_id)
        .bind(employee_id)
        .bind(&task_name)
        .bind(&task_description)
        .bind(deadline)
        .bind(status)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        // Re-read so the response carries the employee name.
        self.fetch_view(task_id, false)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Fetches a task with its employee name and email resolved.
    pub async fn get(&self, id: Uuid) -> Result<TaskView, AppError> {
        self.fetch_view(id, true)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Applies only the provided fields. The load and the write share one
    /// transaction; a reassignment re-checks employee existence inside it.
    pub async fn update(&self, id: Uuid, req: UpdateTaskRequest) -> Result<TaskView, AppError> {
        let status = match req.status.as_deref() {
            Some(raw) => Some(parse_status(raw)?),
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let existing = match existing {
            Some(row) => row,
            None => {
                tx.rollback().await?;
                return Err(AppError::NotFound("Task not found".into()));
            }
        };

        if let Some(employee_id) = req.employee_id {
            if !employees::exists_in_tx(&mut tx, employee_id).await? {
                tx.rollback().await?;
                return Err(AppError::NotFound("Employee not found".into()));
            }
        }

        sqlx::query(
            "UPDATE tasks
             SET employee_id = $1, task_name = $2, task_description = $3,
                 deadline = $4, status = $5, updated_at = NOW()
             WHERE id = $6",
        )
        .bind(req.employee_id.or(existing.employee_id))
        .bind(req.task_name.unwrap_or(existing.task_name))
        .bind(req.task_description.unwrap_or(existing.task_description))
        .bind(req.deadline.unwrap_or(existing.deadline))
        .bind(status.unwrap_or(existing.status))
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        self.fetch_view(id, false)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Deletes a task, first attempting a cancellation notice when the
    /// assigned employee has an email on record. A relay failure is logged
    /// and swallowed; it never blocks the deletion.
    pub async fn delete(
        &self,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<TaskDeletion, AppError> {
        let view = self
            .fetch_view(id, true)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

        let mut email_sent = false;
        if let Some(employee) = &view.employee {
            if let Some(email) = &employee.email {
                email_sent = true;
                let notice = CancellationNotice {
                    to: email.clone(),
                    employee_name: employee.name.clone(),
                    task_name: view.task_name.clone(),
                    task_description: view.task_description.clone(),
                    deadline: view.deadline,
                    status: view.status,
                    reason,
                };
                if let Err(err) = self.notifier.send_cancellation(&notice).await {
                    warn!(
                        "cancellation notice for task {} to {} failed: {}",
                        view.id, email, err
                    );
                }
            }
        }

        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(TaskDeletion {
            email_sent,
            employee: view.employee,
        })
    }

    async fn fetch_view(
        &self,
        id: Uuid,
        include_email: bool,
    ) -> Result<Option<TaskView>, AppError> {
        let row = sqlx::query_as::<_, TaskJoinRow>(&format!(
            "{} WHERE t.id = $1",
            TASK_JOIN_QUERY
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_view(include_email)))
    }
}
