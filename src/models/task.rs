use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
///
/// The wire representation matches the admin frontend: `"Pending"`,
/// `"In Progress"`, `"Completed"`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    Pending,
    /// Task is currently being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Task is finished.
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(TaskStatus::Pending),
            "In Progress" => Ok(TaskStatus::InProgress),
            "Completed" => Ok(TaskStatus::Completed),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "Pending"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Represents a task entity as stored in the database.
///
/// The employee reference is a non-owning association: the column is nullable
/// and nothing prevents the referenced employee from being deleted later, so
/// reads resolve the association by lookup rather than trusting a stored copy.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// Identifier of the assigned employee, if any.
    pub employee_id: Option<Uuid>,
    /// Short name of the task.
    pub task_name: String,
    /// Free-form description of the work.
    pub task_description: String,
    /// Calendar date the task is due.
    pub deadline: NaiveDate,
    /// The current status of the task.
    pub status: TaskStatus,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// The employee association embedded in task responses, resolved at read time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EmployeeRef {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A task as returned by the API: the stored row with its employee
/// association resolved to a name (and, on single-task reads, an email).
///
/// `employee` is `null` when the task was never assigned or when the
/// referenced employee has since been deleted.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: Uuid,
    pub task_name: String,
    pub task_description: String,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub employee: Option<EmployeeRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a task.
///
/// Every field is optional at the type level so that presence can be checked
/// explicitly and reported as a validation failure rather than a
/// deserialization error. The employee reference is named `id` on the wire
/// for compatibility with the existing admin frontend.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// The assigned employee's identifier.
    #[serde(rename = "id")]
    pub employee_id: Option<Uuid>,
    pub task_name: Option<String>,
    pub task_description: Option<String>,
    pub deadline: Option<NaiveDate>,
    /// Status as its wire string; membership in the allowed set is checked
    /// by the store before anything is written.
    pub status: Option<String>,
}

/// Payload for partially updating a task. Absent fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// Reassigns the task to another employee. Checked for existence inside
    /// the same transaction as the write.
    #[serde(rename = "id")]
    pub employee_id: Option<Uuid>,
    pub task_name: Option<String>,
    pub task_description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Optional body accepted by the delete endpoint.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DeleteTaskRequest {
    /// Free-form reason, included in the cancellation notification when given.
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"Pending\"").unwrap(),
            TaskStatus::Pending
        );
        assert!(serde_json::from_str::<TaskStatus>("\"Cancelled\"").is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Pending".parse::<TaskStatus>(), Ok(TaskStatus::Pending));
        assert_eq!(
            "In Progress".parse::<TaskStatus>(),
            Ok(TaskStatus::InProgress)
        );
        assert_eq!("Completed".parse::<TaskStatus>(), Ok(TaskStatus::Completed));
        assert!("InProgress".parse::<TaskStatus>().is_err());
        assert!("pending".parse::<TaskStatus>().is_err());
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn test_create_request_employee_field_is_named_id() {
        let employee_id = Uuid::new_v4();
        let body = serde_json::json!({
            "taskName": "Inspect brakes",
            "taskDescription": "Routine check",
            "deadline": "2025-01-10",
            "status": "Pending",
            "id": employee_id,
        });
        let req: CreateTaskRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.employee_id, Some(employee_id));
        assert_eq!(req.task_name.as_deref(), Some("Inspect brakes"));
        assert_eq!(req.deadline, Some(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()));
        assert_eq!(req.status.as_deref(), Some("Pending"));
    }

    #[test]
    fn test_task_view_serializes_camel_case() {
        let now = Utc::now();
        let view = TaskView {
            id: Uuid::new_v4(),
            task_name: "Inspect brakes".into(),
            task_description: "Routine check".into(),
            deadline: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            status: TaskStatus::Pending,
            employee: Some(EmployeeRef {
                id: Uuid::new_v4(),
                name: "Dana Osei".into(),
                email: None,
            }),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["taskName"], "Inspect brakes");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["employee"]["name"], "Dana Osei");
        // email is omitted from the association when it was not resolved
        assert!(json["employee"].get("email").is_none());
    }
}
