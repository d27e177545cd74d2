//! Best-effort cancellation notifications.
//!
//! When a task is deleted while an employee with a contact email is assigned,
//! the service composes a short message and hands it to an external mail relay
//! over HTTP. Exactly one attempt is made; there is no retry and no queue.
//! The delete path catches failures, logs them, and proceeds.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use serde_json::json;
use std::fmt;
use std::time::Duration;

use crate::models::TaskStatus;

/// Details of a cancelled task, addressed to the assigned employee.
#[derive(Debug, Clone)]
pub struct CancellationNotice {
    pub to: String,
    pub employee_name: String,
    pub task_name: String,
    pub task_description: String,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    /// Free-form reason forwarded from the delete request, if one was given.
    pub reason: Option<String>,
}

impl CancellationNotice {
    /// Subject line for the outgoing message.
    pub fn subject(&self) -> String {
        format!("Task cancelled: {}", self.task_name)
    }

    /// Plain-text body for the outgoing message.
    pub fn body(&self) -> String {
        let mut text = format!(
            "Hello {},\n\n\
             The following task assigned to you has been cancelled.\n\n\
             Task: {}\n\
             Description: {}\n\
             Deadline: {}\n\
             Status at cancellation: {}\n",
            self.employee_name, self.task_name, self.task_description, self.deadline, self.status
        );
        if let Some(reason) = &self.reason {
            text.push_str(&format!("Reason: {}\n", reason));
        }
        text.push_str("\nFleet Operations");
        text
    }
}

/// Error raised by a notifier. Callers on the delete path log and swallow it.
#[derive(Debug)]
pub struct NotifyError(pub String);

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotifyError {}

/// Dispatches cancellation notices. Object-safe so stores hold it behind an
/// `Arc<dyn CancellationNotifier>` and tests can substitute a recording double.
#[async_trait]
pub trait CancellationNotifier: Send + Sync {
    async fn send_cancellation(&self, notice: &CancellationNotice) -> Result<(), NotifyError>;
}

/// HTTP client for the external mail relay.
///
/// Posts a JSON envelope (`from`, `to`, `subject`, `text`) to the relay's
/// send endpoint with a bounded request timeout.
pub struct RelayMailer {
    client: reqwest::Client,
    relay_url: String,
    from: String,
}

impl RelayMailer {
    pub fn new(relay_url: String, from: String) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| NotifyError(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            relay_url,
            from,
        })
    }
}

#[async_trait]
impl CancellationNotifier for RelayMailer {
    async fn send_cancellation(&self, notice: &CancellationNotice) -> Result<(), NotifyError> {
        let payload = json!({
            "from": self.from,
            "to": notice.to,
            "subject": notice.subject(),
            "text": notice.body(),
        });

        let resp = self
            .client
            .post(&self.relay_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError(format!("mail relay request failed: {}", e)))?;

        if resp.status().is_success() {
            debug!("cancellation notice delivered to {}", notice.to);
            Ok(())
        } else {
            Err(NotifyError(format!(
                "mail relay returned {}",
                resp.status()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_notice() -> CancellationNotice {
        CancellationNotice {
            to: "dana@example.com".into(),
            employee_name: "Dana Osei".into(),
            task_name: "Inspect brakes".into(),
            task_description: "Routine check".into(),
            deadline: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            status: TaskStatus::Pending,
            reason: None,
        }
    }

    #[test]
    fn test_subject_names_the_task() {
        assert_eq!(sample_notice().subject(), "Task cancelled: Inspect brakes");
    }

    #[test]
    fn test_body_contains_task_details() {
        let body = sample_notice().body();
        assert!(body.contains("Hello Dana Osei"));
        assert!(body.contains("Task: Inspect brakes"));
        assert!(body.contains("Deadline: 2025-01-10"));
        assert!(body.contains("Status at cancellation: Pending"));
        assert!(!body.contains("Reason:"));
    }

    #[test]
    fn test_body_includes_reason_when_given() {
        let notice = CancellationNotice {
            reason: Some("Vehicle sold".into()),
            ..sample_notice()
        };
        assert!(notice.body().contains("Reason: Vehicle sold"));
    }
}
