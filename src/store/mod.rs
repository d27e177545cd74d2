//! Persistence layer.
//!
//! Stores are constructed once at startup with an injected connection pool
//! (and, for tasks, a notifier) and shared with handlers through
//! `web::Data`. Mutations that must uphold the employee-reference invariant
//! run inside a single database transaction.

pub mod employees;
pub mod tasks;

pub use employees::EmployeeStore;
pub use tasks::{TaskDeletion, TaskStore};
