pub mod employee;
pub mod task;
pub mod user;

pub use employee::{Employee, EmployeeInput, EmployeeUpdate, Gender};
pub use task::{
    CreateTaskRequest, DeleteTaskRequest, EmployeeRef, Task, TaskStatus, TaskView,
    UpdateTaskRequest,
};
pub use user::{User, UserInput};
