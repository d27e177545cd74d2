use crate::{
    error::AppError,
    models::{EmployeeInput, EmployeeUpdate},
    store::EmployeeStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;

/// Retrieves all employees.
#[get("")]
pub async fn get_employees(store: web::Data<EmployeeStore>) -> Result<impl Responder, AppError> {
    let employees = store.list().await?;
    Ok(HttpResponse::Ok().json(json!({ "employees": employees })))
}

/// Registers a new employee.
///
/// National-id uniqueness is enforced by lookup before insert; a duplicate
/// yields `400 Bad Request`.
#[post("")]
pub async fn create_employee(
    store: web::Data<EmployeeStore>,
    employee_data: web::Json<EmployeeInput>,
) -> Result<impl Responder, AppError> {
    let employee = store.create(employee_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({ "employee": employee })))
}

/// Retrieves a single employee by ID.
#[get("/{id}")]
pub async fn get_employee(
    store: web::Data<EmployeeStore>,
    employee_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let employee = store.get(employee_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "employee": employee })))
}

/// Partially updates an employee. Only the provided fields change.
#[put("/{id}")]
pub async fn update_employee(
    store: web::Data<EmployeeStore>,
    employee_id: web::Path<Uuid>,
    employee_data: web::Json<EmployeeUpdate>,
) -> Result<impl Responder, AppError> {
    let employee = store
        .update(employee_id.into_inner(), employee_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "employee": employee })))
}

/// Deletes an employee.
///
/// Tasks still referencing the employee are left untouched; their reads
/// resolve to a null association from then on.
#[delete("/{id}")]
pub async fn delete_employee(
    store: web::Data<EmployeeStore>,
    employee_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    store.delete(employee_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully"
    })))
}
