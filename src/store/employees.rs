use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Employee, EmployeeInput, EmployeeUpdate};

const EMPLOYEE_COLUMNS: &str = "id, name, age, gender, designation, address, email, phone, \
     national_id, join_date, created_at, updated_at";

/// Data access for employee records.
///
/// National-id uniqueness is enforced here by lookup before write, not by a
/// storage constraint.
#[derive(Clone)]
pub struct EmployeeStore {
    pool: PgPool,
}

impl EmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All employees, most recently joined first.
    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees ORDER BY join_date DESC, name",
            EMPLOYEE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, AppError> {
        input.validate()?;

        let duplicate =
            sqlx::query_as::<_, (Uuid,)>("SELECT id FROM employees WHERE national_id = $1")
                .bind(&input.national_id)
                .fetch_optional(&self.pool)
                .await?;
        if duplicate.is_some() {
            return Err(AppError::BadRequest(
                "An employee with this national ID already exists".into(),
            ));
        }

        let employee = sqlx::query_as::<_, Employee>(&format!(
            "INSERT INTO employees (id, name, age, gender, designation, address, email, phone, \
             national_id, join_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {}",
            EMPLOYEE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(input.age)
        .bind(input.gender)
        .bind(&input.designation)
        .bind(&input.address)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.national_id)
        .bind(input.join_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn get(&self, id: Uuid) -> Result<Employee, AppError> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        employee.ok_or_else(|| AppError::NotFound("Employee not found".into()))
    }

    /// Partial update; absent fields keep their stored values.
    pub async fn update(&self, id: Uuid, update: EmployeeUpdate) -> Result<Employee, AppError> {
        update.validate()?;

        if let Some(national_id) = &update.national_id {
            let taken = sqlx::query_as::<_, (Uuid,)>(
                "SELECT id FROM employees WHERE national_id = $1 AND id <> $2",
            )
            .bind(national_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            if taken.is_some() {
                return Err(AppError::BadRequest(
                    "An employee with this national ID already exists".into(),
                ));
            }
        }

        let employee = sqlx::query_as::<_, Employee>(&format!(
            "UPDATE employees
             SET name = COALESCE($1, name),
                 age = COALESCE($2, age),
                 gender = COALESCE($3, gender),
                 designation = COALESCE($4, designation),
                 address = COALESCE($5, address),
                 email = COALESCE($6, email),
                 phone = COALESCE($7, phone),
                 national_id = COALESCE($8, national_id),
                 join_date = COALESCE($9, join_date),
                 updated_at = NOW()
             WHERE id = $10
             RETURNING {}",
            EMPLOYEE_COLUMNS
        ))
        .bind(&update.name)
        .bind(update.age)
        .bind(update.gender)
        .bind(&update.designation)
        .bind(&update.address)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.national_id)
        .bind(update.join_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        employee.ok_or_else(|| AppError::NotFound("Employee not found".into()))
    }

    /// Deletes the employee record. Tasks still referencing it are left in
    /// place; their reads resolve to a null association from then on.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Employee not found".into()));
        }
        Ok(())
    }
}

/// Existence check used by the task store inside its own transaction, so the
/// employee lookup and the task write commit or abort together.
pub async fn exists_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_as::<_, (Uuid,)>("SELECT id FROM employees WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row.is_some())
}
