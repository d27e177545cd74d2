use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents an employee's recorded gender.
/// Corresponds to the `gender` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Represents an employee entity as stored in the database and returned by the API.
///
/// Employees are referenced (never owned) by tasks. Deleting an employee does
/// not touch tasks that still point at it; those task reads resolve to a null
/// association instead.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier for the employee (UUID v4).
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    /// Job title, e.g. "Driver" or "Mechanic".
    pub designation: String,
    pub address: String,
    /// Contact email. Optional; tasks assigned to an employee without one are
    /// deleted without a cancellation notification.
    pub email: Option<String>,
    pub phone: String,
    /// Government-issued identifier. Uniqueness is enforced by an
    /// application-level lookup before insert, not a storage constraint.
    pub national_id: String,
    pub join_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input structure for registering an employee.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Working age bounds for fleet staff.
    #[validate(range(min = 16, max = 80))]
    pub age: i32,

    pub gender: Gender,

    #[validate(length(min = 1, max = 100))]
    pub designation: String,

    #[validate(length(min = 1, max = 300))]
    pub address: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 7, max = 20))]
    pub phone: String,

    #[validate(length(min = 1, max = 40))]
    pub national_id: String,

    pub join_date: NaiveDate,
}

/// Partial update payload for an employee. Absent fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(range(min = 16, max = 80))]
    pub age: Option<i32>,

    pub gender: Option<Gender>,

    #[validate(length(min = 1, max = 100))]
    pub designation: Option<String>,

    #[validate(length(min = 1, max = 300))]
    pub address: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 40))]
    pub national_id: Option<String>,

    pub join_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_input_validation() {
        let valid = EmployeeInput {
            name: "Dana Osei".to_string(),
            age: 34,
            gender: Gender::Female,
            designation: "Driver".to_string(),
            address: "12 Harbour Rd".to_string(),
            email: Some("dana@example.com".to_string()),
            phone: "5550102030".to_string(),
            national_id: "NID-88213".to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert!(valid.validate().is_ok());

        let under_age = EmployeeInput { age: 12, ..valid_clone(&valid) };
        assert!(under_age.validate().is_err());

        let bad_email = EmployeeInput {
            email: Some("not-an-email".to_string()),
            ..valid_clone(&valid)
        };
        assert!(bad_email.validate().is_err());

        let no_email = EmployeeInput { email: None, ..valid_clone(&valid) };
        assert!(no_email.validate().is_ok(), "email is optional");
    }

    #[test]
    fn test_gender_wire_values() {
        assert_eq!(serde_json::to_string(&Gender::Other).unwrap(), "\"Other\"");
        assert!(serde_json::from_str::<Gender>("\"unknown\"").is_err());
    }

    #[test]
    fn test_employee_update_all_fields_optional() {
        let update: EmployeeUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.validate().is_ok());
        assert!(update.name.is_none());
    }

    fn valid_clone(input: &EmployeeInput) -> EmployeeInput {
        EmployeeInput {
            name: input.name.clone(),
            age: input.age,
            gender: input.gender,
            designation: input.designation.clone(),
            address: input.address.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            national_id: input.national_id.clone(),
            join_date: input.join_date,
        }
    }
}
