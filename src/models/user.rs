use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An administrator account. Only admins can reach the fleet API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String, // Input only; never stored in the User model
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_user_input_validation() {
        // Test valid input
        let input = UserInput {
            username: "fleetadmin".to_string(),
            email: "admin@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(input.validate().is_ok());

        // Test invalid email
        let input = UserInput {
            username: "fleetadmin".to_string(),
            email: "invalid-email".to_string(),
            password: "password123".to_string(),
        };
        assert!(input.validate().is_err());

        // Test short password
        let input = UserInput {
            username: "fleetadmin".to_string(),
            email: "admin@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(input.validate().is_err());
    }
}
