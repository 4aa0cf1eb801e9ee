use db::models::user::UserRole;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub role: UserRole,
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Teachers and admins.
    pub fn is_staff(&self) -> bool {
        matches!(self.role, UserRole::Teacher | UserRole::Admin)
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
