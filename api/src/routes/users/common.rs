use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<db::models::user::Model> for UserResponse {
    fn from(user: db::models::user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            status: user.status.to_string(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct PreferencesResponse {
    pub language: String,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub ai_assistant_enabled: bool,
}

impl From<db::models::user_preference::Model> for PreferencesResponse {
    fn from(prefs: db::models::user_preference::Model) -> Self {
        Self {
            language: prefs.language,
            email_notifications: prefs.email_notifications,
            sms_notifications: prefs.sms_notifications,
            ai_assistant_enabled: prefs.ai_assistant_enabled,
        }
    }
}
