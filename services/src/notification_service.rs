use db::models::{
    course_selection,
    notification::{self, Channel},
};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

/// Writes inbox notifications for domain events.
pub struct NotificationService;

impl NotificationService {
    pub async fn notify_user<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        target_type: &str,
        title: &str,
        content: impl Into<String>,
    ) -> Result<notification::Model, DbErr> {
        let model = notification::Model::create_sent(
            db,
            target_type,
            Some(user_id),
            title,
            Some(content.into()),
            &[Channel::Inbox],
        )
        .await?;

        tracing::info!(user_id, target_type, notification_id = model.id, "Notification sent");
        Ok(model)
    }

    /// Sends one notification per actively enrolled student. Returns how many were written.
    pub async fn notify_enrolled_students(
        db: &DatabaseConnection,
        course_id: i64,
        target_type: &str,
        title: &str,
        content: &str,
    ) -> Result<usize, DbErr> {
        let students = course_selection::Model::enrolled_student_ids(db, course_id).await?;
        if students.is_empty() {
            tracing::debug!(course_id, "No enrolled students to notify");
            return Ok(0);
        }

        for student_id in &students {
            notification::Model::create_sent(
                db,
                target_type,
                Some(*student_id),
                title,
                Some(content.to_owned()),
                &[Channel::Inbox],
            )
            .await?;
        }

        tracing::info!(course_id, target_type, count = students.len(), "Course notification fan-out");
        Ok(students.len())
    }
}
