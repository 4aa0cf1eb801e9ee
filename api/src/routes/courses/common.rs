use db::models::course;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct CourseResponse {
    pub id: i64,
    pub name: String,
    pub semester: Option<String>,
    pub credit: Option<i32>,
    pub status: String,
    pub enroll_limit: Option<i32>,
    pub teacher_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<course::Model> for CourseResponse {
    fn from(course: course::Model) -> Self {
        Self {
            id: course.id,
            name: course.name,
            semester: course.semester,
            credit: course.credit,
            status: course.status.to_string(),
            enroll_limit: course.enroll_limit,
            teacher_id: course.teacher_id,
            created_at: course.created_at.to_rfc3339(),
            updated_at: course.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct CourseMetrics {
    pub enrolled_count: u64,
    pub assignments: u64,
}

#[derive(Debug, Serialize, Default)]
pub struct CourseListItem {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub metrics: CourseMetrics,
}
