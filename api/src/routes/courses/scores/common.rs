use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct ScoreResponse {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub component: String,
    pub value: Option<i32>,
    pub released_at: Option<String>,
}

impl From<db::models::score::Model> for ScoreResponse {
    fn from(score: db::models::score::Model) -> Self {
        Self {
            id: score.id,
            student_id: score.student_id,
            course_id: score.course_id,
            component: score.component,
            value: score.value,
            released_at: score.released_at.map(|t| t.to_rfc3339()),
        }
    }
}
