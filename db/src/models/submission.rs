use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A student's hand-in for an assignment.
///
/// A student may accumulate several rows per assignment; consumers that need
/// a single row pick the most recent one.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub status: SubmissionStatus,
    pub content: Option<String>,
    /// JSON array of attachment references.
    pub attachments: Option<String>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    /// JSON object of per-criterion scores.
    pub rubric_scores: Option<String>,
    pub appeal_reason: Option<String>,
    pub appealed_at: Option<DateTime<Utc>>,
    /// Teacher or admin who recorded the current score.
    pub graded_by: Option<i64>,
    pub resubmit_count: i32,
    pub submitted_at: Option<DateTime<Utc>>,
    pub graded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "submission_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SubmissionStatus {
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "resubmitted")]
    Resubmitted,
    #[sea_orm(string_value = "graded")]
    Graded,
    #[sea_orm(string_value = "appealed")]
    Appealed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id"
    )]
    Assignment,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        attachments: Option<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            status: Set(SubmissionStatus::Submitted),
            content: Set(content),
            attachments: Set(attachments),
            score: Set(None),
            feedback: Set(None),
            rubric_scores: Set(None),
            appeal_reason: Set(None),
            appealed_at: Set(None),
            graded_by: Set(None),
            resubmit_count: Set(0),
            submitted_at: Set(Some(now)),
            graded_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_for_student(
        db: &DbConn,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Id)
            .one(db)
            .await
    }

    pub async fn find_by_assignment(db: &DbConn, assignment_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_assignments(
        db: &DbConn,
        assignment_ids: &[i64],
    ) -> Result<Vec<Model>, DbErr> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::AssignmentId.is_in(assignment_ids.iter().copied()))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Replaces the content of a submission and clears any grading state.
    pub async fn resubmit(
        self,
        db: &DbConn,
        content: Option<String>,
        attachments: Option<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let count = self.resubmit_count + 1;

        let mut active_model: ActiveModel = self.into();
        active_model.content = Set(content);
        active_model.attachments = Set(attachments);
        active_model.status = Set(SubmissionStatus::Resubmitted);
        active_model.resubmit_count = Set(count);
        active_model.score = Set(None);
        active_model.feedback = Set(None);
        active_model.rubric_scores = Set(None);
        active_model.appeal_reason = Set(None);
        active_model.appealed_at = Set(None);
        active_model.graded_by = Set(None);
        active_model.graded_at = Set(None);
        active_model.submitted_at = Set(Some(now));
        active_model.updated_at = Set(now);
        active_model.update(db).await
    }

    /// Records a score and closes any open appeal. Status only moves to
    /// `graded` when `publish` is set.
    pub async fn grade<C: ConnectionTrait>(
        self,
        db: &C,
        graded_by: i64,
        score: i32,
        feedback: Option<String>,
        rubric_scores: Option<String>,
        publish: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let mut active_model: ActiveModel = self.into();
        active_model.score = Set(Some(score));
        active_model.feedback = Set(feedback);
        active_model.rubric_scores = Set(rubric_scores);
        active_model.graded_by = Set(Some(graded_by));
        active_model.appeal_reason = Set(None);
        active_model.appealed_at = Set(None);
        if publish {
            active_model.status = Set(SubmissionStatus::Graded);
            active_model.graded_at = Set(Some(now));
        }
        active_model.updated_at = Set(now);
        active_model.update(db).await
    }

    pub async fn appeal(self, db: &DbConn, reason: &str) -> Result<Model, DbErr> {
        let now = Utc::now();

        let mut active_model: ActiveModel = self.into();
        active_model.status = Set(SubmissionStatus::Appealed);
        active_model.appeal_reason = Set(Some(reason.to_owned()));
        active_model.appealed_at = Set(Some(now));
        active_model.updated_at = Set(now);
        active_model.update(db).await
    }

    pub fn is_graded(&self) -> bool {
        self.status == SubmissionStatus::Graded
    }

    pub fn has_open_appeal(&self) -> bool {
        self.status == SubmissionStatus::Appealed || self.appeal_reason.is_some()
    }
}
