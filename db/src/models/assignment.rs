use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents an assignment belonging to a course.
///
/// Students may submit once the assignment is published, its `release_at`
/// has passed and (if set) its `deadline` has not.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub assignment_type: AssignmentType,
    pub deadline: Option<DateTime<Utc>>,
    pub release_at: Option<DateTime<Utc>>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub allow_resubmit: bool,
    /// Upper bound on resubmissions, unlimited when `None`.
    pub max_resubmit: Option<i32>,
    /// Rubric definition as a JSON document.
    pub grading_rubric: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "assignment_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AssignmentType {
    #[default]
    #[sea_orm(string_value = "assignment")]
    Assignment,
    #[sea_orm(string_value = "quiz")]
    Quiz,
    #[sea_orm(string_value = "project")]
    Project,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,

    #[sea_orm(has_many = "super::submission::Entity")]
    Submissions,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Field set for inserting an assignment.
#[derive(Debug, Clone, Default)]
pub struct NewAssignment {
    pub title: String,
    pub assignment_type: AssignmentType,
    pub deadline: Option<DateTime<Utc>>,
    pub release_at: Option<DateTime<Utc>>,
    pub allow_resubmit: bool,
    pub max_resubmit: Option<i32>,
    pub grading_rubric: Option<String>,
}

impl Model {
    /// Inserts an unpublished assignment into `course_id`.
    pub async fn create(db: &DbConn, course_id: i64, new: NewAssignment) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            course_id: Set(course_id),
            title: Set(new.title),
            assignment_type: Set(new.assignment_type),
            deadline: Set(new.deadline),
            release_at: Set(new.release_at),
            published: Set(false),
            published_at: Set(None),
            allow_resubmit: Set(new.allow_resubmit),
            max_resubmit: Set(new.max_resubmit),
            grading_rubric: Set(new.grading_rubric),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// All assignments of a course in creation order.
    pub async fn find_by_course(db: &DbConn, course_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Marks the assignment published; `release_at` defaults to now when unset.
    pub async fn publish(self, db: &DbConn) -> Result<Model, DbErr> {
        let now = Utc::now();
        let release_at = self.release_at.unwrap_or(now);

        let mut active_model: ActiveModel = self.into();
        active_model.published = Set(true);
        active_model.published_at = Set(Some(now));
        active_model.release_at = Set(Some(release_at));
        active_model.updated_at = Set(now);
        active_model.update(db).await
    }

    /// Copies this assignment into `target_course_id` as an unpublished draft.
    pub async fn duplicate_into(
        &self,
        db: &DbConn,
        target_course_id: i64,
        new_title: Option<String>,
    ) -> Result<Model, DbErr> {
        let title = new_title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("{} (copy)", self.title));

        Self::create(
            db,
            target_course_id,
            NewAssignment {
                title,
                assignment_type: self.assignment_type,
                deadline: self.deadline,
                release_at: self.release_at,
                allow_resubmit: self.allow_resubmit,
                max_resubmit: self.max_resubmit,
                grading_rubric: self.grading_rubric.clone(),
            },
        )
        .await
    }

    /// Whether a student may hand in work at `now`.
    pub fn accepts_submissions(&self, now: DateTime<Utc>) -> bool {
        self.published
            && self.release_at.is_none_or(|r| r <= now)
            && self.deadline.is_none_or(|d| now <= d)
    }

    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|d| d < now)
    }
}
