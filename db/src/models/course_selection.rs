use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A student's enrollment in a course. One row per (course, student).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_selections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub status: SelectionStatus,
    pub selected_at: DateTime<Utc>,
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "selection_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SelectionStatus {
    #[sea_orm(string_value = "enrolled")]
    Enrolled,
    #[sea_orm(string_value = "dropped")]
    Dropped,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find(
        db: &DbConn,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.eq(student_id))
            .one(db)
            .await
    }

    /// Enrolls a student, reusing a previously dropped row if one exists.
    pub async fn enroll(db: &DbConn, course_id: i64, student_id: i64) -> Result<Model, DbErr> {
        let now = Utc::now();

        if let Some(existing) = Self::find(db, course_id, student_id).await? {
            let mut active_model: ActiveModel = existing.into();
            active_model.status = Set(SelectionStatus::Enrolled);
            active_model.selected_at = Set(now);
            active_model.updated_at = Set(now);
            return active_model.update(db).await;
        }

        let active_model = ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            status: Set(SelectionStatus::Enrolled),
            selected_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn drop_enrollment(self, db: &DbConn) -> Result<Model, DbErr> {
        let mut active_model: ActiveModel = self.into();
        active_model.status = Set(SelectionStatus::Dropped);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    /// Active enrollments of a course, in enrollment order.
    pub async fn enrolled_in_course(db: &DbConn, course_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Status.eq(SelectionStatus::Enrolled))
            .order_by_asc(Column::SelectedAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn enrolled_student_ids(db: &DbConn, course_id: i64) -> Result<Vec<i64>, DbErr> {
        Ok(Self::enrolled_in_course(db, course_id)
            .await?
            .into_iter()
            .map(|s| s.student_id)
            .collect())
    }

    pub async fn count_enrolled(db: &DbConn, course_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Status.eq(SelectionStatus::Enrolled))
            .count(db)
            .await
    }

    pub async fn courses_for_student(db: &DbConn, student_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.eq(SelectionStatus::Enrolled))
            .order_by_asc(Column::SelectedAt)
            .all(db)
            .await
    }

    pub async fn is_enrolled(db: &DbConn, course_id: i64, student_id: i64) -> Result<bool, DbErr> {
        Ok(matches!(
            Self::find(db, course_id, student_id).await?,
            Some(Model { status: SelectionStatus::Enrolled, .. })
        ))
    }
}
