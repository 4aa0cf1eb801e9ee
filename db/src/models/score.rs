use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

/// A released course score for one student and one grading component
/// (e.g. "midterm", "final"). Unique per (student, course, component).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub component: String,
    pub value: Option<i32>,
    pub released_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts or overwrites the score for `(student_id, course_id, component)`.
    pub async fn upsert<C: ConnectionTrait>(
        db: &C,
        student_id: i64,
        course_id: i64,
        component: &str,
        value: Option<i32>,
        released_at: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let existing = Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Component.eq(component))
            .one(db)
            .await?;

        if let Some(existing) = existing {
            let mut active_model: ActiveModel = existing.into();
            active_model.value = Set(value);
            active_model.released_at = Set(Some(released_at));
            active_model.updated_at = Set(now);
            return active_model.update(db).await;
        }

        let active_model = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            component: Set(component.to_owned()),
            value: Set(value),
            released_at: Set(Some(released_at)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_student(db: &DbConn, student_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::CourseId)
            .order_by_asc(Column::Component)
            .all(db)
            .await
    }

    pub async fn find_by_course(db: &DbConn, course_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::StudentId)
            .order_by_asc(Column::Component)
            .all(db)
            .await
    }
}
