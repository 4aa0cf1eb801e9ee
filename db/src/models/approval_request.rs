use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "approval_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub approval_type: ApprovalType,
    pub status: ApprovalStatus,
    pub applicant_id: i64,
    /// JSON payload describing the subject of the request.
    pub payload: Option<String>,
    pub processed_by: Option<i64>,
    pub comment: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
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
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "approval_type")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ApprovalType {
    #[sea_orm(string_value = "course_publish")]
    CoursePublish,
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "approval_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ApplicantId",
        to = "super::user::Column::Id"
    )]
    Applicant,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applicant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        approval_type: ApprovalType,
        applicant_id: i64,
        payload: Option<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            approval_type: Set(approval_type),
            status: Set(ApprovalStatus::Pending),
            applicant_id: Set(applicant_id),
            payload: Set(payload),
            processed_by: Set(None),
            comment: Set(None),
            processed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    /// Records the reviewer's decision if the request is still pending.
    ///
    /// The status check and the write are a single statement, so of two
    /// concurrent decisions only one succeeds. Returns `None` for the loser.
    pub async fn decide<C: ConnectionTrait>(
        self,
        db: &C,
        status: ApprovalStatus,
        processed_by: i64,
        comment: Option<String>,
    ) -> Result<Option<Model>, DbErr> {
        let now = Utc::now();

        let result = Entity::update_many()
            .set(ActiveModel {
                status: Set(status),
                processed_by: Set(Some(processed_by)),
                comment: Set(comment),
                processed_at: Set(Some(now)),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(Column::Id.eq(self.id))
            .filter(Column::Status.eq(ApprovalStatus::Pending))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        Entity::find_by_id(self.id).one(db).await
    }

    /// Reads `course_id` out of a `course_publish` payload.
    pub fn course_id(&self) -> Option<i64> {
        let payload = self.payload.as_deref()?;
        serde_json::from_str::<serde_json::Value>(payload)
            .ok()?
            .get("course_id")?
            .as_i64()
    }

    pub async fn count_pending(db: &DbConn) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::Status.eq(ApprovalStatus::Pending))
            .count(db)
            .await
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending
    }
}
