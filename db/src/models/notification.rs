use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// An inbox message. `recipient_id = None` marks a broadcast visible to everyone.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub target_type: String,
    pub recipient_id: Option<i64>,
    pub title: String,
    pub content: Option<String>,
    /// JSON array of channel names.
    pub channels: String,
    pub status: NotificationStatus,
    pub sent_at: Option<DateTime<Utc>>,
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notification_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NotificationStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "sent")]
    Sent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Channel {
    Inbox,
    Email,
    Sms,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RecipientId",
        to = "super::user::Column::Id"
    )]
    Recipient,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a notification in `sent` state.
    pub async fn create_sent<C: ConnectionTrait>(
        db: &C,
        target_type: &str,
        recipient_id: Option<i64>,
        title: &str,
        content: Option<String>,
        channels: &[Channel],
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let channels = serde_json::to_string(channels)
            .map_err(|e| DbErr::Custom(format!("Invalid channel list: {e}")))?;

        let active_model = ActiveModel {
            target_type: Set(target_type.to_owned()),
            recipient_id: Set(recipient_id),
            title: Set(title.to_owned()),
            content: Set(content),
            channels: Set(channels),
            status: Set(NotificationStatus::Sent),
            sent_at: Set(Some(now)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub fn channel_list(&self) -> Vec<Channel> {
        serde_json::from_str(&self.channels).unwrap_or_default()
    }
}
