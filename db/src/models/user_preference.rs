use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;

pub const DEFAULT_LANGUAGE: &str = "zh-CN";

/// Per-user UI and notification settings. A missing row means defaults.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_preferences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    pub language: String,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub ai_assistant_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Partial update; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct PreferenceChanges {
    pub language: Option<String>,
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub ai_assistant_enabled: Option<bool>,
}

impl Model {
    fn defaults(user_id: i64) -> Model {
        let now = Utc::now();
        Model {
            user_id,
            language: DEFAULT_LANGUAGE.to_owned(),
            email_notifications: true,
            sms_notifications: false,
            ai_assistant_enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stored preferences, or the defaults when the user never saved any.
    pub async fn get_or_default(db: &DbConn, user_id: i64) -> Result<Model, DbErr> {
        Ok(Entity::find_by_id(user_id)
            .one(db)
            .await?
            .unwrap_or_else(|| Self::defaults(user_id)))
    }

    /// Applies `changes` on top of the current preferences and persists the result.
    pub async fn update_for(
        db: &DbConn,
        user_id: i64,
        changes: PreferenceChanges,
    ) -> Result<Model, DbErr> {
        let stored = Entity::find_by_id(user_id).one(db).await?;
        let exists = stored.is_some();
        let current = stored.unwrap_or_else(|| Self::defaults(user_id));

        let mut active_model: ActiveModel = current.into();
        if !exists {
            active_model = active_model.reset_all();
        }
        if let Some(language) = changes.language {
            active_model.language = Set(language);
        }
        if let Some(flag) = changes.email_notifications {
            active_model.email_notifications = Set(flag);
        }
        if let Some(flag) = changes.sms_notifications {
            active_model.sms_notifications = Set(flag);
        }
        if let Some(flag) = changes.ai_assistant_enabled {
            active_model.ai_assistant_enabled = Set(flag);
        }
        active_model.updated_at = Set(Utc::now());

        if exists {
            active_model.update(db).await
        } else {
            active_model.insert(db).await
        }
    }
}
