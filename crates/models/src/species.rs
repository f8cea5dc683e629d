use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored species row. `name` carries a unique index; `icon_data` and
/// `icon_type` are always written together (tag 0 means "no icon").
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "species")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub request_castration_status: bool,
    pub match_words: Vec<String>,
    #[sea_orm(nullable)]
    pub icon_data: Option<Vec<u8>>,
    pub icon_type: i16,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Optional species icon. Tag 0 is "unspecified" and is treated the same
/// as no icon at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    #[serde(default)]
    pub data: Vec<u8>,
    #[serde(rename = "type")]
    pub kind: i16,
}

/// Wire representation of a species.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub request_castration_status: bool,
    #[serde(default)]
    pub match_words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

impl Model {
    /// Decode the stored row. The icon is only surfaced when the stored tag
    /// is non-zero.
    pub fn into_api(self) -> Species {
        let icon = (self.icon_type != 0).then(|| Icon {
            data: self.icon_data.unwrap_or_default(),
            kind: self.icon_type,
        });

        Species {
            name: self.name,
            display_name: self.display_name,
            request_castration_status: self.request_castration_status,
            match_words: self.match_words,
            icon,
        }
    }
}

impl Species {
    /// Split the optional icon into its stored column pair. An absent icon,
    /// or one tagged "unspecified", stores NULL data and tag zero.
    pub fn icon_columns(&self) -> (Option<Vec<u8>>, i16) {
        match &self.icon {
            Some(icon) if icon.kind != 0 => (Some(icon.data.clone()), icon.kind),
            _ => (None, 0),
        }
    }

    /// Build the insert model for a fresh row. An empty `display_name`
    /// falls back to `name`.
    pub fn into_active_model(self) -> ActiveModel {
        let (icon_data, icon_type) = self.icon_columns();
        let display_name = if self.display_name.is_empty() {
            self.name.clone()
        } else {
            self.display_name
        };
        let now = Utc::now();

        ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name),
            display_name: Set(display_name),
            request_castration_status: Set(self.request_castration_status),
            match_words: Set(self.match_words),
            icon_data: Set(icon_data),
            icon_type: Set(icon_type),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
