use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Stored treatment row. `species` holds the names of referenced species;
/// referential integrity is enforced at write time, not by the schema.
/// Time requirements are fixed-point milliseconds.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "treatment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub help_text: String,
    pub species: Vec<String>,
    pub initial_time_requirement_ms: i64,
    pub additional_time_requirement_ms: i64,
    pub allowed_employees: Vec<String>,
    pub preferred_employees: Vec<String>,
    pub match_event_text: Vec<String>,
    pub allow_self_booking: bool,
    pub resources: Vec<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Wire representation of a treatment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub help_text: String,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub initial_time_requirement_ms: i64,
    #[serde(default)]
    pub additional_time_requirement_ms: i64,
    #[serde(default)]
    pub allowed_employees: Vec<String>,
    #[serde(default)]
    pub preferred_employees: Vec<String>,
    #[serde(default)]
    pub match_event_text: Vec<String>,
    #[serde(default)]
    pub allow_self_booking: bool,
    #[serde(default)]
    pub resources: Vec<String>,
}

impl Model {
    pub fn into_api(self) -> Treatment {
        Treatment {
            name: self.name,
            display_name: self.display_name,
            help_text: self.help_text,
            species: self.species,
            initial_time_requirement_ms: self.initial_time_requirement_ms,
            additional_time_requirement_ms: self.additional_time_requirement_ms,
            allowed_employees: self.allowed_employees,
            preferred_employees: self.preferred_employees,
            match_event_text: self.match_event_text,
            allow_self_booking: self.allow_self_booking,
            resources: self.resources,
        }
    }
}

impl Treatment {
    /// Build the insert model for a fresh row.
    pub fn into_active_model(self) -> ActiveModel {
        let now = Utc::now();

        ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name),
            display_name: Set(self.display_name),
            help_text: Set(self.help_text),
            species: Set(self.species),
            initial_time_requirement_ms: Set(self.initial_time_requirement_ms),
            additional_time_requirement_ms: Set(self.additional_time_requirement_ms),
            allowed_employees: Set(self.allowed_employees),
            preferred_employees: Set(self.preferred_employees),
            match_event_text: Set(self.match_event_text),
            allow_self_booking: Set(self.allow_self_booking),
            resources: Set(self.resources),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

/// Every preferred employee must also appear in the allowed list. The first
/// violation is reported by identifier.
pub fn validate_employees(allowed: &[String], preferred: &[String]) -> Result<(), ModelError> {
    let allowed: HashSet<&str> = allowed.iter().map(String::as_str).collect();

    for employee in preferred {
        if !allowed.contains(employee.as_str()) {
            return Err(ModelError::Validation(format!(
                "preferred employee {employee:?} is missing from the allowed_employees list"
            )));
        }
    }

    Ok(())
}
