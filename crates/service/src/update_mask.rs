//! Field-mask driven partial updates.
//!
//! An update request carries a replacement entity plus an optional list of
//! field paths. The engine turns the masked fields into an `ActiveModel`
//! holding exactly the columns to write; everything else stays `NotSet` so
//! the store applies a true partial update.

use models::species::{self, Icon, Species};
use models::treatment::{self, Treatment};
use sea_orm::Set;

use crate::errors::ServiceError;

/// All mutable species fields, used when the caller supplies no mask.
pub const SPECIES_DEFAULT_PATHS: &[&str] =
    &["display_name", "request_castration_status", "match_words", "icon"];

/// All mutable treatment fields, used when the caller supplies no mask.
pub const TREATMENT_DEFAULT_PATHS: &[&str] = &[
    "display_name",
    "help_text",
    "species",
    "initial_time_requirement",
    "additional_time_requirement",
    "allowed_employees",
    "preferred_employees",
    "match_event_text",
    "allow_self_booking",
    "resources",
];

fn effective_paths<'a>(mask: &'a [String], default: &[&'a str]) -> Vec<&'a str> {
    if mask.is_empty() {
        default.to_vec()
    } else {
        mask.iter().map(String::as_str).collect()
    }
}

/// Build the partial-update model for a species.
pub fn species_update(
    mask: &[String],
    replacement: &Species,
) -> Result<species::ActiveModel, ServiceError> {
    let mut update = species::ActiveModel::default();

    for path in effective_paths(mask, SPECIES_DEFAULT_PATHS) {
        match path {
            "name" => {
                return Err(ServiceError::InvalidArgument(
                    "a species name cannot be updated".into(),
                ))
            }

            "display_name" => update.display_name = Set(replacement.display_name.clone()),

            "request_castration_status" => {
                update.request_castration_status = Set(replacement.request_castration_status)
            }

            "match_words" => update.match_words = Set(replacement.match_words.clone()),

            "icon" | "icon.data" | "icon.type" => {
                apply_icon_path(path, replacement.icon.as_ref(), &mut update)
            }

            other => {
                return Err(ServiceError::InvalidArgument(format!(
                    "invalid field path {other:?}"
                )))
            }
        }
    }

    Ok(update)
}

/// Build the partial-update model for a treatment.
pub fn treatment_update(
    mask: &[String],
    replacement: &Treatment,
) -> Result<treatment::ActiveModel, ServiceError> {
    let mut update = treatment::ActiveModel::default();

    for path in effective_paths(mask, TREATMENT_DEFAULT_PATHS) {
        match path {
            "name" => {
                return Err(ServiceError::InvalidArgument(
                    "a treatment name cannot be updated".into(),
                ))
            }

            "display_name" => update.display_name = Set(replacement.display_name.clone()),

            "help_text" => update.help_text = Set(replacement.help_text.clone()),

            "species" => update.species = Set(replacement.species.clone()),

            "initial_time_requirement" => {
                update.initial_time_requirement_ms = Set(replacement.initial_time_requirement_ms)
            }

            "additional_time_requirement" => {
                update.additional_time_requirement_ms =
                    Set(replacement.additional_time_requirement_ms)
            }

            "allowed_employees" => {
                update.allowed_employees = Set(replacement.allowed_employees.clone())
            }

            "preferred_employees" => {
                update.preferred_employees = Set(replacement.preferred_employees.clone())
            }

            "match_event_text" => update.match_event_text = Set(replacement.match_event_text.clone()),

            "allow_self_booking" => update.allow_self_booking = Set(replacement.allow_self_booking),

            "resources" => update.resources = Set(replacement.resources.clone()),

            other => {
                return Err(ServiceError::InvalidArgument(format!(
                    "invalid field path {other:?}"
                )))
            }
        }
    }

    Ok(update)
}

/// Single place that decides how icon paths touch the stored column pair.
///
/// The parent path writes both columns. A child path writes only its own
/// column when a replacement icon is present; with an absent replacement it
/// clears BOTH columns. The child-path clearing behaviour is asymmetric but
/// long-standing; keep any change to it confined to this function.
fn apply_icon_path(path: &str, icon: Option<&Icon>, update: &mut species::ActiveModel) {
    let Some(icon) = icon else {
        update.icon_data = Set(None);
        update.icon_type = Set(0);
        return;
    };

    match path {
        "icon" => {
            update.icon_data = Set(Some(icon.data.clone()));
            update.icon_type = Set(icon.kind);
        }
        "icon.data" => update.icon_data = Set(Some(icon.data.clone())),
        "icon.type" => update.icon_type = Set(icon.kind),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_species() -> Species {
        Species {
            name: "feline".into(),
            display_name: "Cat".into(),
            request_castration_status: true,
            match_words: vec!["cat".into()],
            icon: Some(Icon { data: vec![7], kind: 1 }),
        }
    }

    fn sample_treatment() -> Treatment {
        Treatment {
            name: "vaccination".into(),
            display_name: "Vaccination".into(),
            help_text: String::new(),
            species: vec!["feline".into()],
            initial_time_requirement_ms: 600_000,
            additional_time_requirement_ms: 300_000,
            allowed_employees: vec!["emp-1".into()],
            preferred_employees: vec![],
            match_event_text: vec!["vaccination".into()],
            allow_self_booking: false,
            resources: vec![],
        }
    }

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn name_is_never_a_legal_path() {
        let err = species_update(&paths(&["name"]), &sample_species()).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));

        let err = treatment_update(&paths(&["display_name", "name"]), &sample_treatment())
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[test]
    fn unknown_path_is_reported_by_name() {
        let err = species_update(&paths(&["colour"]), &sample_species()).unwrap_err();
        let ServiceError::InvalidArgument(msg) = err else {
            panic!("expected invalid argument");
        };
        assert!(msg.contains("colour"), "unexpected message: {msg}");
    }

    #[test]
    fn empty_mask_updates_all_mutable_species_fields() {
        let update = species_update(&[], &sample_species()).unwrap();

        assert!(update.display_name.is_set());
        assert!(update.request_castration_status.is_set());
        assert!(update.match_words.is_set());
        assert!(update.icon_data.is_set());
        assert!(update.icon_type.is_set());
        // identity and bookkeeping stay untouched
        assert!(update.id.is_not_set());
        assert!(update.name.is_not_set());
    }

    #[test]
    fn empty_mask_updates_all_mutable_treatment_fields() {
        let update = treatment_update(&[], &sample_treatment()).unwrap();

        assert!(update.display_name.is_set());
        assert!(update.help_text.is_set());
        assert!(update.species.is_set());
        assert!(update.initial_time_requirement_ms.is_set());
        assert!(update.additional_time_requirement_ms.is_set());
        assert!(update.allowed_employees.is_set());
        assert!(update.preferred_employees.is_set());
        assert!(update.match_event_text.is_set());
        assert!(update.allow_self_booking.is_set());
        assert!(update.resources.is_set());
        assert!(update.name.is_not_set());
    }

    #[test]
    fn masked_update_touches_only_masked_columns() {
        let update = species_update(&paths(&["display_name"]), &sample_species()).unwrap();

        assert!(update.display_name.is_set());
        assert!(update.request_castration_status.is_not_set());
        assert!(update.match_words.is_not_set());
        assert!(update.icon_data.is_not_set());
        assert!(update.icon_type.is_not_set());
    }

    #[test]
    fn icon_parent_path_sets_both_columns() {
        let update = species_update(&paths(&["icon"]), &sample_species()).unwrap();
        assert_eq!(update.icon_data.clone().unwrap(), Some(vec![7]));
        assert_eq!(update.icon_type.clone().unwrap(), 1);
    }

    #[test]
    fn icon_parent_path_clears_both_columns_when_absent() {
        let mut replacement = sample_species();
        replacement.icon = None;

        let update = species_update(&paths(&["icon"]), &replacement).unwrap();
        assert_eq!(update.icon_data.clone().unwrap(), None);
        assert_eq!(update.icon_type.clone().unwrap(), 0);
    }

    #[test]
    fn icon_child_path_sets_only_its_column() {
        let update = species_update(&paths(&["icon.data"]), &sample_species()).unwrap();
        assert!(update.icon_data.is_set());
        assert!(update.icon_type.is_not_set());

        let update = species_update(&paths(&["icon.type"]), &sample_species()).unwrap();
        assert!(update.icon_data.is_not_set());
        assert!(update.icon_type.is_set());
    }

    #[test]
    fn icon_child_path_clears_both_columns_when_absent() {
        let mut replacement = sample_species();
        replacement.icon = None;

        for path in ["icon.data", "icon.type"] {
            let update = species_update(&paths(&[path]), &replacement).unwrap();
            assert_eq!(update.icon_data.clone().unwrap(), None);
            assert_eq!(update.icon_type.clone().unwrap(), 0);
        }
    }
}
