//! Treatment operations. Creates and updates validate the employee subset
//! rule and the species references inside the governing transaction.

use chrono::Utc;
use models::treatment::{self, validate_employees, Treatment};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IsolationLevel, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use crate::errors::ServiceError;
use crate::species::validate_species_exist;
use crate::store::CatalogStore;
use crate::update_mask;

impl CatalogStore {
    /// Persist a new treatment. Zero time requirements are replaced by the
    /// configured defaults; species references are validated inside the
    /// same transaction as the insert. The transaction runs serializable so
    /// the check cannot race a concurrent species delete.
    pub async fn create_treatment(&self, treatment: Treatment) -> Result<Treatment, ServiceError> {
        validate_employees(&treatment.allowed_employees, &treatment.preferred_employees)?;

        let mut treatment = treatment;
        if treatment.initial_time_requirement_ms == 0 {
            treatment.initial_time_requirement_ms = self.defaults.initial_time_requirement_ms;
        }
        if treatment.additional_time_requirement_ms == 0 {
            treatment.additional_time_requirement_ms = self.defaults.additional_time_requirement_ms;
        }

        let created = self
            .db
            .transaction_with_config::<_, treatment::Model, ServiceError>(
                move |txn| {
                    Box::pin(async move {
                        if !treatment.species.is_empty() {
                            validate_species_exist(txn, &treatment.species).await?;
                        }

                        let name = treatment.name.clone();
                        treatment
                            .into_active_model()
                            .insert(txn)
                            .await
                            .map_err(|err| ServiceError::from_insert("treatment", &name, err))
                    })
                },
                Some(IsolationLevel::Serializable),
                None,
            )
            .await
            .map_err(ServiceError::from)?;

        Ok(created.into_api())
    }

    pub async fn get_treatment(&self, name: &str) -> Result<Treatment, ServiceError> {
        let row = treatment::Entity::find()
            .filter(treatment::Column::Name.eq(name))
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("treatment", name))?;

        Ok(row.into_api())
    }

    pub async fn list_treatments(&self) -> Result<Vec<Treatment>, ServiceError> {
        let rows = treatment::Entity::find()
            .order_by_asc(treatment::Column::CreatedAt)
            .order_by_asc(treatment::Column::Name)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(treatment::Model::into_api).collect())
    }

    /// Filter the full treatment list by an optional species set (any
    /// intersection matches) and an optional display-name search text
    /// (containment against the treatment's match vocabulary). Filters
    /// combine with AND. Filtering happens in memory over the full catalog.
    pub async fn query_treatments(
        &self,
        species: &[String],
        display_name_search: &str,
    ) -> Result<Vec<Treatment>, ServiceError> {
        let all = self.list_treatments().await?;
        let needle = display_name_search.to_lowercase();

        Ok(all
            .into_iter()
            .filter(|treatment| {
                if !species.is_empty()
                    && !treatment.species.iter().any(|s| species.contains(s))
                {
                    return false;
                }

                if !needle.is_empty()
                    && !treatment
                        .match_event_text
                        .iter()
                        .any(|m| needle.contains(&m.to_lowercase()))
                {
                    return false;
                }

                true
            })
            .collect())
    }

    /// Apply a field-mask driven partial update and return the post-update
    /// treatment. The post-update document is re-validated (employee subset
    /// rule and species references) inside the transaction; a violation
    /// rolls the update back. Serializable, like create, so the species
    /// check cannot race a concurrent delete.
    pub async fn update_treatment(
        &self,
        name: &str,
        replacement: Treatment,
        mask: &[String],
    ) -> Result<Treatment, ServiceError> {
        let mut update = update_mask::treatment_update(mask, &replacement)?;
        update.updated_at = Set(Utc::now().into());

        let name = name.to_string();
        self.db
            .transaction_with_config::<_, Treatment, ServiceError>(
                move |txn| {
                    Box::pin(async move {
                        let current = treatment::Entity::find()
                            .filter(treatment::Column::Name.eq(name.as_str()))
                            .one(txn)
                            .await?
                            .ok_or_else(|| ServiceError::not_found("treatment", &name))?;

                        update.id = Set(current.id);
                        let updated = update
                            .update(txn)
                            .await
                            .map_err(|err| match err {
                                DbErr::RecordNotUpdated => {
                                    ServiceError::not_found("treatment", &name)
                                }
                                other => other.into(),
                            })?
                            .into_api();

                        validate_employees(
                            &updated.allowed_employees,
                            &updated.preferred_employees,
                        )?;
                        if !updated.species.is_empty() {
                            validate_species_exist(txn, &updated.species).await?;
                        }

                        Ok(updated)
                    })
                },
                Some(IsolationLevel::Serializable),
                None,
            )
            .await
            .map_err(ServiceError::from)
    }

    /// Direct single-row delete; no cascade.
    pub async fn delete_treatment(&self, name: &str) -> Result<(), ServiceError> {
        let deleted = treatment::Entity::delete_many()
            .filter(treatment::Column::Name.eq(name))
            .exec(&self.db)
            .await?;

        if deleted.rows_affected == 0 {
            return Err(ServiceError::not_found("treatment", name));
        }

        Ok(())
    }
}
