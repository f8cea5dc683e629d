//! Species operations, including the transactional cascading delete.

use std::collections::HashSet;

use chrono::Utc;
use models::species::{self, Species};
use models::treatment;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::detect;
use crate::errors::ServiceError;
use crate::store::CatalogStore;
use crate::update_mask;

impl CatalogStore {
    /// Persist a new species. An empty display name falls back to the
    /// species name; a duplicate name is an already-exists condition.
    pub async fn create_species(&self, species: Species) -> Result<Species, ServiceError> {
        let name = species.name.clone();
        let created = species
            .into_active_model()
            .insert(&self.db)
            .await
            .map_err(|err| ServiceError::from_insert("species", &name, err))?;

        Ok(created.into_api())
    }

    pub async fn get_species(&self, name: &str) -> Result<Species, ServiceError> {
        let row = species::Entity::find()
            .filter(species::Column::Name.eq(name))
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("species", name))?;

        Ok(row.into_api())
    }

    /// List the catalog in insertion order, optionally restricted to a set
    /// of names.
    pub async fn list_species(&self, names: &[String]) -> Result<Vec<Species>, ServiceError> {
        let mut query = species::Entity::find();
        if !names.is_empty() {
            query = query.filter(species::Column::Name.is_in(names.iter().cloned()));
        }

        let rows = query
            .order_by_asc(species::Column::CreatedAt)
            .order_by_asc(species::Column::Name)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(species::Model::into_api).collect())
    }

    /// Apply a field-mask driven partial update and return the post-update
    /// species. An empty mask updates all mutable fields.
    pub async fn update_species(
        &self,
        name: &str,
        replacement: Species,
        mask: &[String],
    ) -> Result<Species, ServiceError> {
        let mut update = update_mask::species_update(mask, &replacement)?;
        update.updated_at = Set(Utc::now().into());

        let name = name.to_string();
        let updated = self
            .db
            .transaction::<_, species::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let current = species::Entity::find()
                        .filter(species::Column::Name.eq(name.as_str()))
                        .one(txn)
                        .await?
                        .ok_or_else(|| ServiceError::not_found("species", &name))?;

                    update.id = Set(current.id);
                    update.update(txn).await.map_err(|err| match err {
                        DbErr::RecordNotUpdated => ServiceError::not_found("species", &name),
                        other => other.into(),
                    })
                })
            })
            .await
            .map_err(ServiceError::from)?;

        Ok(updated.into_api())
    }

    /// Delete a species and cascade over the treatments referencing it, all
    /// inside one transaction:
    ///
    /// 1. delete every treatment whose species set would become empty,
    /// 2. strip the name from the species set of all remaining treatments,
    /// 3. delete the species row itself.
    ///
    /// The ordering guarantees no treatment is ever observed with an empty
    /// species set and no treatment transiently references a deleted
    /// species. Count mismatches abort the whole transaction. Serializable
    /// isolation pairs with the create/update species check on the
    /// treatment side, so neither can slip past the other.
    pub async fn delete_species(&self, name: &str) -> Result<(), ServiceError> {
        let name = name.to_string();
        self.db
            .transaction_with_config::<_, (), ServiceError>(
                move |txn| {
                    Box::pin(async move {
                        // treatments that only reference the species being removed
                        let orphaned: Vec<Uuid> = treatment::Entity::find()
                            .filter(treatment::Column::Species.eq(vec![name.clone()]))
                            .all(txn)
                            .await?
                            .into_iter()
                            .map(|row| row.id)
                            .collect();

                        if !orphaned.is_empty() {
                            let deleted = treatment::Entity::delete_many()
                                .filter(treatment::Column::Id.is_in(orphaned.iter().copied()))
                                .exec(txn)
                                .await?;

                            if deleted.rows_affected != orphaned.len() as u64 {
                                return Err(ServiceError::Internal(format!(
                                    "expected to delete {} treatments, deleted {}",
                                    orphaned.len(),
                                    deleted.rows_affected
                                )));
                            }

                            debug!(
                                species = %name,
                                count = orphaned.len(),
                                "deleted treatments that would have lost their last species"
                            );
                        }

                        // strip the name from every remaining treatment
                        txn.execute(Statement::from_sql_and_values(
                            DbBackend::Postgres,
                            r#"UPDATE "treatment" SET "species" = array_remove("species", $1) WHERE $1 = ANY("species")"#,
                            [name.clone().into()],
                        ))
                        .await?;

                        // nothing references the species anymore
                        let deleted = species::Entity::delete_many()
                            .filter(species::Column::Name.eq(name.as_str()))
                            .exec(txn)
                            .await?;

                        match deleted.rows_affected {
                            1 => Ok(()),
                            0 => Err(ServiceError::not_found("species", &name)),
                            n => Err(ServiceError::Internal(format!(
                                "expected to delete one species row, deleted {n}"
                            ))),
                        }
                    })
                },
                Some(IsolationLevel::Serializable),
                None,
            )
            .await
            .map_err(ServiceError::from)
    }

    /// Detect which species a list of free-text values most likely refers
    /// to. See [`detect::rank_candidates`] for the heuristic.
    pub async fn detect_species(&self, values: &[String]) -> Result<Vec<Species>, ServiceError> {
        let catalog = self.list_species(&[]).await?;
        Ok(detect::rank_candidates(catalog, values))
    }
}

/// Bulk existence check for species references. Runs on the caller's
/// transaction connection so a concurrent species delete cannot race the
/// treatment write into an inconsistent state. The first missing name (in
/// input order) is reported.
pub(crate) async fn validate_species_exist<C: ConnectionTrait>(
    conn: &C,
    names: &[String],
) -> Result<(), ServiceError> {
    let found: HashSet<String> = species::Entity::find()
        .filter(species::Column::Name.is_in(names.iter().cloned()))
        .all(conn)
        .await?
        .into_iter()
        .map(|row| row.name)
        .collect();

    for name in names {
        if !found.contains(name) {
            return Err(ServiceError::InvalidArgument(format!(
                "species {name:?} not found"
            )));
        }
    }

    Ok(())
}
