//! `SeaORM` implementation of the `CatalogService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::{self, ConstraintViolation, NewFactorHecho, Store};
use crate::entities::{factor, factor_hecho, hecho};
use crate::services::catalog_service::{CatalogError, CatalogService, FactorValues, NewCondition};

pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn storage_error(err: &anyhow::Error) -> CatalogError {
    match db::constraint_violation(err) {
        Some(ConstraintViolation::ForeignKey) => {
            let detail = format!("{err:#}");
            warn!(error = %detail, "Foreign key rejected condition insert");
            CatalogError::Validation(
                "factor_id and hecho_id must reference existing rows".to_string(),
            )
        }
        _ => CatalogError::Database(format!("{err:#}")),
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn create_factor(
        &self,
        nombre: String,
        categoria: String,
    ) -> Result<factor::Model, CatalogError> {
        let factor = self
            .store
            .create_factor(nombre, categoria)
            .await
            .map_err(|e| storage_error(&e))?;

        info!(factor_id = factor.id, "Factor created");
        Ok(factor)
    }

    async fn create_hecho(&self, descripcion: String) -> Result<hecho::Model, CatalogError> {
        let hecho = self
            .store
            .create_hecho(descripcion)
            .await
            .map_err(|e| storage_error(&e))?;

        info!(hecho_id = hecho.id, "Hecho created");
        Ok(hecho)
    }

    async fn create_condition(
        &self,
        input: NewCondition,
    ) -> Result<factor_hecho::Model, CatalogError> {
        let condition = self
            .store
            .create_factor_hecho(NewFactorHecho {
                factor_id: input.factor_id,
                hecho_id: input.hecho_id,
                operador: input.operador,
                valor: input.valor,
            })
            .await
            .map_err(|e| storage_error(&e))?;

        info!(
            factor_hecho_id = condition.id,
            factor_id = condition.factor_id,
            hecho_id = condition.hecho_id,
            "Condition created"
        );
        Ok(condition)
    }

    async fn factors_with_values(&self) -> Result<Vec<FactorValues>, CatalogError> {
        let rows = self
            .store
            .list_factors_with_values()
            .await
            .map_err(|e| storage_error(&e))?;

        Ok(rows
            .into_iter()
            .map(|(factor, conditions)| FactorValues { factor, conditions })
            .collect())
    }
}
