//! Domain service for the rule base: factors, facts (hechos) and the
//! conditions that link them.
//!
//! Storage only. Nothing here evaluates `operador`/`valor` against input.

use thiserror::Error;

use crate::entities::{factor, factor_hecho, hecho};

/// Errors specific to rule-base operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

#[derive(Debug, Clone)]
pub struct NewCondition {
    pub factor_id: i32,
    pub hecho_id: i32,
    pub operador: String,
    pub valor: String,
}

/// A factor with the values of the conditions that reference it.
#[derive(Debug, Clone)]
pub struct FactorValues {
    pub factor: factor::Model,
    pub conditions: Vec<factor_hecho::Model>,
}

/// Domain service trait for the rule base.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    async fn create_factor(
        &self,
        nombre: String,
        categoria: String,
    ) -> Result<factor::Model, CatalogError>;

    async fn create_hecho(&self, descripcion: String) -> Result<hecho::Model, CatalogError>;

    /// Links a factor to a fact.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when `factor_id` or `hecho_id` does
    /// not reference an existing row.
    async fn create_condition(
        &self,
        input: NewCondition,
    ) -> Result<factor_hecho::Model, CatalogError>;

    /// Every factor with its conditions, ordered by factor name then condition id.
    async fn factors_with_values(&self) -> Result<Vec<FactorValues>, CatalogError>;
}
