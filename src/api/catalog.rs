//! Rule-base endpoints: factors, facts and the conditions linking them.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::{
    ApiError, AppState, FactorCreate, FactorDto, FactorHechoCreate, FactorHechoDto,
    FactorValuesDto, HechoCreate, HechoDto,
};
use crate::api::validation::{validate_reference_id, validate_required};
use crate::services::{CatalogError, NewCondition};

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => Self::validation(msg),
            CatalogError::Database(msg) => Self::DatabaseError(msg),
            CatalogError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// `POST /factores/`
pub async fn create_factor(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FactorCreate>, JsonRejection>,
) -> Result<Json<FactorDto>, ApiError> {
    let Json(payload) = payload?;
    validate_required("nombre", &payload.nombre)?;
    validate_required("categoria", &payload.categoria)?;

    let factor = state
        .catalog_service()
        .create_factor(payload.nombre, payload.categoria)
        .await?;

    Ok(Json(FactorDto::from(factor)))
}

/// `POST /hechos/`
pub async fn create_hecho(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<HechoCreate>, JsonRejection>,
) -> Result<Json<HechoDto>, ApiError> {
    let Json(payload) = payload?;
    validate_required("descripcion", &payload.descripcion)?;

    let hecho = state
        .catalog_service()
        .create_hecho(payload.descripcion)
        .await?;

    Ok(Json(HechoDto::from(hecho)))
}

/// `POST /reglas/`
///
/// Dangling `factor_id`/`hecho_id` references come back as a 422.
pub async fn create_regla(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FactorHechoCreate>, JsonRejection>,
) -> Result<Json<FactorHechoDto>, ApiError> {
    let Json(payload) = payload?;
    validate_reference_id("factor_id", payload.factor_id)?;
    validate_reference_id("hecho_id", payload.hecho_id)?;
    validate_required("operador", &payload.operador)?;
    validate_required("valor", &payload.valor)?;

    let condition = state
        .catalog_service()
        .create_condition(NewCondition {
            factor_id: payload.factor_id,
            hecho_id: payload.hecho_id,
            operador: payload.operador,
            valor: payload.valor,
        })
        .await?;

    Ok(Json(FactorHechoDto::from(condition)))
}

/// `GET /factors-values`
pub async fn factors_values(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FactorValuesDto>>, ApiError> {
    let entries = state.catalog_service().factors_with_values().await?;

    Ok(Json(
        entries.into_iter().map(FactorValuesDto::from).collect(),
    ))
}
