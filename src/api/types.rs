use serde::{Deserialize, Serialize};

use crate::db::User;
use crate::entities::{factor, factor_hecho, hecho};
use crate::services::FactorValues;

/// Envelope for every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FactorCreate {
    pub nombre: String,
    pub categoria: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FactorDto {
    pub id: i32,
    pub nombre: String,
    pub categoria: String,
}

impl From<factor::Model> for FactorDto {
    fn from(model: factor::Model) -> Self {
        Self {
            id: model.id,
            nombre: model.nombre,
            categoria: model.categoria,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HechoCreate {
    pub descripcion: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HechoDto {
    pub id: i32,
    pub descripcion: String,
}

impl From<hecho::Model> for HechoDto {
    fn from(model: hecho::Model) -> Self {
        Self {
            id: model.id,
            descripcion: model.descripcion,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FactorHechoCreate {
    pub factor_id: i32,
    pub hecho_id: i32,
    pub operador: String,
    pub valor: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FactorHechoDto {
    pub id: i32,
    pub factor_id: i32,
    pub hecho_id: i32,
    pub operador: String,
    pub valor: String,
}

impl From<factor_hecho::Model> for FactorHechoDto {
    fn from(model: factor_hecho::Model) -> Self {
        Self {
            id: model.id,
            factor_id: model.factor_id,
            hecho_id: model.hecho_id,
            operador: model.operador,
            valor: model.valor,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FactorValueItem {
    pub factor_hecho_id: i32,
    pub valor: String,
}

/// One entry of `GET /factors-values`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FactorValuesDto {
    pub factor_id: i32,
    pub nombre: String,
    pub categoria: String,
    pub valores: Vec<FactorValueItem>,
}

impl From<FactorValues> for FactorValuesDto {
    fn from(entry: FactorValues) -> Self {
        Self {
            factor_id: entry.factor.id,
            nombre: entry.factor.nombre,
            categoria: entry.factor.categoria,
            valores: entry
                .conditions
                .into_iter()
                .map(|c| FactorValueItem {
                    factor_hecho_id: c.id,
                    valor: c.valor,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial update body; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

/// Public view of a user. There is no password field to leak.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserRead {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_active: bool,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub db: String,
}

impl HealthResponse {
    #[must_use]
    pub fn up() -> Self {
        Self {
            ok: true,
            db: "up".to_string(),
        }
    }

    #[must_use]
    pub fn down() -> Self {
        Self {
            ok: false,
            db: "down".to_string(),
        }
    }
}
