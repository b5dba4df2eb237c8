use crate::entities::{factor, factor_hecho, hecho, prelude::*};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryOrder, Set,
    TransactionTrait,
};

pub struct NewFactorHecho {
    pub factor_id: i32,
    pub hecho_id: i32,
    pub operador: String,
    pub valor: String,
}

/// Factors, facts and the rule conditions linking them.
pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create_factor(&self, nombre: String, categoria: String) -> Result<factor::Model> {
        let txn = self.conn.begin().await?;

        let inserted = factor::ActiveModel {
            nombre: Set(nombre),
            categoria: Set(categoria),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        match inserted {
            Ok(model) => {
                txn.commit().await?;
                Ok(model)
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e).context("Failed to insert factor")
            }
        }
    }

    pub async fn create_hecho(&self, descripcion: String) -> Result<hecho::Model> {
        let txn = self.conn.begin().await?;

        let inserted = hecho::ActiveModel {
            descripcion: Set(descripcion),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        match inserted {
            Ok(model) => {
                txn.commit().await?;
                Ok(model)
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e).context("Failed to insert hecho")
            }
        }
    }

    /// Inserts a rule condition. Foreign keys are enforced by the database.
    pub async fn create_factor_hecho(&self, input: NewFactorHecho) -> Result<factor_hecho::Model> {
        let txn = self.conn.begin().await?;

        let inserted = factor_hecho::ActiveModel {
            factor_id: Set(input.factor_id),
            hecho_id: Set(input.hecho_id),
            operador: Set(input.operador),
            valor: Set(input.valor),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        match inserted {
            Ok(model) => {
                txn.commit().await?;
                Ok(model)
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e).context("Failed to insert factor_hecho")
            }
        }
    }

    /// Every factor with its rule conditions, factors ordered by name (then id),
    /// conditions ordered by id. Factors without conditions get an empty list.
    pub async fn list_factors_with_values(
        &self,
    ) -> Result<Vec<(factor::Model, Vec<factor_hecho::Model>)>> {
        let factors = Factor::find()
            .order_by_asc(factor::Column::Nombre)
            .order_by_asc(factor::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list factors")?;

        let conditions = factors
            .load_many(
                FactorHecho::find().order_by_asc(factor_hecho::Column::Id),
                &self.conn,
            )
            .await
            .context("Failed to load factor conditions")?;

        Ok(factors
            .into_iter()
            .zip(conditions)
            .map(|(f, mut values)| {
                values.sort_by_key(|v| v.id);
                (f, values)
            })
            .collect())
    }
}
