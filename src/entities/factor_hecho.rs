use sea_orm::entity::prelude::*;

/// A rule condition: `factor <operador> valor` supports `hecho`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "factor_hecho")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub factor_id: i32,
    pub hecho_id: i32,
    pub operador: String,
    pub valor: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::factor::Entity",
        from = "Column::FactorId",
        to = "super::factor::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Factor,

    #[sea_orm(
        belongs_to = "super::hecho::Entity",
        from = "Column::HechoId",
        to = "super::hecho::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Hecho,
}

impl Related<super::factor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Factor.def()
    }
}

impl Related<super::hecho::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hecho.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
