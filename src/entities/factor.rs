use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "factor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub nombre: String,

    pub categoria: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::factor_hecho::Entity")]
    Condiciones,
}

impl Related<super::factor_hecho::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Condiciones.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
