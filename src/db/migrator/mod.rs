use sea_orm_migration::prelude::*;

mod m20251001_create_rule_base;
mod m20251020_create_usuario;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_create_rule_base::Migration),
            Box::new(m20251020_create_usuario::Migration),
        ]
    }
}
