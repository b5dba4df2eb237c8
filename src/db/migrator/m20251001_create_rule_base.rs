use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Factor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Factor::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Factor::Nombre).string().not_null())
                    .col(ColumnDef::new(Factor::Categoria).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Hecho::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hecho::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Hecho::Descripcion).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FactorHecho::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FactorHecho::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FactorHecho::FactorId).integer().not_null())
                    .col(ColumnDef::new(FactorHecho::HechoId).integer().not_null())
                    .col(ColumnDef::new(FactorHecho::Operador).string().not_null())
                    .col(ColumnDef::new(FactorHecho::Valor).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_factor_hecho_factor_id")
                            .from(FactorHecho::Table, FactorHecho::FactorId)
                            .to(Factor::Table, Factor::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_factor_hecho_hecho_id")
                            .from(FactorHecho::Table, FactorHecho::HechoId)
                            .to(Hecho::Table, Hecho::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_factor_hecho_factor_id")
                    .table(FactorHecho::Table)
                    .col(FactorHecho::FactorId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FactorHecho::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hecho::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Factor::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Factor {
    Table,
    Id,
    Nombre,
    Categoria,
}

#[derive(DeriveIden)]
enum Hecho {
    Table,
    Id,
    Descripcion,
}

#[derive(DeriveIden)]
enum FactorHecho {
    Table,
    Id,
    FactorId,
    HechoId,
    Operador,
    Valor,
}
