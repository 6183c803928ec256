//! Database migrations for property service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_property").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250315_000001_create_properties::Migration),
            Box::new(m20250315_000002_create_leases::Migration),
        ]
    }
}

fn timestamp(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

mod m20250315_000001_create_properties {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250315_000001_create_properties"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Properties::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Properties::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Properties::Title).string().not_null())
                        .col(
                            ColumnDef::new(Properties::Description)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Properties::PropertyType)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Properties::Address).string().not_null())
                        .col(ColumnDef::new(Properties::City).string_len(128).not_null())
                        .col(ColumnDef::new(Properties::State).string_len(128).not_null())
                        .col(timestamp(Properties::CreatedAt))
                        .col(timestamp(Properties::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_properties_city")
                        .table(Properties::Table)
                        .col(Properties::City)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Units::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Units::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Units::PropertyId).uuid().not_null())
                        .col(ColumnDef::new(Units::Label).string_len(64).not_null())
                        .col(ColumnDef::new(Units::Bedrooms).integer().not_null().default(0))
                        .col(ColumnDef::new(Units::Bathrooms).integer().not_null().default(0))
                        .col(
                            ColumnDef::new(Units::MonthlyRent)
                                .decimal_len(16, 4)
                                .not_null(),
                        )
                        .col(timestamp(Units::CreatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_units_property")
                                .from(Units::Table, Units::PropertyId)
                                .to(Properties::Table, Properties::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_units_property_id")
                        .table(Units::Table)
                        .col(Units::PropertyId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Units::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Properties::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Properties {
        Table,
        Id,
        Title,
        Description,
        PropertyType,
        Address,
        City,
        State,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Units {
        Table,
        Id,
        PropertyId,
        Label,
        Bedrooms,
        Bathrooms,
        MonthlyRent,
        CreatedAt,
    }
}

mod m20250315_000002_create_leases {
    use super::m20250315_000001_create_properties::Units;
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250315_000002_create_leases"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Leases::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Leases::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Leases::UnitId).uuid().not_null())
                        .col(ColumnDef::new(Leases::TenantName).string().not_null())
                        .col(ColumnDef::new(Leases::TenantEmail).string().not_null())
                        .col(ColumnDef::new(Leases::StartDate).date().not_null())
                        .col(ColumnDef::new(Leases::EndDate).date().not_null())
                        .col(
                            ColumnDef::new(Leases::MonthlyRent)
                                .decimal_len(16, 4)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Leases::Status)
                                .string_len(16)
                                .not_null()
                                .default("ACTIVE"),
                        )
                        .col(timestamp(Leases::CreatedAt))
                        .col(timestamp(Leases::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_leases_unit")
                                .from(Leases::Table, Leases::UnitId)
                                .to(Units::Table, Units::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            for (name, col) in [
                ("idx_leases_unit_id", Leases::UnitId),
                ("idx_leases_status", Leases::Status),
            ] {
                manager
                    .create_index(
                        Index::create()
                            .name(name)
                            .table(Leases::Table)
                            .col(col)
                            .to_owned(),
                    )
                    .await?;
            }

            // At most one ACTIVE lease per unit; both Postgres and SQLite accept partial indexes
            manager
                .get_connection()
                .execute_unprepared(
                    "CREATE UNIQUE INDEX IF NOT EXISTS idx_leases_one_active \
                     ON leases (unit_id) WHERE status = 'ACTIVE'",
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Leases::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Leases {
        Table,
        Id,
        UnitId,
        TenantName,
        TenantEmail,
        StartDate,
        EndDate,
        MonthlyRent,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}
