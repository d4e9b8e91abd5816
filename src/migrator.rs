use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_locations_table::Migration),
            Box::new(m20240101_000002_create_machines_table::Migration),
            Box::new(m20240101_000003_create_items_table::Migration),
            Box::new(m20240101_000004_create_machine_items_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_locations_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_locations_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Locations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Locations::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Locations::Location).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Locations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Locations {
        Table,
        Id,
        Location,
    }
}

mod m20240101_000002_create_machines_table {

    use super::m20240101_000001_create_locations_table::Locations;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_machines_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Machines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Machines::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Machines::Coordinate).string().not_null())
                        .col(ColumnDef::new(Machines::Status).boolean().not_null())
                        .col(ColumnDef::new(Machines::Brbs).boolean().not_null())
                        .col(ColumnDef::new(Machines::Itemtype).string().not_null())
                        .col(ColumnDef::new(Machines::LocationId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_machines_location_id")
                                .from(Machines::Table, Machines::LocationId)
                                .to(Locations::Table, Locations::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_machines_location_id")
                        .table(Machines::Table)
                        .col(Machines::LocationId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Machines::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Machines {
        Table,
        Id,
        Coordinate,
        Status,
        Brbs,
        Itemtype,
        LocationId,
    }
}

mod m20240101_000003_create_items_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Items::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Items::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Items::Name).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Items::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Items {
        Table,
        Id,
        Name,
    }
}

mod m20240101_000004_create_machine_items_table {

    use super::m20240101_000002_create_machines_table::Machines;
    use super::m20240101_000003_create_items_table::Items;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_machine_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Composite key keeps each (machine, item) link unique
            manager
                .create_table(
                    Table::create()
                        .table(MachineItems::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(MachineItems::MachineId).integer().not_null())
                        .col(ColumnDef::new(MachineItems::ItemId).integer().not_null())
                        .primary_key(
                            Index::create()
                                .name("pk_machine_items")
                                .col(MachineItems::MachineId)
                                .col(MachineItems::ItemId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_machine_items_machine_id")
                                .from(MachineItems::Table, MachineItems::MachineId)
                                .to(Machines::Table, Machines::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_machine_items_item_id")
                                .from(MachineItems::Table, MachineItems::ItemId)
                                .to(Items::Table, Items::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_machine_items_item_id")
                        .table(MachineItems::Table)
                        .col(MachineItems::ItemId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MachineItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum MachineItems {
        Table,
        MachineId,
        ItemId,
    }
}
