use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Employees {
    Table,
    Id,
    Name,
    Designation,
    DateOfBirth,
    Salary,
}

#[derive(Iden)]
enum Contacts {
    Table,
    Id,
    EmployeeId,
    PhoneNumber,
    Email,
    Address,
    City,
    State,
}

#[derive(Iden)]
enum EmergencyContacts {
    Table,
    Id,
    EmployeeId,
    Name,
    PhoneNumber,
    Relationship,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // employees
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Employees::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Employees::Designation)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::DateOfBirth).date().not_null())
                    .col(
                        ColumnDef::new(Employees::Salary)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // contacts
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contacts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Contacts::EmployeeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Contacts::PhoneNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contacts::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Contacts::Address).string_len(255).not_null())
                    .col(ColumnDef::new(Contacts::City).string_len(100).not_null())
                    .col(ColumnDef::new(Contacts::State).string_len(100).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contacts_employee_id")
                            .from(Contacts::Table, Contacts::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one contact row per employee
        manager
            .create_index(
                Index::create()
                    .name("ux_contacts_employee_id")
                    .table(Contacts::Table)
                    .col(Contacts::EmployeeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // emergency_contacts
        manager
            .create_table(
                Table::create()
                    .table(EmergencyContacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmergencyContacts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::EmployeeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::PhoneNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyContacts::Relationship)
                            .string_len(100)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emergency_contacts_employee_id")
                            .from(EmergencyContacts::Table, EmergencyContacts::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_emergency_contacts_employee_id")
                    .table(EmergencyContacts::Table)
                    .col(EmergencyContacts::EmployeeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_emergency_contacts_employee_id")
                    .table(EmergencyContacts::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EmergencyContacts::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_contacts_employee_id")
                    .table(Contacts::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;

        Ok(())
    }
}
