//! SeaORM adapter for the employees, contacts and emergency_contacts tables.

use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, JoinType, NotSet, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use crate::entities::{contacts, emergency_contacts, employees};
use crate::repos::employees::EmployeeView;

pub mod dto;

pub use dto::{ContactFields, EmergencyContactFields, EmployeeFields};

// Adapter functions return DbErr; repos and services map to DomainError.

/// Employees left-joined to both child tables, projected onto `EmployeeView` columns.
fn employee_view_select(backend: DbBackend) -> Select<employees::Entity> {
    let select = employees::Entity::find()
        .select_only()
        .column(employees::Column::Id)
        .column(employees::Column::Name)
        .column(employees::Column::Designation)
        .column(employees::Column::DateOfBirth);

    // SQLite hands whole-number decimals back as INTEGER; the decimal decoder wants REAL
    let select = match backend {
        DbBackend::Sqlite => select.column_as(
            Expr::col((employees::Entity, employees::Column::Salary)).cast_as(Alias::new("REAL")),
            "salary",
        ),
        _ => select.column(employees::Column::Salary),
    };

    select
        .column_as(contacts::Column::PhoneNumber, "phone_number")
        .column_as(contacts::Column::Email, "email")
        .column_as(contacts::Column::Address, "address")
        .column_as(contacts::Column::City, "city")
        .column_as(contacts::Column::State, "state")
        .column_as(emergency_contacts::Column::Name, "emergency_contact_name")
        .column_as(
            emergency_contacts::Column::PhoneNumber,
            "emergency_contact_phone",
        )
        .column_as(emergency_contacts::Column::Relationship, "relationship")
        .join(JoinType::LeftJoin, employees::Relation::Contact.def())
        .join(JoinType::LeftJoin, employees::Relation::EmergencyContact.def())
}

pub async fn list_views<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    offset: u64,
    limit: u64,
) -> Result<Vec<EmployeeView>, sea_orm::DbErr> {
    employee_view_select(conn.get_database_backend())
        .order_by_asc(employees::Column::Id)
        .offset(offset)
        .limit(limit)
        .into_model::<EmployeeView>()
        .all(conn)
        .await
}

pub async fn find_view<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    employee_id: i64,
) -> Result<Option<EmployeeView>, sea_orm::DbErr> {
    employee_view_select(conn.get_database_backend())
        .filter(employees::Column::Id.eq(employee_id))
        .into_model::<EmployeeView>()
        .one(conn)
        .await
}

/// Returns the generated employee id.
pub async fn insert_employee<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EmployeeFields,
) -> Result<i64, sea_orm::DbErr> {
    let employee = employees::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        designation: Set(dto.designation),
        date_of_birth: Set(dto.date_of_birth),
        salary: Set(dto.salary),
    };
    let result = employees::Entity::insert(employee).exec(conn).await?;
    Ok(result.last_insert_id)
}

pub async fn insert_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    employee_id: i64,
    dto: ContactFields,
) -> Result<i64, sea_orm::DbErr> {
    let contact = contacts::ActiveModel {
        id: NotSet,
        employee_id: Set(employee_id),
        phone_number: Set(dto.phone_number),
        email: Set(dto.email),
        address: Set(dto.address),
        city: Set(dto.city),
        state: Set(dto.state),
    };
    let result = contacts::Entity::insert(contact).exec(conn).await?;
    Ok(result.last_insert_id)
}

pub async fn insert_emergency_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    employee_id: i64,
    dto: EmergencyContactFields,
) -> Result<i64, sea_orm::DbErr> {
    let emergency = emergency_contacts::ActiveModel {
        id: NotSet,
        employee_id: Set(employee_id),
        name: Set(dto.name),
        phone_number: Set(dto.phone_number),
        relationship: Set(dto.relationship),
    };
    let result = emergency_contacts::Entity::insert(emergency)
        .exec(conn)
        .await?;
    Ok(result.last_insert_id)
}

/// Returns the number of rows updated (0 when the id does not exist).
pub async fn update_employee<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    employee_id: i64,
    dto: EmployeeFields,
) -> Result<u64, sea_orm::DbErr> {
    let result = employees::Entity::update_many()
        .col_expr(employees::Column::Name, Expr::value(dto.name))
        .col_expr(employees::Column::Designation, Expr::value(dto.designation))
        .col_expr(
            employees::Column::DateOfBirth,
            Expr::value(dto.date_of_birth),
        )
        .col_expr(employees::Column::Salary, Expr::value(dto.salary))
        .filter(employees::Column::Id.eq(employee_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn update_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    employee_id: i64,
    dto: ContactFields,
) -> Result<u64, sea_orm::DbErr> {
    let result = contacts::Entity::update_many()
        .col_expr(contacts::Column::PhoneNumber, Expr::value(dto.phone_number))
        .col_expr(contacts::Column::Email, Expr::value(dto.email))
        .col_expr(contacts::Column::Address, Expr::value(dto.address))
        .col_expr(contacts::Column::City, Expr::value(dto.city))
        .col_expr(contacts::Column::State, Expr::value(dto.state))
        .filter(contacts::Column::EmployeeId.eq(employee_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn update_emergency_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    employee_id: i64,
    dto: EmergencyContactFields,
) -> Result<u64, sea_orm::DbErr> {
    let result = emergency_contacts::Entity::update_many()
        .col_expr(emergency_contacts::Column::Name, Expr::value(dto.name))
        .col_expr(
            emergency_contacts::Column::PhoneNumber,
            Expr::value(dto.phone_number),
        )
        .col_expr(
            emergency_contacts::Column::Relationship,
            Expr::value(dto.relationship),
        )
        .filter(emergency_contacts::Column::EmployeeId.eq(employee_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Returns the number of rows deleted (0 when the id does not exist).
pub async fn delete_employee<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    employee_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = employees::Entity::delete_many()
        .filter(employees::Column::Id.eq(employee_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_contacts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    employee_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = contacts::Entity::delete_many()
        .filter(contacts::Column::EmployeeId.eq(employee_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_emergency_contacts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    employee_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = emergency_contacts::Entity::delete_many()
        .filter(emergency_contacts::Column::EmployeeId.eq(employee_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
