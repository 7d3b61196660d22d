use employees_api::entities::{Contacts, EmergencyContacts};
use employees_api::errors::domain::DomainError;
use employees_api::repos::employees::get_employee;
use employees_api::services::employees::{
    create_employee, delete_employee, update_employee, EmployeeInput, MISSING_FIELDS_DETAIL,
};
use employees_api::AppError;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use crate::support::build_test_state;
use crate::support::db_counts::table_counts;
use crate::support::factory::employee_input;

#[tokio::test]
async fn test_create_writes_all_three_rows() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;

    let id = create_employee(&state, employee_input("Ann")).await?;
    assert_eq!(table_counts(&state).await?, (1, 1, 1));

    let db = state.db().expect("test state has a db");
    let contacts = Contacts::find()
        .filter(employees_api::entities::contacts::Column::EmployeeId.eq(id))
        .count(db)
        .await?;
    let emergency = EmergencyContacts::find()
        .filter(employees_api::entities::emergency_contacts::Column::EmployeeId.eq(id))
        .count(db)
        .await?;
    assert_eq!((contacts, emergency), (1, 1));
    Ok(())
}

#[tokio::test]
async fn test_create_returns_increasing_ids() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;

    let first = create_employee(&state, employee_input("Ann")).await?;
    let second = create_employee(&state, employee_input("Bea")).await?;
    assert!(second > first);
    Ok(())
}

#[tokio::test]
async fn test_create_validation_failure_writes_nothing() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;

    let input = EmployeeInput {
        salary: None,
        ..employee_input("Ann")
    };
    let err = create_employee(&state, input).await.unwrap_err();
    match err {
        AppError::Validation { detail, .. } => assert_eq!(detail, MISSING_FIELDS_DETAIL),
        other => panic!("expected validation error, got {other:?}"),
    }

    assert_eq!(table_counts(&state).await?, (0, 0, 0));
    Ok(())
}

#[tokio::test]
async fn test_create_rolls_back_when_child_insert_fails() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;

    let mut input = employee_input("Ann");
    input.emergency.name = None;

    let err = create_employee(&state, input).await.unwrap_err();
    assert!(matches!(err, AppError::Db { .. }), "got {err:?}");
    assert_eq!(table_counts(&state).await?, (0, 0, 0));
    Ok(())
}

#[tokio::test]
async fn test_update_replaces_fields() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let id = create_employee(&state, employee_input("Ann")).await?;

    let mut input = employee_input("Ann Smith");
    input.salary = Some(Decimal::new(7_250_050, 2));
    input.contact.email = Some("ann@corp.example".to_string());
    input.emergency.phone_number = Some("555-9999".to_string());
    update_employee(&state, id, input).await?;

    let db = state.db().expect("test state has a db");
    let view = get_employee(db, id).await?;
    assert_eq!(view.name, "Ann Smith");
    assert_eq!(view.salary, Decimal::new(7_250_050, 2));
    assert_eq!(view.email.as_deref(), Some("ann@corp.example"));
    assert_eq!(view.emergency_contact_phone.as_deref(), Some("555-9999"));
    assert_eq!(table_counts(&state).await?, (1, 1, 1));
    Ok(())
}

#[tokio::test]
async fn test_update_missing_employee_touches_nothing() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let id = create_employee(&state, employee_input("Ann")).await?;

    let err = update_employee(&state, id + 100, employee_input("Ghost"))
        .await
        .unwrap_err();
    match err {
        AppError::NotFound { detail, .. } => {
            assert_eq!(detail, format!("Employee {} not found", id + 100))
        }
        other => panic!("expected not found, got {other:?}"),
    }

    let db = state.db().expect("test state has a db");
    let view = get_employee(db, id).await?;
    assert_eq!(view.name, "Ann");
    assert_eq!(table_counts(&state).await?, (1, 1, 1));
    Ok(())
}

#[tokio::test]
async fn test_update_rolls_back_when_child_update_fails() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let id = create_employee(&state, employee_input("Ann")).await?;

    // emergency_contacts.relationship is NOT NULL; the employees row is already updated by then
    let mut input = employee_input("Ann Smith");
    input.emergency.relationship = None;

    let err = update_employee(&state, id, input).await.unwrap_err();
    assert!(matches!(err, AppError::Db { .. }), "got {err:?}");

    let db = state.db().expect("test state has a db");
    let view = get_employee(db, id).await?;
    assert_eq!(view.name, "Ann");
    assert_eq!(view.relationship.as_deref(), Some("Brother"));
    assert_eq!(table_counts(&state).await?, (1, 1, 1));
    Ok(())
}

#[tokio::test]
async fn test_delete_cascades_and_then_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let id = create_employee(&state, employee_input("Ann")).await?;

    delete_employee(&state, id).await?;
    assert_eq!(table_counts(&state).await?, (0, 0, 0));

    let db = state.db().expect("test state has a db");
    assert_eq!(
        get_employee(db, id).await.unwrap_err(),
        DomainError::employee_not_found(id)
    );

    let err = delete_employee(&state, id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    Ok(())
}
