//! Transactional writer for employees and their contact rows.
//!
//! Every operation touches all three tables inside one `with_txn` block, so a
//! failure at any statement leaves the store as it was.

use rust_decimal::Decimal;
use time::Date;
use tracing::{debug, info};

use crate::adapters::employees_sea::{
    self as employees_adapter, ContactFields, EmergencyContactFields, EmployeeFields,
};
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::state::app_state::AppState;

pub const MISSING_FIELDS_DETAIL: &str =
    "Name, designation, dateOfBirth or salary field cannot be empty";

/// Write payload as received. Only the four employee columns are required;
/// contact columns are passed through and enforced by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeInput {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub date_of_birth: Option<Date>,
    pub salary: Option<Decimal>,
    pub contact: ContactFields,
    pub emergency: EmergencyContactFields,
}

/// Payload that passed the presence check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEmployee {
    pub employee: EmployeeFields,
    pub contact: ContactFields,
    pub emergency: EmergencyContactFields,
}

impl EmployeeInput {
    pub fn validate(self) -> Result<ValidEmployee, DomainError> {
        let (Some(name), Some(designation), Some(date_of_birth), Some(salary)) =
            (self.name, self.designation, self.date_of_birth, self.salary)
        else {
            return Err(DomainError::validation(MISSING_FIELDS_DETAIL));
        };

        Ok(ValidEmployee {
            employee: EmployeeFields {
                name,
                designation,
                date_of_birth,
                salary,
            },
            contact: self.contact,
            emergency: self.emergency,
        })
    }
}

/// Insert the employee and both child rows; returns the generated id.
pub async fn create_employee(state: &AppState, input: EmployeeInput) -> Result<i64, AppError> {
    let valid = input.validate()?;

    let employee_id = with_txn(state, |txn| {
        Box::pin(async move {
            let employee_id = employees_adapter::insert_employee(txn, valid.employee).await?;
            debug!(employee_id, "employee row inserted");

            employees_adapter::insert_contact(txn, employee_id, valid.contact).await?;
            employees_adapter::insert_emergency_contact(txn, employee_id, valid.emergency)
                .await?;

            Ok::<_, AppError>(employee_id)
        })
    })
    .await?;

    info!(employee_id, "employee created");
    Ok(employee_id)
}

/// Overwrite the employee and both child rows.
///
/// A missing employee aborts before the child tables are touched.
pub async fn update_employee(
    state: &AppState,
    employee_id: i64,
    input: EmployeeInput,
) -> Result<(), AppError> {
    let valid = input.validate()?;

    with_txn(state, |txn| {
        Box::pin(async move {
            let rows = employees_adapter::update_employee(txn, employee_id, valid.employee).await?;
            if rows == 0 {
                return Err(AppError::from(DomainError::employee_not_found(employee_id)));
            }

            let contacts =
                employees_adapter::update_contact(txn, employee_id, valid.contact).await?;
            let emergency =
                employees_adapter::update_emergency_contact(txn, employee_id, valid.emergency)
                    .await?;
            debug!(employee_id, contacts, emergency, "child rows updated");

            Ok::<_, AppError>(())
        })
    })
    .await?;

    info!(employee_id, "employee updated");
    Ok(())
}

/// Delete the employee, then its child rows explicitly.
pub async fn delete_employee(state: &AppState, employee_id: i64) -> Result<(), AppError> {
    with_txn(state, |txn| {
        Box::pin(async move {
            let rows = employees_adapter::delete_employee(txn, employee_id).await?;
            if rows == 0 {
                return Err(AppError::from(DomainError::employee_not_found(employee_id)));
            }

            // Normally already gone through ON DELETE CASCADE
            employees_adapter::delete_contacts(txn, employee_id).await?;
            employees_adapter::delete_emergency_contacts(txn, employee_id).await?;

            Ok::<_, AppError>(())
        })
    })
    .await?;

    info!(employee_id, "employee deleted");
    Ok(())
}
