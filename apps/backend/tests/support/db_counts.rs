use employees_api::entities::{Contacts, EmergencyContacts, Employees};
use employees_api::state::app_state::AppState;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};

/// Row counts of (employees, contacts, emergency_contacts).
pub async fn table_counts(state: &AppState) -> Result<(u64, u64, u64), DbErr> {
    let db = state
        .db()
        .ok_or_else(|| DbErr::Custom("test state has no database".into()))?;

    let employees = Employees::find().count(db).await?;
    let contacts = Contacts::find().count(db).await?;
    let emergency = EmergencyContacts::find().count(db).await?;
    Ok((employees, contacts, emergency))
}
