use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::adapters::employees_sea::{ContactFields, EmergencyContactFields};
use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{EmployeeId, ValidatedJson};
use crate::repos::employees::{self as employees_repo, Paging};
use crate::services::employees::{self as employees_service, EmployeeInput};
use crate::state::app_state::AppState;

/// Body of `POST /employees` and `PUT /employees/{id}`.
///
/// Every field is optional at this layer; `null` reads the same as absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub name: Option<String>,
    pub designation: Option<String>,
    #[serde(default, with = "crate::iso_date::option")]
    pub date_of_birth: Option<Date>,
    pub salary: Option<Decimal>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub emergency_name: Option<String>,
    pub emergency_phone: Option<String>,
    pub relationship: Option<String>,
}

impl From<EmployeeRequest> for EmployeeInput {
    fn from(req: EmployeeRequest) -> Self {
        EmployeeInput {
            name: req.name,
            designation: req.designation,
            date_of_birth: req.date_of_birth,
            salary: req.salary,
            contact: ContactFields {
                phone_number: req.phone,
                email: req.email,
                address: req.address,
                city: req.city,
                state: req.state,
            },
            emergency: EmergencyContactFields {
                name: req.emergency_name,
                phone_number: req.emergency_phone,
                relationship: req.relationship,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
}

async fn list_employees(
    query: web::Query<ListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let paging = Paging::new(query.page, query.limit);

    let employees = employees_repo::list_employees(db, paging).await?;
    Ok(HttpResponse::Ok().json(employees))
}

async fn get_employee(
    employee_id: EmployeeId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;

    let employee = employees_repo::get_employee(db, employee_id.0).await?;
    Ok(HttpResponse::Ok().json(employee))
}

async fn create_employee(
    body: ValidatedJson<EmployeeRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = employees_service::create_employee(&app_state, body.into_inner().into()).await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: "Employee created successfully",
        id: Some(id),
    }))
}

async fn update_employee(
    employee_id: EmployeeId,
    body: ValidatedJson<EmployeeRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    employees_service::update_employee(&app_state, employee_id.0, body.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Employee updated successfully",
        id: None,
    }))
}

async fn delete_employee(
    employee_id: EmployeeId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    employees_service::delete_employee(&app_state, employee_id.0).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Employee deleted successfully",
        id: None,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}"))
            .into()
    }));
    cfg.service(
        web::resource("")
            .route(web::get().to(list_employees))
            .route(web::post().to(create_employee)),
    );
    cfg.service(
        web::resource("/{id}")
            .route(web::get().to(get_employee))
            .route(web::put().to(update_employee))
            .route(web::delete().to(delete_employee)),
    );
}
