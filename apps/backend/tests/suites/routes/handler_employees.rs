use actix_web::http::StatusCode;
use actix_web::test;
use employees_api::services::employees::{create_employee, MISSING_FIELDS_DETAIL};
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::db_counts::table_counts;
use crate::support::factory::{employee_input, employee_json};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn test_create_then_get_returns_merged_view() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state.clone()).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(employee_json("Ann"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["message"], "Employee created successfully");
    let id = created["id"].as_i64().expect("id should be an integer");
    assert!(id > 0);

    let req = test::TestRequest::get()
        .uri(&format!("/employees/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let view: Value = test::read_body_json(resp).await;
    assert_eq!(view["id"], id);
    assert_eq!(view["name"], "Ann");
    assert_eq!(view["designation"], "Engineer");
    assert_eq!(view["date_of_birth"], "1990-01-01");
    assert_eq!(view["salary"].as_f64(), Some(50000.0));
    assert_eq!(view["phone_number"], "555-1111");
    assert_eq!(view["email"], "a@x.com");
    assert_eq!(view["address"], "1 Main");
    assert_eq!(view["city"], "Pune");
    assert_eq!(view["state"], "MH");
    assert_eq!(view["emergency_contact_name"], "Bob");
    assert_eq!(view["emergency_contact_phone"], "555-2222");
    assert_eq!(view["relationship"], "Brother");

    assert_eq!(table_counts(&state).await?, (1, 1, 1));
    Ok(())
}

#[actix_web::test]
async fn test_list_empty_store_returns_empty_array() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/employees").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
    Ok(())
}

#[actix_web::test]
async fn test_list_second_page() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    for n in 1..=25 {
        create_employee(&state, employee_input(&format!("Employee {n}"))).await?;
    }
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/employees?page=2&limit=10")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Vec<Value> = test::read_body_json(resp).await;
    let ids: Vec<i64> = body.iter().filter_map(|v| v["id"].as_i64()).collect();
    assert_eq!(ids, (11..=20).collect::<Vec<_>>());
    assert_eq!(body[0]["name"], "Employee 11");
    Ok(())
}

#[actix_web::test]
async fn test_list_defaults_to_first_ten() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    for n in 1..=12 {
        create_employee(&state, employee_input(&format!("Employee {n}"))).await?;
    }
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/employees").to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.len(), 10);
    assert_eq!(body[0]["id"], 1);

    // Past the end is an empty page, not an error
    let req = test::TestRequest::get()
        .uri("/employees?page=9&limit=10")
        .to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_empty());
    Ok(())
}

#[actix_web::test]
async fn test_list_rejects_non_numeric_paging() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/employees?page=two")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem = backend_test_support::problem_details::assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid query string"),
    )
    .await;
    assert_eq!(problem.status, 400);
    Ok(())
}

#[actix_web::test]
async fn test_update_overwrites_all_three_rows() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let id = create_employee(&state, employee_input("Ann")).await?;
    let app = create_test_app(state.clone()).with_prod_routes().build().await;

    let mut update = employee_json("Ann Smith");
    update["designation"] = json!("Lead");
    update["salary"] = json!(65000.5);
    update["city"] = json!("Mumbai");
    update["relationship"] = json!("Sister");

    let req = test::TestRequest::put()
        .uri(&format!("/employees/{id}"))
        .set_json(&update)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Employee updated successfully"}));

    let req = test::TestRequest::get()
        .uri(&format!("/employees/{id}"))
        .to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["name"], "Ann Smith");
    assert_eq!(view["designation"], "Lead");
    assert_eq!(view["salary"].as_f64(), Some(65000.5));
    assert_eq!(view["city"], "Mumbai");
    assert_eq!(view["relationship"], "Sister");

    assert_eq!(table_counts(&state).await?, (1, 1, 1));
    Ok(())
}

#[actix_web::test]
async fn test_update_missing_employee_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    create_employee(&state, employee_input("Ann")).await?;
    let app = create_test_app(state.clone()).with_prod_routes().build().await;

    let req = test::TestRequest::put()
        .uri("/employees/999")
        .set_json(employee_json("Ghost"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "EMPLOYEE_NOT_FOUND", "Employee 999 not found")
        .await;

    assert_eq!(table_counts(&state).await?, (1, 1, 1));
    Ok(())
}

#[actix_web::test]
async fn test_update_validates_before_lookup() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::put()
        .uri("/employees/999")
        .set_json(json!({"name": "Ann"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "VALIDATION_ERROR", MISSING_FIELDS_DETAIL).await;
    Ok(())
}

#[actix_web::test]
async fn test_delete_removes_children_then_get_is_not_found(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let id = create_employee(&state, employee_input("Ann")).await?;
    let keep = create_employee(&state, employee_input("Bea")).await?;
    let app = create_test_app(state.clone()).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/employees/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Employee deleted successfully"}));

    assert_eq!(table_counts(&state).await?, (1, 1, 1));

    let req = test::TestRequest::get()
        .uri(&format!("/employees/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(
        resp,
        404,
        "EMPLOYEE_NOT_FOUND",
        &format!("Employee {id} not found"),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/employees/{keep}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn test_delete_missing_employee_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete().uri("/employees/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "EMPLOYEE_NOT_FOUND", "Employee 42 not found")
        .await;
    Ok(())
}

#[actix_web::test]
async fn test_create_missing_required_field_writes_nothing(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state.clone()).with_prod_routes().build().await;

    for field in ["name", "designation", "dateOfBirth", "salary"] {
        let mut body = employee_json("Ann");
        body[field] = Value::Null;

        let req = test::TestRequest::post()
            .uri("/employees")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(resp, 400, "VALIDATION_ERROR", MISSING_FIELDS_DETAIL)
            .await;
    }

    assert_eq!(table_counts(&state).await?, (0, 0, 0));
    Ok(())
}

#[actix_web::test]
async fn test_create_accepts_empty_name_and_zero_salary() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let mut body = employee_json("");
    body["salary"] = json!(0);

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    Ok(())
}

#[actix_web::test]
async fn test_create_failure_on_last_insert_rolls_back_everything(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state.clone()).with_prod_routes().build().await;

    // emergency_contacts.name is NOT NULL, so the third insert fails
    let mut body = employee_json("Ann");
    body.as_object_mut()
        .expect("payload is an object")
        .remove("emergencyName");

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 500, "DB_ERROR", "Internal server error").await;

    assert_eq!(table_counts(&state).await?, (0, 0, 0));
    Ok(())
}

#[actix_web::test]
async fn test_update_failure_on_child_row_keeps_previous_values(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let id = create_employee(&state, employee_input("Ann")).await?;
    let app = create_test_app(state.clone()).with_prod_routes().build().await;

    let mut body = employee_json("Ann Smith");
    body.as_object_mut()
        .expect("payload is an object")
        .remove("relationship");

    let req = test::TestRequest::put()
        .uri(&format!("/employees/{id}"))
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 500, "DB_ERROR", "Internal server error").await;

    let req = test::TestRequest::get()
        .uri(&format!("/employees/{id}"))
        .to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["name"], "Ann");
    assert_eq!(view["relationship"], "Brother");

    assert_eq!(table_counts(&state).await?, (1, 1, 1));
    Ok(())
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state.clone()).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"name": "Ann", "salary": }"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST", "Invalid JSON at line 1").await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(json!({"name": "Ann", "salary": "lots"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(
        resp,
        400,
        "BAD_REQUEST",
        "Invalid JSON: wrong types for one or more fields",
    )
    .await;

    assert_eq!(table_counts(&state).await?, (0, 0, 0));
    Ok(())
}

#[actix_web::test]
async fn test_invalid_employee_id_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/employees/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "INVALID_EMPLOYEE_ID", "Invalid employee id: abc")
        .await;

    Ok(())
}

#[actix_web::test]
async fn test_non_positive_ids_are_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    create_employee(&state, employee_input("Ann")).await?;
    let app = create_test_app(state.clone()).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/employees/0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "EMPLOYEE_NOT_FOUND", "Employee 0 not found")
        .await;

    let req = test::TestRequest::put()
        .uri("/employees/-3")
        .set_json(employee_json("Ghost"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "EMPLOYEE_NOT_FOUND", "Employee -3 not found")
        .await;

    let req = test::TestRequest::delete().uri("/employees/0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "EMPLOYEE_NOT_FOUND", "Employee 0 not found")
        .await;

    assert_eq!(table_counts(&state).await?, (1, 1, 1));
    Ok(())
}
