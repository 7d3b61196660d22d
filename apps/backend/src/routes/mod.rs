use actix_web::web;

pub mod employees;
pub mod health;

/// Register every route. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Liveness and health: / and /health
    cfg.configure(health::configure_routes);

    // Employee CRUD: /employees/**
    cfg.service(web::scope("/employees").configure(employees::configure_routes));
}
