use actix_web::{web, App, HttpServer};
use db_infra::config::db::RuntimeEnv;
use employees_api::infra::state::build_state;
use employees_api::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use employees_api::{routes, telemetry, ServerConfig};
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment comes from the runtime (docker env_file, or sourced .env locally)
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(config.db_kind)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        db_kind = %config.db_kind,
        "Server is running"
    );

    let data = web::Data::new(app_state.clone());

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    // Graceful shutdown: workers are stopped, release the pool
    if let Err(e) = app_state.close().await {
        warn!(error = %e, "failed to close database pool");
    }
    info!("Server stopped");
    Ok(())
}
