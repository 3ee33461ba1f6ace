//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub(crate) use metrics::build_prometheus;
pub use settings::ServerSettings;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use site_backend::Trace;
#[cfg(debug_assertions)]
use site_backend::doc::ApiDoc;
use site_backend::domain::ContactIntakeService;
use site_backend::domain::ports::ContactIntake;
use site_backend::domain::validation::Schemas;
use site_backend::inbound::http::contact_submissions::create_contact_submission;
use site_backend::inbound::http::health::{HealthState, health, live, ready};
use site_backend::inbound::http::state::HttpState;
use site_backend::inbound::http::validation::json_config;
use site_backend::outbound::memory::InMemoryContactSubmissionRepository;
use site_backend::outbound::persistence::DieselContactSubmissionRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Choose the submission store: PostgreSQL when a pool is configured,
/// process memory otherwise.
fn build_contact_intake(config: &ServerConfig, schemas: Arc<Schemas>) -> Arc<dyn ContactIntake> {
    match &config.db_pool {
        Some(pool) => Arc::new(ContactIntakeService::new(
            schemas,
            Arc::new(DieselContactSubmissionRepository::new(pool.clone())),
        )),
        None => {
            info!("no database configured; contact submissions are kept in memory");
            Arc::new(ContactIntakeService::new(
                schemas,
                Arc::new(InMemoryContactSubmissionRepository::new(Arc::new(
                    DefaultClock,
                ))),
            ))
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1").service(create_contact_submission);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(health)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let contact_intake = build_contact_intake(&config, Arc::new(Schemas::new()));
    let http_state = web::Data::new(HttpState::new(contact_intake));
    let ServerConfig {
        bind_addr,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
