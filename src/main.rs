pub mod config;
pub mod credential;
pub mod err;
pub mod models;
pub mod repo;
pub mod service;
pub mod students;
pub mod validate;

use axum::handler::Handler;
use axum::{routing::get, routing::post, Extension, Router};

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::credential::CredentialHasher;
use crate::err::{Created, Error, Fine, Maybe, Nothing};
use crate::repo::MySqlStudentRepo;
use crate::service::{LookupService, RegistrationService};

pub type RefStr = &'static str;
pub type Payload<T> = axum::response::Result<Maybe<T>, Error>;

pub fn proceeds<V>(value: V) -> Payload<V>
where
    V: Serialize,
{
    Ok(Fine(value))
}

pub fn creates<V>(value: V) -> Payload<V>
where
    V: Serialize,
{
    Ok(Created(value))
}

pub fn breaks<V>(err: Error) -> Payload<V>
where
    V: Serialize,
{
    Ok(Nothing(err))
}

pub struct AppState {
    pub registration: RegistrationService<MySqlStudentRepo>,
    pub lookup: LookupService<MySqlStudentRepo>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::from_env()?;
    let pool = config.connect().await?;
    log::info!("Connected to MySQL at {}:{}", config.db_host, config.db_port);

    let repo = MySqlStudentRepo::new(pool.clone());
    let state = Arc::new(AppState {
        registration: RegistrationService::new(
            repo.clone(),
            CredentialHasher::new(config.hash_cost),
        ),
        lookup: LookupService::new(repo),
    });

    // The literal `/username/:username` route is registered before the
    // `/:id` pattern so a username is never captured as an id.
    let app = Router::new()
        .route("/health", get(students::health))
        .route("/api/students/register", post(students::register_student))
        .route("/api/students", get(students::list_students))
        .route(
            "/api/students/username/:username",
            get(students::student_by_username),
        )
        .route("/api/students/:id", get(students::student_by_id))
        .fallback(err::handler404.into_service())
        .layer(Extension(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    log::info!("Starting student registry HTTP server on http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    log::info!("Database pool closed, shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Could not listen for the shutdown signal: {}", err);
    }
}
