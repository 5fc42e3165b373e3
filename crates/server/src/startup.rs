use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::jobs::{InMemoryJobStore, JobService, SeaOrmJobStore};
use service::products::{InMemoryProductStore, ProductService, SeaOrmProductStore};
use service::students::{InMemoryStudentStore, SqlStudentStore, StudentService};

use crate::errors::StartupError;
use crate::observe::{LogHooks, MethodHooks};
use crate::routes::{self, ServerState};

fn init_logging() {
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => init_logging_json(),
        _ => init_logging_default(),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks.
fn load_bind_addr() -> Result<SocketAddr, StartupError> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {}", e)))
}

/// Explicit wiring, stores first: pick a backing store per entity, inject it
/// into its service, hand the services to the router state. Database-backed
/// stores are used when a URL resolves, in-memory stores otherwise.
async fn build_state() -> anyhow::Result<ServerState> {
    let mut db_cfg = configs::load_default().map(|c| c.database).unwrap_or_default();
    db_cfg.normalize_from_env();

    let hooks: Arc<dyn MethodHooks> = Arc::new(LogHooks);

    if db_cfg.url.trim().is_empty() {
        info!("no database configured; serving from in-memory stores");
        return Ok(ServerState {
            jobs: JobService::new(InMemoryJobStore::with_sample_posts()),
            students: StudentService::new(InMemoryStudentStore::new()),
            products: ProductService::new(InMemoryProductStore::new()),
            hooks,
        });
    }

    db_cfg.validate()?;
    let db = models::db::connect_with_url(
        &db_cfg.url,
        db_cfg.max_connections,
        db_cfg.connect_timeout_secs,
        db_cfg.sqlx_logging,
    )
    .await?;
    info!("database connected; serving from sql-backed stores");
    Ok(ServerState {
        jobs: JobService::new(Arc::new(SeaOrmJobStore { db: db.clone() })),
        students: StudentService::new(Arc::new(SqlStudentStore { db: db.clone() })),
        products: ProductService::new(Arc::new(SeaOrmProductStore { db })),
        hooks,
    })
}

/// Public entry: build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let state = build_state().await?;
    let app: Router = routes::build_router(build_cors(), state);

    let addr = load_bind_addr()?;
    info!(%addr, "starting demo server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
