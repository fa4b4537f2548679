mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::approvals::{routes as approvals_routes, ApprovalService};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::AuthService;
use crate::features::auth::SessionStore;
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::equipment::{routes as equipment_routes, EquipmentService};
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::users::{routes as users_routes, UserService};
use crate::modules::backend::{DashboardBackend, HttpBackend};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Every feature service, wired to one backend and one session store
struct AppServices {
    sessions: Arc<SessionStore>,
    auth: Arc<AuthService>,
    dashboard: Arc<DashboardService>,
    equipment: Arc<EquipmentService>,
    reports: Arc<ReportService>,
    approvals: Arc<ApprovalService>,
    users: Arc<UserService>,
}

impl AppServices {
    fn new(config: &Config, backend: Arc<dyn DashboardBackend>) -> Self {
        let sessions = Arc::new(SessionStore::new(config.session.ttl));
        let utc_offset = config.dashboard.utc_offset;

        let equipment = Arc::new(EquipmentService::new(Arc::clone(&backend)));
        Self {
            auth: Arc::new(AuthService::new(Arc::clone(&backend), Arc::clone(&sessions))),
            dashboard: Arc::new(DashboardService::new(Arc::clone(&backend), utc_offset)),
            reports: Arc::new(ReportService::new(
                Arc::clone(&backend),
                Arc::clone(&equipment),
            )),
            approvals: Arc::new(ApprovalService::new(
                Arc::clone(&backend),
                config.letter.clone(),
                utc_offset,
            )),
            users: Arc::new(UserService::new(Arc::clone(&backend))),
            equipment,
            sessions,
        }
    }
}

/// API routes without the outer HTTP layers (CORS, tracing, request ids)
fn api_router(services: &AppServices) -> Router {
    // Protected routes (require a live session)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&services.auth)))
        .merge(dashboard_routes(Arc::clone(&services.dashboard)))
        .merge(equipment_routes(Arc::clone(&services.equipment)))
        .merge(reports_routes(Arc::clone(&services.reports)))
        .merge(approvals_routes(Arc::clone(&services.approvals)))
        .merge(users_routes(Arc::clone(&services.users)))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&services.sessions),
            middleware::session_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .merge(protected_routes)
        .merge(auth_routes::public_routes(Arc::clone(&services.auth)))
        .merge(health_route)
}

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Backend REST client
    let http_backend = HttpBackend::new(&config.backend)
        .map_err(|e| anyhow::anyhow!("Failed to create backend client: {}", e))?;
    tracing::info!("Backend client initialized for {}", http_backend.base_url());
    let backend: Arc<dyn DashboardBackend> = Arc::new(http_backend);

    let services = AppServices::new(&config, backend);
    tracing::info!(
        "Services initialized (session ttl {}s, utc offset {})",
        config.session.ttl.as_secs(),
        config.dashboard.utc_offset
    );

    // Sweep expired sessions in the background
    {
        let sessions = Arc::clone(&services.sessions);
        let period = config.session.purge_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let removed = sessions.purge_expired().await;
                if removed > 0 {
                    tracing::debug!("Purged {} expired sessions", removed);
                }
            }
        });
    }

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let app = Router::new()
        .merge(swagger)
        .merge(api_router(&services))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
