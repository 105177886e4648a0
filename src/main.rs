mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::analysis::{routes as analysis_routes, AnalysisService};
use crate::features::app_sessions::{AppSessionRegistry, SessionDeps, SessionSweeper};
use crate::features::auth::clients::BackendAuthClient;
use crate::features::auth::routes as auth_routes;
use crate::features::chatbot::{routes as chatbot_routes, ChatbotService};
use crate::features::map::routes as map_routes;
use crate::features::pages::{handlers as pages_handlers, routes as pages_routes};
use crate::features::regions::{routes as regions_routes, RegionService};
use crate::features::reports::{routes as reports_routes, ExportService};
use crate::features::simulation::{routes as simulation_routes, SimulationService};
use crate::modules::backend::BackendClient;
use crate::shared::constants::PATH_AUTH_CALLBACK;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

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

    // Planning backend client (shared by every feature)
    let backend = Arc::new(
        BackendClient::new(config.backend.clone())
            .map_err(|e| anyhow::anyhow!("Failed to create backend client: {}", e))?,
    );
    tracing::info!(
        "Backend client initialized: {} (timeout {:?})",
        backend.api_url(""),
        backend.config().request_timeout
    );

    // Initialize feature services
    let region_service = Arc::new(RegionService::new(Arc::clone(&backend)));
    let analysis_service = Arc::new(AnalysisService::new(Arc::clone(&backend)));
    let simulation_service = Arc::new(SimulationService::new(Arc::clone(&backend)));
    let export_service = Arc::new(ExportService::new(Arc::clone(&backend)));
    let chatbot_service = Arc::new(ChatbotService::new(Arc::clone(&backend)));
    let auth_client = Arc::new(BackendAuthClient::new(Arc::clone(&backend)));
    tracing::info!("Feature services initialized");

    // App sessions, one per browser
    let registry = Arc::new(AppSessionRegistry::new(
        SessionDeps {
            auth_gateway: auth_client,
            facility_source: region_service.clone(),
            map_debounce: config.map.debounce,
            callback_url: format!("{}{}", config.app.app_url, PATH_AUTH_CALLBACK),
        },
        config.session.clone(),
    ));
    tracing::info!(
        "App session registry initialized (idle ttl {:?}, map debounce {:?})",
        config.session.idle_ttl,
        config.map.debounce
    );

    // Spawn the idle session sweeper
    let sweeper = SessionSweeper::new(Arc::clone(&registry));
    tokio::spawn(async move {
        sweeper.run().await;
    });
    tracing::info!("Session sweeper worker spawned");

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

    // Protected routes (require a signed-in app session)
    let protected_routes = Router::new()
        .merge(regions_routes::routes(region_service))
        .merge(map_routes::routes())
        .merge(analysis_routes::routes(analysis_service))
        .merge(simulation_routes::routes(simulation_service))
        .merge(reports_routes::routes(export_service))
        .merge(chatbot_routes::routes(chatbot_service))
        .route_layer(from_fn(middleware::auth_middleware));

    // Public routes (no sign-in required)
    let public_routes = Router::new()
        .merge(auth_routes::routes(Arc::new(config.app.clone())))
        .merge(pages_routes::routes());

    // Every API route runs inside the caller's app session
    let session_routes = Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(&registry),
            middleware::app_session_middleware,
        ));

    // Simple health check endpoint (no session required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(session_routes)
        .merge(health_route)
        .fallback(pages_handlers::fallback)
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

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

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
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
