mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::{Config, StorageConfig};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::appointments::{routes as appointments_routes, AppointmentService};
use crate::features::doctors::{routes as doctors_routes, DoctorService};
use crate::features::files::{routes as files_routes, FileService};
use crate::features::health::routes as health_routes;
use crate::features::prescriptions::{routes as prescriptions_routes, PrescriptionService};
use crate::modules::storage::{S3Client, StorageGateway};
use crate::shared::constants::API_PREFIX;
use axum::{middleware::from_fn_with_state, Router};
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

/// Build the storage gateway, or a disabled one when S3 is not usable
fn storage_gateway(config: &StorageConfig) -> StorageGateway {
    let Some(credentials) = config.credentials() else {
        tracing::warn!(
            "AWS credentials or S3 bucket not configured, file storage is disabled"
        );
        return StorageGateway::disabled();
    };

    match S3Client::new(credentials, &config.region, config.endpoint.as_deref()) {
        Ok(client) => StorageGateway::new(Arc::new(client), config.operation_timeout),
        Err(e) => {
            tracing::warn!("Failed to initialize S3 client, file storage is disabled: {}", e);
            StorageGateway::disabled()
        }
    }
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

    // Create database connection pool
    tracing::info!(
        "Connecting to database: {} (sslmode={})",
        database::describe(&database::connect_options(&config.database)?),
        config.database.ssl_mode
    );
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Storage is optional: the API keeps serving without it
    let storage = Arc::new(storage_gateway(&config.storage));
    tracing::info!("Storage gateway initialized (enabled: {})", storage.is_configured());

    let doctor_service = Arc::new(DoctorService::new(pool.clone()));
    let appointment_service = Arc::new(AppointmentService::new(pool.clone()));
    let prescription_service = Arc::new(PrescriptionService::new(pool.clone()));
    let file_service = Arc::new(FileService::new(pool.clone(), Arc::clone(&storage)));
    tracing::info!("Services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    let api_routes = Router::new()
        .merge(health_routes(Arc::clone(&storage)))
        .merge(doctors_routes(doctor_service))
        .merge(appointments_routes(appointment_service))
        .merge(prescriptions_routes(prescription_service))
        .merge(files_routes(file_service));

    let app = Router::new()
        .merge(swagger)
        .nest(API_PREFIX, api_routes)
        .layer(from_fn_with_state(
            config.app.request_timeout,
            middleware::request_deadline,
        ))
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
    tracing::info!("Server listening on http://{}{}", addr, API_PREFIX);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
