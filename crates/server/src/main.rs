//! Threddit server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use threddit_api::{middleware::AppState, router as api_router};
use threddit_common::Config;
use threddit_core::{
    AccountService, BlockingService, CommunityService, EmailService, FollowingService,
    MutingService, NotificationService, UserService,
};
use threddit_db::repositories::{
    BlockingRepository, CommunityMemberRepository, CommunityMuteRepository, CommunityRepository,
    FollowingRepository, NotificationRepository, UserProfileRepository, UserRepository,
    UserReportRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "threddit=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting threddit server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = threddit_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    threddit_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let profile_repo = UserProfileRepository::new(Arc::clone(&db));
    let following_repo = FollowingRepository::new(Arc::clone(&db));
    let blocking_repo = BlockingRepository::new(Arc::clone(&db));
    let community_repo = CommunityRepository::new(Arc::clone(&db));
    let member_repo = CommunityMemberRepository::new(Arc::clone(&db));
    let mute_repo = CommunityMuteRepository::new(Arc::clone(&db));
    let notification_repo = NotificationRepository::new(Arc::clone(&db));
    let report_repo = UserReportRepository::new(Arc::clone(&db));

    // Initialize services
    let user_service = UserService::new(user_repo.clone(), profile_repo.clone());

    let notification_service = NotificationService::new(
        notification_repo,
        user_repo.clone(),
        community_repo.clone(),
        mute_repo.clone(),
        profile_repo.clone(),
    );

    let email_service = EmailService::new(config.email.clone());
    if email_service.is_enabled() {
        info!("Email delivery enabled");
    } else {
        info!("Email delivery disabled (no email config)");
    }

    // The follow path fires notification and email side effects, so those
    // services are built first and injected.
    let mut following_service = FollowingService::new(
        following_repo.clone(),
        blocking_repo.clone(),
        user_repo.clone(),
        profile_repo.clone(),
    );
    following_service.set_notifications(notification_service.clone());
    following_service.set_email(email_service);

    let blocking_service = BlockingService::new(
        blocking_repo.clone(),
        user_repo.clone(),
        following_service.clone(),
    );
    let muting_service = MutingService::new(mute_repo, community_repo.clone());
    let community_service = CommunityService::new(community_repo, member_repo);
    let account_service = AccountService::new(
        user_repo,
        profile_repo,
        following_repo,
        blocking_repo,
        report_repo,
    );

    let state = AppState {
        user_service,
        following_service,
        blocking_service,
        muting_service,
        notification_service,
        community_service,
        account_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            threddit_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
