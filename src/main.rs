// region:    --- Imports
use crate::database::DatabaseManager;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Modules
mod auction;
mod bidding;
mod database;
mod error;
mod handlers;
mod notification;
mod penalty;
mod query;
mod scheduler;

// endregion: --- Modules

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new().await);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 주기 점검 스케줄러 시작 (만료 경매 종료 + 연체 위약금 점검)
    let sweep_scheduler = scheduler::SweepScheduler::new(Arc::clone(&db_manager));
    sweep_scheduler.start();

    // 프론트엔드 클라이언트를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        .route("/auctions", post(handlers::handle_create_auction))
        .route("/auctions/:id", get(handlers::handle_get_auction))
        .route("/bid", post(handlers::handle_bid))
        .route("/auctions/:id/bids", get(handlers::handle_get_bid_history))
        .route(
            "/auctions/:id/highest-bid",
            get(handlers::handle_get_highest_bid),
        )
        .route("/users/:id/bids", get(handlers::handle_get_user_bids))
        .route("/auctions/:id/close", post(handlers::handle_close_auction))
        .route(
            "/auctions/:id/close-expired",
            post(handlers::handle_close_expired),
        )
        .route("/auctions/:id/cancel", post(handlers::handle_cancel_auction))
        .route(
            "/sweeps/expired-auctions",
            post(handlers::handle_sweep_expired),
        )
        .route(
            "/sweeps/overdue-payments",
            post(handlers::handle_sweep_overdue),
        )
        .route("/penalties/:id/pay", post(handlers::handle_pay_penalty))
        .route(
            "/penalties/:id/enforce",
            post(handlers::handle_enforce_penalty),
        )
        .route(
            "/users/:id/notifications",
            get(handlers::handle_get_notifications),
        )
        .route(
            "/notifications/:id/read",
            post(handlers::handle_mark_notification_read),
        )
        .route(
            "/users/:id/notifications/read-all",
            post(handlers::handle_mark_all_notifications_read),
        )
        .route(
            "/notifications/:id",
            delete(handlers::handle_delete_notification),
        )
        .layer(cors)
        .with_state(db_manager);

    // 리스너 생성 (PORT 환경 변수, 기본 3000)
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
