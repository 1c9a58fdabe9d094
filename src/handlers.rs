// region:    --- Imports
use crate::auction::engine::{self, AuctionDetails, CreateAuctionCommand};
use crate::auction::model::Auction;
use crate::bidding::commands::{handle_place_bid, PlaceBidCommand};
use crate::bidding::model::{Bid, BidWithBidder};
use crate::database::DatabaseManager;
use crate::error::Result;
use crate::notification::commands as notification_commands;
use crate::notification::emitter::PostgresNotificationSink;
use crate::penalty::assessor;
use crate::penalty::model::Penalty;
use crate::query;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Request DTOs
#[derive(Debug, Deserialize)]
pub struct CreateAuctionRequest {
    pub listing_id: i64,
    pub seller_id: i64,
    pub start_price: i64,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CloseAuctionRequest {
    pub seller_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}
// endregion: --- Request DTOs

// region:    --- Command Handlers

/// 경매 생성 요청 처리
pub async fn handle_create_auction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(req): Json<CreateAuctionRequest>,
) -> Result<impl IntoResponse> {
    info!("{:<12} --> 경매 생성 요청: {:?}", "Handler", req);
    let auction = engine::create_for_listing(
        &db_manager,
        CreateAuctionCommand {
            listing_id: req.listing_id,
            seller_id: req.seller_id,
            start_price: req.start_price,
            end_time: req.end_time,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(auction)))
}

/// 입찰 요청 처리
pub async fn handle_bid(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<PlaceBidCommand>,
) -> Result<Json<serde_json::Value>> {
    info!("{:<12} --> 입찰 요청: {:?}", "Handler", cmd);
    let (bid, auction) = handle_place_bid(&db_manager, cmd).await?;
    Ok(Json(serde_json::json!({
        "message": "Bid placed successfully",
        "bid": bid,
        "auction": auction,
    })))
}

/// 판매자 경매 종료 요청 처리
pub async fn handle_close_auction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
    Json(req): Json<CloseAuctionRequest>,
) -> Result<Json<Auction>> {
    info!(
        "{:<12} --> 판매자 종료 요청: 경매 {} 판매자 {}",
        "Handler", auction_id, req.seller_id
    );
    let sink = PostgresNotificationSink::new(db_manager.get_pool());
    let auction = engine::close_by_seller(&db_manager, &sink, auction_id, req.seller_id).await?;
    Ok(Json(auction))
}

/// 만료 경매 종료 요청 처리
pub async fn handle_close_expired(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> Result<Json<Auction>> {
    info!("{:<12} --> 만료 종료 요청: 경매 {}", "Handler", auction_id);
    let sink = PostgresNotificationSink::new(db_manager.get_pool());
    let auction = engine::close_expired(&db_manager, &sink, auction_id).await?;
    Ok(Json(auction))
}

/// 경매 취소 요청 처리
pub async fn handle_cancel_auction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> Result<Json<Auction>> {
    info!("{:<12} --> 취소 요청: 경매 {}", "Handler", auction_id);
    let auction = engine::cancel(&db_manager, auction_id).await?;
    Ok(Json(auction))
}

/// 만료 경매 일괄 종료 수동 실행
pub async fn handle_sweep_expired(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> Result<Json<serde_json::Value>> {
    info!("{:<12} --> 만료 경매 일괄 종료 수동 실행", "Handler");
    let sink = PostgresNotificationSink::new(db_manager.get_pool());
    let closed = engine::sweep_expired(&db_manager, &sink).await?;
    Ok(Json(serde_json::json!({ "closed": closed })))
}

/// 연체 결제 점검 수동 실행
pub async fn handle_sweep_overdue(
    State(db_manager): State<Arc<DatabaseManager>>,
) -> Result<Json<Vec<Penalty>>> {
    info!("{:<12} --> 연체 결제 점검 수동 실행", "Handler");
    let sink = PostgresNotificationSink::new(db_manager.get_pool());
    let created = assessor::sweep_overdue_payments(&db_manager, &sink).await?;
    Ok(Json(created))
}

/// 위약금 납부 처리
pub async fn handle_pay_penalty(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(penalty_id): Path<i64>,
) -> Result<Json<Penalty>> {
    let penalty = assessor::mark_as_paid(&db_manager, penalty_id).await?;
    Ok(Json(penalty))
}

/// 위약금 강제 집행 처리
pub async fn handle_enforce_penalty(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(penalty_id): Path<i64>,
) -> Result<Json<Penalty>> {
    let penalty = assessor::enforce(&db_manager, penalty_id).await?;
    Ok(Json(penalty))
}

/// 알림 읽음 처리
pub async fn handle_mark_notification_read(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(notification_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let notification = notification_commands::mark_read(&db_manager, notification_id).await?;
    Ok(Json(notification))
}

/// 사용자 알림 일괄 읽음 처리
pub async fn handle_mark_all_notifications_read(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let updated = notification_commands::mark_all_read(&db_manager, user_id).await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}

/// 알림 삭제
pub async fn handle_delete_notification(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(notification_id): Path<i64>,
) -> Result<impl IntoResponse> {
    notification_commands::delete(&db_manager, notification_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 경매 상세 조회
pub async fn handle_get_auction(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> Result<Json<AuctionDetails>> {
    info!("{:<12} --> 경매 상세 조회 id: {}", "HandlerQuery", auction_id);
    let details = engine::get_details(&db_manager, auction_id).await?;
    Ok(Json(details))
}

/// 경매 입찰 이력 조회
pub async fn handle_get_bid_history(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> Result<Json<Vec<BidWithBidder>>> {
    info!("{:<12} --> 입찰 이력 조회 id: {}", "HandlerQuery", auction_id);
    let bids = query::handlers::get_bid_history(&db_manager, auction_id).await?;
    Ok(Json(bids))
}

/// 최고 입찰가 조회
pub async fn handle_get_highest_bid(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(auction_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    info!("{:<12} --> 최고 입찰가 조회 id: {}", "HandlerQuery", auction_id);
    let highest = query::handlers::get_highest_bid(&db_manager, auction_id).await?;
    Ok(Json(serde_json::json!({ "highest_bid": highest })))
}

/// 사용자 입찰 이력 조회
pub async fn handle_get_user_bids(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Bid>>> {
    info!("{:<12} --> 사용자 입찰 조회 id: {}", "HandlerQuery", user_id);
    let bids = query::handlers::get_user_bids(&db_manager, user_id).await?;
    Ok(Json(bids))
}

/// 사용자 알림 조회
pub async fn handle_get_notifications(
    State(db_manager): State<Arc<DatabaseManager>>,
    Path(user_id): Path<i64>,
    Query(params): Query<NotificationListQuery>,
) -> Result<Json<notification_commands::NotificationPage>> {
    info!("{:<12} --> 알림 조회 사용자: {}", "HandlerQuery", user_id);
    let page = notification_commands::list_for_user(
        &db_manager,
        user_id,
        params.unread_only.unwrap_or(false),
        params.limit,
        params.skip,
    )
    .await?;
    Ok(Json(page))
}

// endregion: --- Query Handlers
