// region:    --- Imports
use super::queries;
use crate::auction::model::{Auction, Listing};
use crate::bidding::model::{Bid, BidWithBidder};
use crate::database::DatabaseManager;
use crate::error::{AppError, Result};
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 경매 조회
pub async fn get_auction(db_manager: &DatabaseManager, auction_id: i64) -> Result<Auction> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(queries::GET_AUCTION)
                    .bind(auction_id)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(AppError::from)?
                    .ok_or(AppError::NotFound("Auction"))
            })
        })
        .await
}

/// 매물 조회
pub async fn get_listing(db_manager: &DatabaseManager, listing_id: i64) -> Result<Listing> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                    .bind(listing_id)
                    .fetch_optional(&mut **tx)
                    .await
                    .map_err(AppError::from)?
                    .ok_or(AppError::NotFound("Listing"))
            })
        })
        .await
}

/// 경매 입찰 수 조회
pub async fn count_bids(db_manager: &DatabaseManager, auction_id: i64) -> Result<i64> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_scalar::<_, i64>(queries::COUNT_BIDS)
                    .bind(auction_id)
                    .fetch_one(&mut **tx)
                    .await
                    .map_err(AppError::from)
            })
        })
        .await
}

/// 상위 입찰 조회 (금액 내림차순 상위 5건)
pub async fn get_top_bids(db_manager: &DatabaseManager, auction_id: i64) -> Result<Vec<Bid>> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Bid>(queries::GET_TOP_BIDS)
                    .bind(auction_id)
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(AppError::from)
            })
        })
        .await
}

/// 경매별 입찰 이력 조회 (최신순, 입찰자 정보 조인)
pub async fn get_bid_history(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Vec<BidWithBidder>> {
    info!("{:<12} --> 입찰 이력 조회 경매: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, BidWithBidder>(queries::GET_BIDS_BY_AUCTION)
                    .bind(auction_id)
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(AppError::from)
            })
        })
        .await
}

/// 사용자별 입찰 이력 조회 (최신순)
pub async fn get_user_bids(db_manager: &DatabaseManager, user_id: i64) -> Result<Vec<Bid>> {
    info!("{:<12} --> 사용자 입찰 이력 조회: {}", "Query", user_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Bid>(queries::GET_BIDS_BY_USER)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await
                    .map_err(AppError::from)
            })
        })
        .await
}

/// 최고 입찰가 조회 (입찰이 없으면 None)
pub async fn get_highest_bid(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Option<i64>> {
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_scalar::<_, Option<i64>>(queries::GET_HIGHEST_BID)
                    .bind(auction_id)
                    .fetch_one(&mut **tx)
                    .await
                    .map_err(AppError::from)
            })
        })
        .await
}

// endregion: --- Query Handlers
