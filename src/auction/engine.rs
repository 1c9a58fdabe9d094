/// 경매 수명주기 엔진
/// 상태 기계: Active --입찰--> Active, Active --> Closed(판매자/만료), Active --> Cancelled.
/// Closed/Cancelled는 종단 상태로 되돌릴 수 없다.
/// 종료 계열 쓰기는 전부 status = 'Active' 조건부 업데이트라서
/// 동시 종료 경합에서도 한쪽만 성공하고 알림도 한 번만 발행된다.
// region:    --- Imports
use crate::auction::model::{self, closed_by, Auction, Listing};
use crate::bidding::model::Bid;
use crate::database::DatabaseManager;
use crate::error::{AppError, Result};
use crate::notification::emitter::{emit_or_log, NotificationSink};
use crate::notification::model::NotificationDraft;
use crate::query::{handlers as query_handlers, queries};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Commands
/// 경매 생성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateAuctionCommand {
    pub listing_id: i64,
    pub seller_id: i64,
    pub start_price: i64,
    pub end_time: Option<DateTime<Utc>>,
}

/// 경매 상세 (경매 + 매물 + 입찰 수 + 상위 입찰)
#[derive(Debug, Serialize, Deserialize)]
pub struct AuctionDetails {
    pub auction: Auction,
    pub listing: Listing,
    pub bid_count: i64,
    pub top_bids: Vec<Bid>,
}

/// 매물에 대한 경매 생성
/// 종료 시간 미지정 시 now + 7일. 매물당 경매는 1건으로 고유 인덱스가 보장한다.
pub async fn create_for_listing(
    db_manager: &DatabaseManager,
    cmd: CreateAuctionCommand,
) -> Result<Auction> {
    info!("{:<12} --> 경매 생성 요청: {:?}", "Engine", cmd);

    if cmd.start_price <= 0 {
        return Err(AppError::InvalidAmount);
    }

    let now = Utc::now();
    let end_time = model::end_time_or_default(cmd.end_time, now);
    if end_time <= now {
        return Err(AppError::InvalidState("End time must be in the future"));
    }

    // 매물 존재 확인
    query_handlers::get_listing(db_manager, cmd.listing_id).await?;

    let result = sqlx::query_as::<_, Auction>(queries::CREATE_AUCTION)
        .bind(cmd.listing_id)
        .bind(cmd.seller_id)
        .bind(cmd.start_price)
        .bind(now)
        .bind(end_time)
        .fetch_one(&*db_manager.pool)
        .await;

    match result {
        Ok(auction) => Ok(auction),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::InvalidState(
            "An auction already exists for this listing",
        )),
        Err(e) => Err(e.into()),
    }
}

/// 판매자 수동 종료
pub async fn close_by_seller(
    db_manager: &DatabaseManager,
    sink: &impl NotificationSink,
    auction_id: i64,
    seller_id: i64,
) -> Result<Auction> {
    info!(
        "{:<12} --> 판매자 종료 요청: 경매 {} 판매자 {}",
        "Engine", auction_id, seller_id
    );
    let auction = query_handlers::get_auction(db_manager, auction_id).await?;
    if auction.seller_id != seller_id {
        return Err(AppError::Unauthorized);
    }
    if !auction.is_active() {
        return Err(AppError::InvalidState("Auction is not active"));
    }

    close_active(db_manager, sink, auction_id, closed_by::SELLER_CLOSED).await
}

/// 만료 자동 종료
pub async fn close_expired(
    db_manager: &DatabaseManager,
    sink: &impl NotificationSink,
    auction_id: i64,
) -> Result<Auction> {
    let now = Utc::now();
    let auction = query_handlers::get_auction(db_manager, auction_id).await?;
    if !auction.is_active() {
        return Err(AppError::InvalidState("Auction is not active"));
    }
    if !auction.has_ended(now) {
        return Err(AppError::NotYetEnded);
    }

    close_active(db_manager, sink, auction_id, closed_by::TIME_EXPIRED).await
}

/// Active 경매 종료 공통 처리 (조건부 업데이트 + 알림 발행)
async fn close_active(
    db_manager: &DatabaseManager,
    sink: &impl NotificationSink,
    auction_id: i64,
    reason: &'static str,
) -> Result<Auction> {
    let now = Utc::now();
    let deadline = model::payment_deadline_from(now);

    let closed = sqlx::query_as::<_, Auction>(queries::CLOSE_AUCTION)
        .bind(auction_id)
        .bind(now)
        .bind(reason)
        .bind(deadline)
        .fetch_optional(&*db_manager.pool)
        .await?
        // 사전 확인과 쓰기 사이에 다른 쪽이 먼저 종료한 경우
        .ok_or(AppError::InvalidState("Auction is not active"))?;

    info!(
        "{:<12} --> 경매 종료: {} (사유 {}, 낙찰자 {:?})",
        "Engine", closed.id, reason, closed.winner_id
    );

    // 알림은 종료 확정 이후의 부수효과: 실패해도 종료는 유지된다
    if let Err(e) = notify_closed(db_manager, sink, &closed).await {
        error!(
            "{:<12} --> 종료 알림 발행 실패 (경매 {}): {:?}",
            "Engine", closed.id, e
        );
    }

    Ok(closed)
}

/// 종료 알림 발행: 낙찰자에게 낙찰 알림, 그 외 입찰자에게 종료 알림
async fn notify_closed(
    db_manager: &DatabaseManager,
    sink: &impl NotificationSink,
    auction: &Auction,
) -> Result<()> {
    let Some(winner_id) = auction.winner_id else {
        // 입찰 없이 종료: 알릴 대상이 없다
        return Ok(());
    };

    emit_or_log(
        sink,
        NotificationDraft::auction_won(
            winner_id,
            auction.id,
            auction.part_id,
            auction.current_price,
        ),
    )
    .await;

    let losers = sqlx::query_scalar::<_, i64>(queries::GET_DISTINCT_BIDDERS_EXCEPT)
        .bind(auction.id)
        .bind(winner_id)
        .fetch_all(&*db_manager.pool)
        .await?;

    for user_id in losers {
        emit_or_log(
            sink,
            NotificationDraft::auction_ended(user_id, auction.id, auction.part_id),
        )
        .await;
    }

    Ok(())
}

/// 경매 취소
/// 소유권 검증 없음. 알림/결제 기한 없이 상태만 바꾼다.
pub async fn cancel(db_manager: &DatabaseManager, auction_id: i64) -> Result<Auction> {
    info!("{:<12} --> 경매 취소 요청: {}", "Engine", auction_id);
    let auction = query_handlers::get_auction(db_manager, auction_id).await?;
    if !auction.is_active() {
        return Err(AppError::InvalidState("Auction is not active"));
    }

    sqlx::query_as::<_, Auction>(queries::CANCEL_AUCTION)
        .bind(auction_id)
        .bind(Utc::now())
        .fetch_optional(&*db_manager.pool)
        .await?
        .ok_or(AppError::InvalidState("Auction is not active"))
}

/// 만료 경매 일괄 종료
/// 개별 실패는 기록만 하고 나머지를 계속 처리한다. 종료된 건수를 반환.
pub async fn sweep_expired(
    db_manager: &DatabaseManager,
    sink: &impl NotificationSink,
) -> Result<u64> {
    let now = Utc::now();
    let expired_ids = sqlx::query_scalar::<_, i64>(queries::GET_EXPIRED_ACTIVE_AUCTION_IDS)
        .bind(now)
        .fetch_all(&*db_manager.pool)
        .await?;

    let mut closed = 0u64;
    for auction_id in expired_ids {
        match close_expired(db_manager, sink, auction_id).await {
            Ok(_) => closed += 1,
            Err(e) => error!(
                "{:<12} --> 만료 경매 종료 실패 (경매 {}): {:?}",
                "Engine", auction_id, e
            ),
        }
    }

    if closed > 0 {
        info!("{:<12} --> 만료 경매 {}건 종료", "Engine", closed);
    }
    Ok(closed)
}

/// 경매 상세 조회: 경매 + 매물 + 입찰 수 + 상위 5건 입찰
pub async fn get_details(db_manager: &DatabaseManager, auction_id: i64) -> Result<AuctionDetails> {
    let auction = query_handlers::get_auction(db_manager, auction_id).await?;
    let listing = query_handlers::get_listing(db_manager, auction.part_id).await?;
    let bid_count = query_handlers::count_bids(db_manager, auction_id).await?;
    let top_bids = query_handlers::get_top_bids(db_manager, auction_id).await?;

    Ok(AuctionDetails {
        auction,
        listing,
        bid_count,
        top_bids,
    })
}
// endregion: --- Commands
