/// 입찰 커맨드 처리
/// 검증 체인을 통과한 입찰만 기록하고, 경매의 현재 가격/낙찰 후보/입찰 수를 갱신한다.
// region:    --- Imports
use crate::auction::model::Auction;
use crate::bidding::model::Bid;
use crate::database::DatabaseManager;
use crate::error::{AppError, Result};
use crate::query::{handlers as query_handlers, queries};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub auction_id: Option<i64>,
    pub user_id: Option<i64>,
    pub bid_amount: Option<i64>,
}

/// 입찰 검증 체인 (순서 고정, 첫 실패에서 중단)
/// 1. 금액이 양수인지
/// 2. 판매자 본인 입찰 금지
/// 3. 경매가 진행 중인지
/// 4. 입찰 마감 전인지
/// 5. 현재 가격보다 높은지
pub fn validate_bid(
    auction: &Auction,
    user_id: i64,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<()> {
    if amount <= 0 {
        return Err(AppError::InvalidAmount);
    }
    if user_id == auction.seller_id {
        return Err(AppError::SellerCannotBid);
    }
    if !auction.is_active() {
        return Err(AppError::AuctionNotActive);
    }
    if auction.has_ended(now) {
        return Err(AppError::AuctionEnded);
    }
    if amount <= auction.current_price {
        return Err(AppError::BidTooLow {
            current_price: auction.current_price,
        });
    }
    Ok(())
}

/// 입찰 처리
/// 검증 후 조건부 업데이트(현재 가격보다 높은 경우에만 갱신)와 입찰 기록 삽입을
/// 하나의 트랜잭션으로 수행한다. 동시 입찰 시에는 먼저 커밋된 쪽만 성공하고,
/// 진 쪽은 갱신된 경매를 다시 읽어 정확한 실패 사유를 돌려준다.
pub async fn handle_place_bid(
    db_manager: &DatabaseManager,
    cmd: PlaceBidCommand,
) -> Result<(Bid, Auction)> {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);

    let (auction_id, user_id, amount) = match (cmd.auction_id, cmd.user_id, cmd.bid_amount) {
        (Some(a), Some(u), Some(b)) => (a, u, b),
        _ => return Err(AppError::MissingFields),
    };

    // 금액 검증은 경매 조회보다 먼저다: 없는 경매라도 0 이하 금액은 InvalidAmount
    if amount <= 0 {
        return Err(AppError::InvalidAmount);
    }

    let now = Utc::now();

    // 사전 검증 (확정은 아래 조건부 업데이트가 한다)
    let auction = query_handlers::get_auction(db_manager, auction_id).await?;
    validate_bid(&auction, user_id, amount, now)?;

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                // 조건부 업데이트: Active + 마감 전 + 더 높은 금액인 경우에만 성공
                let updated = sqlx::query_as::<_, Auction>(queries::ACCEPT_BID)
                    .bind(auction_id)
                    .bind(amount)
                    .bind(user_id)
                    .bind(now)
                    .fetch_optional(&mut **tx)
                    .await?;

                let Some(updated) = updated else {
                    // 경합에서 밀렸다: 최신 상태 기준의 실패 사유를 반환
                    let fresh = sqlx::query_as::<_, Auction>(queries::GET_AUCTION)
                        .bind(auction_id)
                        .fetch_one(&mut **tx)
                        .await?;
                    validate_bid(&fresh, user_id, amount, now)?;
                    return Err(AppError::InvalidState("Auction was updated concurrently"));
                };

                let bid = sqlx::query_as::<_, Bid>(queries::INSERT_BID)
                    .bind(auction_id)
                    .bind(user_id)
                    .bind(amount)
                    .bind(now)
                    .fetch_one(&mut **tx)
                    .await?;

                info!(
                    "{:<12} --> 입찰 성공: 경매 {} 현재 가격 {}",
                    "Command", updated.id, updated.current_price
                );
                Ok((bid, updated))
            })
        })
        .await
}
// endregion: --- Commands

// endregion: --- Tests
