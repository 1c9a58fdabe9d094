/// 위약금 산정기
/// 두 가지 연체 정책을 독립적으로 점검한다:
/// 1. 경매 기반: 결제 기한이 지난 낙찰 경매
/// 2. 주문 기반: 24시간이 지나도록 결제 완료되지 않은 주문
/// 두 정책 모두 조건부 삽입으로 의무당 1건만 생성된다(중복 점검 경합에도 안전).
// region:    --- Imports
use crate::auction::model::Auction;
use crate::database::DatabaseManager;
use crate::error::{AppError, Result};
use crate::notification::emitter::{emit_or_log, NotificationSink};
use crate::notification::model::NotificationDraft;
use crate::penalty::model::{self, reason, Order, Penalty};
use crate::query::queries;
use chrono::{Duration, Utc};
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Sweeps

/// 경매 기반 연체 점검
/// 기한이 지난 낙찰 경매마다 pending 위약금이 없으면 낙찰가만큼 생성하고
/// 낙찰자에게 연체 알림을 보낸다. 생성된 위약금 목록을 반환.
pub async fn sweep_auction_overdues(
    db_manager: &DatabaseManager,
    sink: &impl NotificationSink,
) -> Result<Vec<Penalty>> {
    let now = Utc::now();
    let overdue = sqlx::query_as::<_, Auction>(queries::GET_OVERDUE_AUCTIONS)
        .bind(now)
        .fetch_all(&*db_manager.pool)
        .await?;

    let mut created = Vec::new();
    for auction in overdue {
        // GET_OVERDUE_AUCTIONS가 winner_id IS NOT NULL을 보장한다
        let Some(winner_id) = auction.winner_id else {
            continue;
        };

        let inserted = sqlx::query_as::<_, Penalty>(queries::INSERT_AUCTION_PENALTY)
            .bind(winner_id)
            .bind(auction.id)
            .bind(auction.part_id)
            .bind(auction.current_price)
            .bind(reason::NON_PAYMENT_OVERDUE)
            .bind(auction.payment_deadline)
            .fetch_optional(&*db_manager.pool)
            .await;

        match inserted {
            // 이미 pending 위약금이 있으면 None: 재점검은 무해하다
            Ok(Some(penalty)) => {
                info!(
                    "{:<12} --> 경매 연체 위약금 생성: 경매 {} 사용자 {} 금액 {}",
                    "Penalty", auction.id, winner_id, penalty.amount
                );
                emit_or_log(
                    sink,
                    NotificationDraft::payment_overdue(
                        winner_id,
                        auction.id,
                        auction.part_id,
                        auction.current_price,
                    ),
                )
                .await;
                created.push(penalty);
            }
            Ok(None) => {}
            Err(e) => error!(
                "{:<12} --> 경매 연체 위약금 생성 실패 (경매 {}): {:?}",
                "Penalty", auction.id, e
            ),
        }
    }

    Ok(created)
}

/// 주문 기반 연체 점검
/// 24시간이 지난 미결제 주문마다 총액의 10% 위약금을 생성한다 (주문당 1건).
pub async fn sweep_order_overdues(db_manager: &DatabaseManager) -> Result<Vec<Penalty>> {
    let cutoff = Utc::now() - Duration::hours(model::ORDER_OVERDUE_HOURS);
    let overdue = sqlx::query_as::<_, Order>(queries::GET_OVERDUE_ORDERS)
        .bind(cutoff)
        .fetch_all(&*db_manager.pool)
        .await?;

    let mut created = Vec::new();
    for order in overdue {
        let inserted = sqlx::query_as::<_, Penalty>(queries::INSERT_ORDER_PENALTY)
            .bind(order.buyer_id)
            .bind(order.id)
            .bind(model::order_penalty_amount(order.total_amount))
            .bind(reason::ORDER_PAYMENT_OVERDUE)
            .fetch_optional(&*db_manager.pool)
            .await;

        match inserted {
            Ok(Some(penalty)) => {
                info!(
                    "{:<12} --> 주문 연체 위약금 생성: 주문 {} 사용자 {} 금액 {}",
                    "Penalty", order.id, order.buyer_id, penalty.amount
                );
                created.push(penalty);
            }
            Ok(None) => {}
            Err(e) => error!(
                "{:<12} --> 주문 연체 위약금 생성 실패 (주문 {}): {:?}",
                "Penalty", order.id, e
            ),
        }
    }

    Ok(created)
}

/// 두 정책을 모두 실행하고 생성된 위약금 전부를 반환
pub async fn sweep_overdue_payments(
    db_manager: &DatabaseManager,
    sink: &impl NotificationSink,
) -> Result<Vec<Penalty>> {
    let mut created = sweep_auction_overdues(db_manager, sink).await?;
    created.extend(sweep_order_overdues(db_manager).await?);
    Ok(created)
}

// endregion: --- Sweeps

// region:    --- Transitions

/// 위약금 납부 처리 (pending -> paid)
pub async fn mark_as_paid(db_manager: &DatabaseManager, penalty_id: i64) -> Result<Penalty> {
    info!("{:<12} --> 위약금 납부 처리 id: {}", "Penalty", penalty_id);
    transition(db_manager, penalty_id, queries::MARK_PENALTY_PAID).await
}

/// 위약금 강제 집행 처리 (pending -> enforced)
pub async fn enforce(db_manager: &DatabaseManager, penalty_id: i64) -> Result<Penalty> {
    info!(
        "{:<12} --> 위약금 강제 집행 처리 id: {}",
        "Penalty", penalty_id
    );
    transition(db_manager, penalty_id, queries::ENFORCE_PENALTY).await
}

/// pending 상태에서만 허용되는 상태 전이 공통 처리
async fn transition(
    db_manager: &DatabaseManager,
    penalty_id: i64,
    query: &'static str,
) -> Result<Penalty> {
    let updated = sqlx::query_as::<_, Penalty>(query)
        .bind(penalty_id)
        .bind(Utc::now())
        .fetch_optional(&*db_manager.pool)
        .await?;

    if let Some(penalty) = updated {
        return Ok(penalty);
    }

    // 전이 실패 원인 구분: 없는 위약금인지, 이미 종단 상태인지
    let existing = sqlx::query_as::<_, Penalty>(queries::GET_PENALTY)
        .bind(penalty_id)
        .fetch_optional(&*db_manager.pool)
        .await?;
    match existing {
        Some(_) => Err(AppError::InvalidState("Penalty is not pending")),
        None => Err(AppError::NotFound("Penalty")),
    }
}

// endregion: --- Transitions
