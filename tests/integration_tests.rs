use chrono::{Duration, Utc};
use marketplace_auction_service::auction::engine::{self, CreateAuctionCommand};
use marketplace_auction_service::auction::model::{closed_by, status, Auction};
use marketplace_auction_service::bidding::commands::{handle_place_bid, PlaceBidCommand};
use marketplace_auction_service::database::DatabaseManager;
use marketplace_auction_service::error::AppError;
use marketplace_auction_service::notification::commands as notification_commands;
use marketplace_auction_service::notification::emitter::PostgresNotificationSink;
use marketplace_auction_service::notification::model::kind;
use marketplace_auction_service::penalty::assessor;
use marketplace_auction_service::penalty::model::{reason, status as penalty_status};
use marketplace_auction_service::query;
use std::sync::Arc;
use tokio::sync::OnceCell;

static SCHEMA: OnceCell<()> = OnceCell::const_new();

/// 데이터베이스 매니저 설정 (DATABASE_URL 미설정 시 테스트 건너뜀)
/// 각 #[tokio::test]는 자기 런타임을 가지므로 풀은 테스트마다 새로 만든다
/// (런타임 종료 후 남은 커넥션을 다른 테스트가 집으면 깨어나지 못한다).
/// 스키마 초기화만 한 번 수행한다.
async fn setup() -> Option<Arc<DatabaseManager>> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL 미설정: 통합 테스트 건너뜀");
        return None;
    }
    let db = Arc::new(DatabaseManager::new().await);
    SCHEMA
        .get_or_init(|| async {
            db.initialize_database().await.expect("스키마 초기화 실패");
        })
        .await;
    Some(db)
}

/// 테스트용 사용자 생성
async fn create_test_user(db: &DatabaseManager, name: &str) -> i64 {
    let name = name.to_string();
    db.transaction(|tx| {
        Box::pin(async move {
            sqlx::query_scalar::<_, i64>(
                "INSERT INTO users (name, image) VALUES ($1, NULL) RETURNING id",
            )
            .bind(&name)
            .fetch_one(&mut **tx)
            .await
        })
    })
    .await
    .unwrap()
}

/// 테스트용 매물 생성
async fn create_test_listing(db: &DatabaseManager, seller_id: i64, price: i64) -> i64 {
    db.transaction(|tx| {
        Box::pin(async move {
            sqlx::query_scalar::<_, i64>(
                "INSERT INTO listings (name, description, price, seller_id, condition, is_auction)
                 VALUES ($1, $2, $3, $4, 'Used', TRUE)
                 RETURNING id",
            )
            .bind("Test part")
            .bind("Integration test listing")
            .bind(price)
            .bind(seller_id)
            .fetch_one(&mut **tx)
            .await
        })
    })
    .await
    .unwrap()
}

/// 테스트용 경매 생성 (1시간 뒤 종료)
async fn create_test_auction(db: &DatabaseManager, seller_id: i64, start_price: i64) -> Auction {
    let listing_id = create_test_listing(db, seller_id, start_price).await;
    engine::create_for_listing(
        db,
        CreateAuctionCommand {
            listing_id,
            seller_id,
            start_price,
            end_time: Some(Utc::now() + Duration::hours(1)),
        },
    )
    .await
    .unwrap()
}

/// 경매 종료 시간을 과거로 옮기기 (만료 시나리오용)
async fn expire_auction(db: &DatabaseManager, auction_id: i64) {
    db.transaction(|tx| {
        Box::pin(async move {
            sqlx::query("UPDATE auctions SET end_time = $1 WHERE id = $2")
                .bind(Utc::now() - Duration::seconds(5))
                .bind(auction_id)
                .execute(&mut **tx)
                .await
        })
    })
    .await
    .unwrap();
}

fn bid_cmd(auction_id: i64, user_id: i64, amount: i64) -> PlaceBidCommand {
    PlaceBidCommand {
        auction_id: Some(auction_id),
        user_id: Some(user_id),
        bid_amount: Some(amount),
    }
}

/// 경매 생성 기본값 테스트
#[tokio::test]
async fn test_create_auction_defaults() {
    let Some(db) = setup().await else { return };
    let seller = create_test_user(&db, "seller-defaults").await;
    let listing_id = create_test_listing(&db, seller, 1000).await;

    let before = Utc::now();
    let auction = engine::create_for_listing(
        &db,
        CreateAuctionCommand {
            listing_id,
            seller_id: seller,
            start_price: 1000,
            end_time: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(auction.status, status::ACTIVE);
    assert_eq!(auction.start_price, 1000);
    assert_eq!(auction.current_price, 1000);
    assert_eq!(auction.total_bids, 0);
    assert_eq!(auction.winner_id, None);
    // 종료 시간 미지정 시 7일 뒤
    let expected_end = before + Duration::days(7);
    assert!((auction.end_time - expected_end).num_seconds().abs() < 60);

    // 매물당 경매는 1건
    let err = engine::create_for_listing(
        &db,
        CreateAuctionCommand {
            listing_id,
            seller_id: seller,
            start_price: 2000,
            end_time: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

/// 입찰 시나리오: 같은 금액은 거절, 더 높은 금액은 수락
#[tokio::test]
async fn test_place_bid_rejects_equal_and_accepts_higher() {
    let Some(db) = setup().await else { return };
    let seller = create_test_user(&db, "seller-bid").await;
    let bidder = create_test_user(&db, "bidder-bid").await;
    let auction = create_test_auction(&db, seller, 1000).await;

    // 현재 가격과 같은 입찰은 거절
    let err = handle_place_bid(&db, bid_cmd(auction.id, bidder, 1000))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::BidTooLow {
            current_price: 1000
        }
    ));
    assert_eq!(
        err.to_string(),
        "Bid must be greater than the current bid of PKR 1000"
    );

    // 더 높은 입찰은 수락
    let (bid, updated) = handle_place_bid(&db, bid_cmd(auction.id, bidder, 1500))
        .await
        .unwrap();
    assert_eq!(bid.bid_amount, 1500);
    assert_eq!(updated.current_price, 1500);
    assert_eq!(updated.winner_id, Some(bidder));
    assert_eq!(updated.total_bids, 1);
    assert!(updated.current_price >= updated.start_price);
}

/// 판매자 본인 입찰 거절, 경매는 변경 없음
#[tokio::test]
async fn test_seller_cannot_bid_leaves_auction_unchanged() {
    let Some(db) = setup().await else { return };
    let seller = create_test_user(&db, "seller-self").await;
    let auction = create_test_auction(&db, seller, 1000).await;

    let err = handle_place_bid(&db, bid_cmd(auction.id, seller, 1500))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SellerCannotBid));

    let after = query::handlers::get_auction(&db, auction.id).await.unwrap();
    assert_eq!(after.current_price, 1000);
    assert_eq!(after.total_bids, 0);
    assert_eq!(after.winner_id, None);
}

/// 필수 필드 누락 거절
#[tokio::test]
async fn test_missing_fields_rejected() {
    let Some(db) = setup().await else { return };
    let err = handle_place_bid(
        &db,
        PlaceBidCommand {
            auction_id: Some(1),
            user_id: None,
            bid_amount: Some(100),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::MissingFields));
}

/// 금액 검증은 경매 조회보다 먼저다: 없는 경매라도 0 이하 금액은 InvalidAmount
#[tokio::test]
async fn test_invalid_amount_rejected_before_auction_lookup() {
    let Some(db) = setup().await else { return };
    let err = handle_place_bid(&db, bid_cmd(-1, 1, 0)).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount));
    let err = handle_place_bid(&db, bid_cmd(-1, 1, -100)).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount));

    // 양수 금액이면 이제서야 경매 존재 확인이 실패한다
    let err = handle_place_bid(&db, bid_cmd(-1, 1, 100)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

/// 만료 종료 후 재종료는 InvalidState
#[tokio::test]
async fn test_close_expired_then_invalid_state() {
    let Some(db) = setup().await else { return };
    let sink = PostgresNotificationSink::new(db.get_pool());
    let seller = create_test_user(&db, "seller-expired").await;
    let auction = create_test_auction(&db, seller, 1000).await;

    // 아직 끝나지 않은 경매는 NotYetEnded
    let err = engine::close_expired(&db, &sink, auction.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotYetEnded));

    expire_auction(&db, auction.id).await;

    // 동시 실행 중인 일괄 종료 테스트가 먼저 닫았더라도 최종 상태는 같다
    match engine::close_expired(&db, &sink, auction.id).await {
        Ok(_) => {}
        Err(AppError::InvalidState(_)) => {}
        Err(e) => panic!("예상치 못한 오류: {e:?}"),
    }
    let closed = query::handlers::get_auction(&db, auction.id).await.unwrap();
    assert_eq!(closed.status, status::CLOSED);
    assert_eq!(closed.closed_by.as_deref(), Some(closed_by::TIME_EXPIRED));
    assert!(closed.closed_at.is_some());

    // 두 번째 종료 시도는 InvalidState
    let err = engine::close_expired(&db, &sink, auction.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

/// 판매자 종료: 권한 검증과 결제 기한, 알림 발행
#[tokio::test]
async fn test_close_by_seller_sets_deadline_and_notifies() {
    let Some(db) = setup().await else { return };
    let sink = PostgresNotificationSink::new(db.get_pool());
    let seller = create_test_user(&db, "seller-close").await;
    let winner = create_test_user(&db, "winner-close").await;
    let loser = create_test_user(&db, "loser-close").await;
    let auction = create_test_auction(&db, seller, 1000).await;

    handle_place_bid(&db, bid_cmd(auction.id, loser, 1200))
        .await
        .unwrap();
    handle_place_bid(&db, bid_cmd(auction.id, winner, 1500))
        .await
        .unwrap();

    // 판매자가 아닌 사용자는 종료할 수 없다
    let err = engine::close_by_seller(&db, &sink, auction.id, winner)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    let closed = engine::close_by_seller(&db, &sink, auction.id, seller)
        .await
        .unwrap();
    assert_eq!(closed.status, status::CLOSED);
    assert_eq!(closed.closed_by.as_deref(), Some(closed_by::SELLER_CLOSED));
    assert_eq!(closed.winner_id, Some(winner));

    // 결제 기한은 종료 시각 + 3일
    let closed_at = closed.closed_at.unwrap();
    let deadline = closed.payment_deadline.unwrap();
    assert_eq!(deadline, closed_at + Duration::days(3));

    // 낙찰자에게는 낙찰 알림, 나머지 입찰자에게는 종료 알림
    let winner_page = notification_commands::list_for_user(&db, winner, false, None, None)
        .await
        .unwrap();
    assert!(winner_page
        .notifications
        .iter()
        .any(|n| n.kind == kind::AUCTION_WON && n.auction_id == Some(auction.id)));
    let loser_page = notification_commands::list_for_user(&db, loser, false, None, None)
        .await
        .unwrap();
    assert!(loser_page
        .notifications
        .iter()
        .any(|n| n.kind == kind::AUCTION_ENDED && n.auction_id == Some(auction.id)));
}

/// 입찰 없는 종료: 결제 기한 없음, 알림 발행 없음
#[tokio::test]
async fn test_close_without_bids_has_no_deadline_or_notifications() {
    let Some(db) = setup().await else { return };
    let sink = PostgresNotificationSink::new(db.get_pool());
    let seller = create_test_user(&db, "seller-no-bids").await;
    let auction = create_test_auction(&db, seller, 1000).await;

    let closed = engine::close_by_seller(&db, &sink, auction.id, seller)
        .await
        .unwrap();
    assert_eq!(closed.status, status::CLOSED);
    assert_eq!(closed.winner_id, None);
    // 낙찰자가 없으면 결제 기한도 설정되지 않는다
    assert_eq!(closed.payment_deadline, None);
    assert!(closed.closed_at.is_some());

    let notifications: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE auction_id = $1")
            .bind(auction.id)
            .fetch_one(&*db.pool)
            .await
            .unwrap();
    assert_eq!(notifications, 0);
}

/// 연체 낙찰 경매 점검: 의무당 위약금 1건 (재점검에도 중복 생성 없음)
#[tokio::test]
async fn test_overdue_auction_creates_exactly_one_penalty() {
    let Some(db) = setup().await else { return };
    let sink = PostgresNotificationSink::new(db.get_pool());
    let seller = create_test_user(&db, "seller-overdue").await;
    let winner = create_test_user(&db, "winner-overdue").await;
    let auction = create_test_auction(&db, seller, 1000).await;

    handle_place_bid(&db, bid_cmd(auction.id, winner, 2500))
        .await
        .unwrap();
    let closed = engine::close_by_seller(&db, &sink, auction.id, seller)
        .await
        .unwrap();
    assert!(closed.payment_deadline.is_some());

    // 결제 기한을 과거로 옮겨 연체 상태로 만든다
    let auction_id = auction.id;
    db.transaction(|tx| {
        Box::pin(async move {
            sqlx::query("UPDATE auctions SET payment_deadline = $1 WHERE id = $2")
                .bind(Utc::now() - Duration::days(1))
                .bind(auction_id)
                .execute(&mut **tx)
                .await
        })
    })
    .await
    .unwrap();

    let created = assessor::sweep_auction_overdues(&db, &sink).await.unwrap();
    let penalty = created
        .iter()
        .find(|p| p.auction_id == Some(auction.id))
        .expect("연체 경매 위약금이 생성되어야 한다");
    assert_eq!(penalty.user_id, winner);
    assert_eq!(penalty.amount, 2500);
    assert_eq!(penalty.reason, reason::NON_PAYMENT_OVERDUE);
    assert_eq!(penalty.status, penalty_status::PENDING);

    // 재점검해도 같은 의무에 대해 추가 생성 없음
    let again = assessor::sweep_auction_overdues(&db, &sink).await.unwrap();
    assert!(again.iter().all(|p| p.auction_id != Some(auction.id)));
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM penalties WHERE auction_id = $1")
        .bind(auction.id)
        .fetch_one(&*db.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // 낙찰자에게 연체 알림이 발행되었다
    let page = notification_commands::list_for_user(&db, winner, false, None, None)
        .await
        .unwrap();
    assert!(page
        .notifications
        .iter()
        .any(|n| n.kind == kind::PAYMENT_OVERDUE && n.auction_id == Some(auction.id)));
}

/// 주문 기반 연체 점검: 10% 위약금, 주문당 1건, 결제 완료 주문은 제외
#[tokio::test]
async fn test_overdue_order_penalty() {
    let Some(db) = setup().await else { return };
    let buyer = create_test_user(&db, "buyer-overdue").await;
    let past = Utc::now() - Duration::hours(25);

    let overdue_order: i64 = sqlx::query_scalar(
        "INSERT INTO orders (buyer_id, total_amount, created_at) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(buyer)
    .bind(3000_i64)
    .bind(past)
    .fetch_one(&*db.pool)
    .await
    .unwrap();

    // 결제 완료된 오래된 주문은 점검 대상이 아니다
    let paid_order: i64 = sqlx::query_scalar(
        "INSERT INTO orders (buyer_id, total_amount, created_at) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(buyer)
    .bind(5000_i64)
    .bind(past)
    .fetch_one(&*db.pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO payments (order_id, amount, status) VALUES ($1, $2, 'completed')")
        .bind(paid_order)
        .bind(5000_i64)
        .execute(&*db.pool)
        .await
        .unwrap();

    let created = assessor::sweep_order_overdues(&db).await.unwrap();
    let penalty = created
        .iter()
        .find(|p| p.order_id == Some(overdue_order))
        .expect("연체 주문 위약금이 생성되어야 한다");
    assert_eq!(penalty.amount, 300);
    assert_eq!(penalty.reason, reason::ORDER_PAYMENT_OVERDUE);
    assert!(created.iter().all(|p| p.order_id != Some(paid_order)));

    // 재점검에도 중복 생성 없음
    let again = assessor::sweep_order_overdues(&db).await.unwrap();
    assert!(again.iter().all(|p| p.order_id != Some(overdue_order)));

    // 납부 처리 후 재납부/집행은 InvalidState
    let paid = assessor::mark_as_paid(&db, penalty.id).await.unwrap();
    assert_eq!(paid.status, penalty_status::PAID);
    assert!(paid.paid_at.is_some());
    let err = assessor::enforce(&db, penalty.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

/// 취소: 입찰 기록은 남고 알림/위약금 부수효과 없음
#[tokio::test]
async fn test_cancel_keeps_bids_without_side_effects() {
    let Some(db) = setup().await else { return };
    let seller = create_test_user(&db, "seller-cancel").await;
    let bidder = create_test_user(&db, "bidder-cancel").await;
    let auction = create_test_auction(&db, seller, 1000).await;

    handle_place_bid(&db, bid_cmd(auction.id, bidder, 1500))
        .await
        .unwrap();

    let before = notification_commands::list_for_user(&db, bidder, false, None, None)
        .await
        .unwrap();

    let cancelled = engine::cancel(&db, auction.id).await.unwrap();
    assert_eq!(cancelled.status, status::CANCELLED);
    assert_eq!(cancelled.closed_by.as_deref(), Some(closed_by::CANCELLED));
    assert_eq!(cancelled.payment_deadline, None);

    // 기존 입찰 기록은 그대로 남는다
    let bids = query::handlers::get_bid_history(&db, auction.id).await.unwrap();
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].bid_amount, 1500);

    // 알림/위약금 부수효과 없음
    let after = notification_commands::list_for_user(&db, bidder, false, None, None)
        .await
        .unwrap();
    assert_eq!(after.total, before.total);
    let penalties: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM penalties WHERE auction_id = $1")
        .bind(auction.id)
        .fetch_one(&*db.pool)
        .await
        .unwrap();
    assert_eq!(penalties, 0);

    // 취소된 경매는 재취소/입찰 불가
    let err = engine::cancel(&db, auction.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    let err = handle_place_bid(&db, bid_cmd(auction.id, bidder, 2000))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuctionNotActive));
}

/// 만료 경매 일괄 종료는 멱등: 재실행해도 이미 종료된 경매는 건드리지 않는다
#[tokio::test]
async fn test_sweep_expired_is_idempotent() {
    let Some(db) = setup().await else { return };
    let sink = PostgresNotificationSink::new(db.get_pool());
    let seller = create_test_user(&db, "seller-sweep").await;
    let a1 = create_test_auction(&db, seller, 1000).await;
    let a2 = create_test_auction(&db, create_test_user(&db, "seller-sweep-2").await, 1000).await;
    expire_auction(&db, a1.id).await;
    expire_auction(&db, a2.id).await;

    engine::sweep_expired(&db, &sink).await.unwrap();

    let c1 = query::handlers::get_auction(&db, a1.id).await.unwrap();
    let c2 = query::handlers::get_auction(&db, a2.id).await.unwrap();
    assert_eq!(c1.status, status::CLOSED);
    assert_eq!(c2.status, status::CLOSED);
    assert_eq!(c1.closed_by.as_deref(), Some(closed_by::TIME_EXPIRED));
    // 입찰 없이 만료된 경매에는 결제 기한이 붙지 않는다
    assert_eq!(c1.payment_deadline, None);

    // 재실행해도 종료 시각이 바뀌지 않는다
    engine::sweep_expired(&db, &sink).await.unwrap();
    let c1_again = query::handlers::get_auction(&db, a1.id).await.unwrap();
    assert_eq!(c1_again.closed_at, c1.closed_at);
}

/// 동시 입찰: 조건부 업데이트로 현재 가격이 단조 증가하고 낙찰 후보가 최고가와 일치한다
#[tokio::test]
async fn test_concurrent_bids_keep_price_monotonic() {
    let Some(db) = setup().await else { return };
    let seller = create_test_user(&db, "seller-concurrent").await;
    let auction = create_test_auction(&db, seller, 1000).await;

    let mut handles = vec![];
    for i in 1..=20i64 {
        let db = Arc::clone(&db);
        let bidder = create_test_user(&db, &format!("bidder-concurrent-{i}")).await;
        let auction_id = auction.id;
        let amount = 1000 + i * 100;
        handles.push(tokio::spawn(async move {
            handle_place_bid(&db, bid_cmd(auction_id, bidder, amount))
                .await
                .map(|(bid, _)| (bidder, bid.bid_amount))
        }));
    }

    let mut accepted = vec![];
    for handle in handles {
        if let Ok(result) = handle.await.unwrap() {
            accepted.push(result);
        }
    }
    assert!(!accepted.is_empty());

    let final_auction = query::handlers::get_auction(&db, auction.id).await.unwrap();
    let max_accepted = accepted.iter().map(|(_, amount)| *amount).max().unwrap();
    // 최고 수락 입찰이 곧 현재 가격이고, 낙찰 후보는 그 입찰자다
    assert_eq!(final_auction.current_price, max_accepted);
    let top_bidder = accepted
        .iter()
        .find(|(_, amount)| *amount == max_accepted)
        .map(|(bidder, _)| *bidder);
    assert_eq!(final_auction.winner_id, top_bidder);
    assert_eq!(final_auction.total_bids, accepted.len() as i64);
    assert!(final_auction.current_price >= final_auction.start_price);

    // 수락된 입찰 기록 수와 total_bids가 일치한다
    let history = query::handlers::get_bid_history(&db, auction.id).await.unwrap();
    assert_eq!(history.len(), accepted.len());
}

/// 알림 조회/읽음 처리
#[tokio::test]
async fn test_notification_pagination_and_read_state() {
    let Some(db) = setup().await else { return };
    let sink = PostgresNotificationSink::new(db.get_pool());
    let user = create_test_user(&db, "notify-user").await;

    use marketplace_auction_service::notification::emitter::NotificationSink;
    use marketplace_auction_service::notification::model::NotificationDraft;
    for i in 1..=5i64 {
        sink.emit(NotificationDraft::auction_ended(user, i, i))
            .await
            .unwrap();
    }

    let page = notification_commands::list_for_user(&db, user, false, Some(3), None)
        .await
        .unwrap();
    assert_eq!(page.notifications.len(), 3);
    assert_eq!(page.total, 5);
    assert_eq!(page.unread, 5);

    let first = page.notifications[0].id;
    let read = notification_commands::mark_read(&db, first).await.unwrap();
    assert!(read.is_read);

    let unread_page = notification_commands::list_for_user(&db, user, true, None, None)
        .await
        .unwrap();
    assert_eq!(unread_page.unread, 4);
    assert!(unread_page.notifications.iter().all(|n| !n.is_read));

    let updated = notification_commands::mark_all_read(&db, user).await.unwrap();
    assert_eq!(updated, 4);

    notification_commands::delete(&db, first).await.unwrap();
    let err = notification_commands::delete(&db, first).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

/// 경매 상세 조회: 매물, 입찰 수, 상위 입찰 포함
#[tokio::test]
async fn test_auction_details_aggregate() {
    let Some(db) = setup().await else { return };
    let seller = create_test_user(&db, "seller-details").await;
    let auction = create_test_auction(&db, seller, 1000).await;

    for i in 1..=7i64 {
        let bidder = create_test_user(&db, &format!("bidder-details-{i}")).await;
        handle_place_bid(&db, bid_cmd(auction.id, bidder, 1000 + i * 100))
            .await
            .unwrap();
    }

    let details = engine::get_details(&db, auction.id).await.unwrap();
    assert_eq!(details.auction.id, auction.id);
    assert_eq!(details.listing.id, auction.part_id);
    assert_eq!(details.bid_count, 7);
    assert_eq!(details.top_bids.len(), 5);
    // 상위 입찰은 금액 내림차순
    assert_eq!(details.top_bids[0].bid_amount, 1700);
    assert!(details
        .top_bids
        .windows(2)
        .all(|w| w[0].bid_amount >= w[1].bid_amount));

    let err = engine::get_details(&db, -1).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
