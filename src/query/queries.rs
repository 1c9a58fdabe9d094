//! 서비스에서 사용하는 모든 SQL 문

/// 경매 조회
pub const GET_AUCTION: &str = "SELECT id, part_id, seller_id, start_price, current_price, start_time, end_time, status, winner_id, payment_deadline, total_bids, closed_at, closed_by, created_at FROM auctions WHERE id = $1";

/// 매물(상품) 조회
pub const GET_LISTING: &str = "SELECT id, name, description, price, seller_id, category_id, condition, is_auction, status, created_at FROM listings WHERE id = $1";

/// 경매 생성
pub const CREATE_AUCTION: &str = r#"
    INSERT INTO auctions (part_id, seller_id, start_price, current_price, start_time, end_time, status)
    VALUES ($1, $2, $3, $3, $4, $5, 'Active')
    RETURNING id, part_id, seller_id, start_price, current_price, start_time, end_time, status, winner_id, payment_deadline, total_bids, closed_at, closed_by, created_at
"#;

/// 입찰 수락: 현재 가격보다 높고 아직 진행 중인 경우에만 갱신 (조건부 업데이트)
pub const ACCEPT_BID: &str = r#"
    UPDATE auctions
    SET current_price = $2, winner_id = $3, total_bids = total_bids + 1
    WHERE id = $1 AND status = 'Active' AND current_price < $2 AND end_time >= $4
    RETURNING id, part_id, seller_id, start_price, current_price, start_time, end_time, status, winner_id, payment_deadline, total_bids, closed_at, closed_by, created_at
"#;

/// 입찰 기록 추가
pub const INSERT_BID: &str = r#"
    INSERT INTO bids (auction_id, user_id, bid_amount, bid_time)
    VALUES ($1, $2, $3, $4)
    RETURNING id, auction_id, user_id, bid_amount, bid_time
"#;

/// 경매 종료: Active 상태인 경우에만 종료 처리 (동시 종료 경합 방지)
/// 낙찰자가 있는 경우에만 결제 기한($4)을 설정한다.
pub const CLOSE_AUCTION: &str = r#"
    UPDATE auctions
    SET status = 'Closed',
        closed_at = $2,
        closed_by = $3,
        payment_deadline = CASE WHEN winner_id IS NULL THEN NULL ELSE $4 END
    WHERE id = $1 AND status = 'Active'
    RETURNING id, part_id, seller_id, start_price, current_price, start_time, end_time, status, winner_id, payment_deadline, total_bids, closed_at, closed_by, created_at
"#;

/// 경매 취소: 결제 기한과 알림 없이 상태만 변경
pub const CANCEL_AUCTION: &str = r#"
    UPDATE auctions
    SET status = 'Cancelled', closed_at = $2, closed_by = 'cancelled'
    WHERE id = $1 AND status = 'Active'
    RETURNING id, part_id, seller_id, start_price, current_price, start_time, end_time, status, winner_id, payment_deadline, total_bids, closed_at, closed_by, created_at
"#;

/// 만료된 진행 중 경매 id 조회
pub const GET_EXPIRED_ACTIVE_AUCTION_IDS: &str =
    "SELECT id FROM auctions WHERE status = 'Active' AND end_time <= $1 ORDER BY end_time";

/// 입찰 수 조회
pub const COUNT_BIDS: &str = "SELECT COUNT(*) FROM bids WHERE auction_id = $1";

/// 상위 입찰 조회 (금액 내림차순, 상위 5건)
pub const GET_TOP_BIDS: &str = r#"
    SELECT id, auction_id, user_id, bid_amount, bid_time
    FROM bids
    WHERE auction_id = $1
    ORDER BY bid_amount DESC, bid_time ASC
    LIMIT 5
"#;

/// 경매별 입찰 이력 조회 (최신순, 입찰자 이름/이미지 조인)
pub const GET_BIDS_BY_AUCTION: &str = r#"
    SELECT b.id, b.auction_id, b.user_id, b.bid_amount, b.bid_time, u.name AS bidder_name, u.image AS bidder_image
    FROM bids b
    LEFT JOIN users u ON u.id = b.user_id
    WHERE b.auction_id = $1
    ORDER BY b.bid_time DESC
"#;

/// 사용자별 입찰 이력 조회 (최신순)
pub const GET_BIDS_BY_USER: &str = r#"
    SELECT id, auction_id, user_id, bid_amount, bid_time
    FROM bids
    WHERE user_id = $1
    ORDER BY bid_time DESC
"#;

/// 최고 입찰가 조회
pub const GET_HIGHEST_BID: &str =
    "SELECT MAX(bid_amount) AS highest_bid FROM bids WHERE auction_id = $1";

/// 낙찰자를 제외한 경매 입찰자 목록 조회
pub const GET_DISTINCT_BIDDERS_EXCEPT: &str =
    "SELECT DISTINCT user_id FROM bids WHERE auction_id = $1 AND user_id != $2";

/// 알림 생성
pub const INSERT_NOTIFICATION: &str = r#"
    INSERT INTO notifications (user_id, type, title, message, auction_id, product_id, is_read)
    VALUES ($1, $2, $3, $4, $5, $6, FALSE)
    RETURNING id, user_id, type, title, message, auction_id, product_id, is_read, created_at
"#;

/// 사용자 알림 조회 (최신순, 페이지네이션)
pub const GET_NOTIFICATIONS: &str = r#"
    SELECT id, user_id, type, title, message, auction_id, product_id, is_read, created_at
    FROM notifications
    WHERE user_id = $1 AND ($2 = FALSE OR is_read = FALSE)
    ORDER BY created_at DESC
    LIMIT $3 OFFSET $4
"#;

/// 사용자 알림 수 조회
pub const COUNT_NOTIFICATIONS: &str =
    "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND ($2 = FALSE OR is_read = FALSE)";

/// 알림 읽음 처리
pub const MARK_NOTIFICATION_READ: &str = r#"
    UPDATE notifications SET is_read = TRUE WHERE id = $1
    RETURNING id, user_id, type, title, message, auction_id, product_id, is_read, created_at
"#;

/// 사용자 알림 일괄 읽음 처리
pub const MARK_ALL_NOTIFICATIONS_READ: &str =
    "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE";

/// 알림 삭제
pub const DELETE_NOTIFICATION: &str = "DELETE FROM notifications WHERE id = $1";

/// 결제 기한이 지난 낙찰 경매 조회
pub const GET_OVERDUE_AUCTIONS: &str = r#"
    SELECT id, part_id, seller_id, start_price, current_price, start_time, end_time, status, winner_id, payment_deadline, total_bids, closed_at, closed_by, created_at
    FROM auctions
    WHERE status = 'Closed' AND winner_id IS NOT NULL AND payment_deadline <= $1
"#;

/// 경매 기반 위약금 생성 (진행 중 위약금이 이미 있으면 무시: 조건부 삽입)
pub const INSERT_AUCTION_PENALTY: &str = r#"
    INSERT INTO penalties (user_id, auction_id, product_id, amount, reason, payment_deadline, status)
    VALUES ($1, $2, $3, $4, $5, $6, 'pending')
    ON CONFLICT (auction_id) WHERE auction_id IS NOT NULL AND status = 'pending' DO NOTHING
    RETURNING id, user_id, auction_id, product_id, order_id, amount, reason, payment_deadline, status, created_at, paid_at, enforced_at
"#;

/// 24시간이 지나도록 결제 완료되지 않은 주문 조회
pub const GET_OVERDUE_ORDERS: &str = r#"
    SELECT o.id, o.buyer_id, o.total_amount, o.created_at
    FROM orders o
    WHERE o.created_at <= $1
      AND NOT EXISTS (
          SELECT 1 FROM payments p WHERE p.order_id = o.id AND p.status = 'completed'
      )
      AND NOT EXISTS (
          SELECT 1 FROM penalties pe WHERE pe.order_id = o.id
      )
"#;

/// 주문 기반 위약금 생성 (주문당 1건: 조건부 삽입)
pub const INSERT_ORDER_PENALTY: &str = r#"
    INSERT INTO penalties (user_id, order_id, amount, reason, status)
    VALUES ($1, $2, $3, $4, 'pending')
    ON CONFLICT (order_id) WHERE order_id IS NOT NULL DO NOTHING
    RETURNING id, user_id, auction_id, product_id, order_id, amount, reason, payment_deadline, status, created_at, paid_at, enforced_at
"#;

/// 위약금 조회
pub const GET_PENALTY: &str = "SELECT id, user_id, auction_id, product_id, order_id, amount, reason, payment_deadline, status, created_at, paid_at, enforced_at FROM penalties WHERE id = $1";

/// 위약금 납부 처리 (pending 상태에서만)
pub const MARK_PENALTY_PAID: &str = r#"
    UPDATE penalties SET status = 'paid', paid_at = $2
    WHERE id = $1 AND status = 'pending'
    RETURNING id, user_id, auction_id, product_id, order_id, amount, reason, payment_deadline, status, created_at, paid_at, enforced_at
"#;

/// 위약금 강제 집행 처리 (pending 상태에서만)
pub const ENFORCE_PENALTY: &str = r#"
    UPDATE penalties SET status = 'enforced', enforced_at = $2
    WHERE id = $1 AND status = 'pending'
    RETURNING id, user_id, auction_id, product_id, order_id, amount, reason, payment_deadline, status, created_at, paid_at, enforced_at
"#;
