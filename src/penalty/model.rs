// region:    --- Imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// endregion: --- Imports

// region:    --- Constants
/// 주문 결제 유예 시간 (시간)
pub const ORDER_OVERDUE_HOURS: i64 = 24;

/// 위약금 상태
pub mod status {
    pub const PENDING: &str = "pending";
    pub const PAID: &str = "paid";
    pub const ENFORCED: &str = "enforced";
}

/// 위약금 사유
pub mod reason {
    pub const NON_PAYMENT_OVERDUE: &str = "non_payment_overdue";
    pub const ORDER_PAYMENT_OVERDUE: &str = "order_payment_overdue";
}
// endregion: --- Constants

// region:    --- Models
/// 위약금 모델
/// 발생 경로가 두 가지다: 낙찰 후 미결제(auction_id/product_id 참조)와
/// 주문 후 미결제(order_id 참조). 생성은 주기 점검만 하며 삭제하지 않는다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Penalty {
    pub id: i64,
    pub user_id: i64,
    pub auction_id: Option<i64>,
    pub product_id: Option<i64>,
    pub order_id: Option<i64>,
    pub amount: i64,
    pub reason: String,
    pub payment_deadline: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub enforced_at: Option<DateTime<Utc>>,
}

/// 주문 모델: 별도 서비스가 소유하며 여기서는 연체 판정에만 읽는다
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub buyer_id: i64,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

/// 주문 연체 위약금: 주문 총액의 10% (정수 PKR, 내림)
pub fn order_penalty_amount(total_amount: i64) -> i64 {
    total_amount / 10
}
// endregion: --- Models

// endregion: --- Tests
