use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 입찰 모델 (추가 전용: 수정/삭제 없음)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub auction_id: i64,
    pub user_id: i64,
    pub bid_amount: i64,
    pub bid_time: DateTime<Utc>,
}

// 입찰자 정보가 조인된 입찰 이력 (표시용)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BidWithBidder {
    pub id: i64,
    pub auction_id: i64,
    pub user_id: i64,
    pub bid_amount: i64,
    pub bid_time: DateTime<Utc>,
    pub bidder_name: Option<String>,
    pub bidder_image: Option<String>,
}
