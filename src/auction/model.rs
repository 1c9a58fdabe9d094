// region:    --- Imports
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// endregion: --- Imports

// region:    --- Constants
/// 낙찰 후 결제 기한 (일)
pub const PAYMENT_DEADLINE_DAYS: i64 = 3;

/// 종료 시간 미지정 시 기본 경매 기간 (일)
pub const DEFAULT_AUCTION_DAYS: i64 = 7;

/// 경매 상태
pub mod status {
    pub const ACTIVE: &str = "Active";
    pub const CLOSED: &str = "Closed";
    pub const CANCELLED: &str = "Cancelled";
}

/// 경매 종료 사유
pub mod closed_by {
    pub const TIME_EXPIRED: &str = "time_expired";
    pub const SELLER_CLOSED: &str = "seller_closed";
    pub const CANCELLED: &str = "cancelled";
}
// endregion: --- Constants

// region:    --- Models
/// 경매 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Auction {
    pub id: i64,
    pub part_id: i64,
    pub seller_id: i64,
    pub start_price: i64,
    pub current_price: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub winner_id: Option<i64>,
    pub payment_deadline: Option<DateTime<Utc>>,
    pub total_bids: i64,
    pub closed_at: Option<DateTime<Utc>>,
    pub closed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 매물(상품) 모델: 별도 서비스가 소유하며 여기서는 조회만 한다
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub seller_id: i64,
    pub category_id: Option<i64>,
    pub condition: String,
    pub is_auction: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Auction {
    pub fn is_active(&self) -> bool {
        self.status == status::ACTIVE
    }

    /// 입찰 마감 여부 (end_time까지의 입찰은 유효)
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now > self.end_time
    }
}

/// 낙찰자 결제 기한 계산: 종료 시각 + 3일
pub fn payment_deadline_from(closed_at: DateTime<Utc>) -> DateTime<Utc> {
    closed_at + Duration::days(PAYMENT_DEADLINE_DAYS)
}

/// 종료 시간 기본값 적용: 미지정 시 now + 7일
pub fn end_time_or_default(end_time: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    end_time.unwrap_or_else(|| now + Duration::days(DEFAULT_AUCTION_DAYS))
}
// endregion: --- Models

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_auction(now: DateTime<Utc>) -> Auction {
        Auction {
            id: 1,
            part_id: 10,
            seller_id: 100,
            start_price: 1000,
            current_price: 1000,
            start_time: now - Duration::hours(1),
            end_time: now + Duration::hours(1),
            status: status::ACTIVE.to_string(),
            winner_id: None,
            payment_deadline: None,
            total_bids: 0,
            closed_at: None,
            closed_by: None,
            created_at: now - Duration::hours(1),
        }
    }

    #[test]
    fn test_payment_deadline_is_three_days_after_close() {
        let closed_at = Utc::now();
        assert_eq!(
            payment_deadline_from(closed_at),
            closed_at + Duration::days(3)
        );
    }

    #[test]
    fn test_end_time_defaults_to_seven_days() {
        let now = Utc::now();
        assert_eq!(end_time_or_default(None, now), now + Duration::days(7));
        let explicit = now + Duration::hours(2);
        assert_eq!(end_time_or_default(Some(explicit), now), explicit);
    }

    #[test]
    fn test_has_ended_is_exclusive_of_end_time() {
        let now = Utc::now();
        let mut auction = sample_auction(now);
        auction.end_time = now;
        // end_time 정각의 입찰은 아직 유효하다
        assert!(!auction.has_ended(now));
        assert!(auction.has_ended(now + Duration::seconds(1)));
    }

    #[test]
    fn test_is_active_only_for_active_status() {
        let now = Utc::now();
        let mut auction = sample_auction(now);
        assert!(auction.is_active());
        auction.status = status::CLOSED.to_string();
        assert!(!auction.is_active());
        auction.status = status::CANCELLED.to_string();
        assert!(!auction.is_active());
    }
}
// endregion: --- Tests
