// region:    --- Imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// endregion: --- Imports

// region:    --- Constants
/// 알림 종류
pub mod kind {
    pub const AUCTION_WON: &str = "auction_won";
    pub const AUCTION_ENDED: &str = "auction_ended";
    pub const PAYMENT_OVERDUE: &str = "payment_overdue";
}
// endregion: --- Constants

// region:    --- Models
/// 알림 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub auction_id: Option<i64>,
    pub product_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// 생성 전 알림 내용
#[derive(Debug, Clone, Serialize)]
pub struct NotificationDraft {
    pub user_id: i64,
    pub kind: &'static str,
    pub title: String,
    pub message: String,
    pub auction_id: Option<i64>,
    pub product_id: Option<i64>,
}

impl NotificationDraft {
    /// 낙찰 알림
    pub fn auction_won(user_id: i64, auction_id: i64, product_id: i64, amount: i64) -> Self {
        Self {
            user_id,
            kind: kind::AUCTION_WON,
            title: "You won the auction!".to_string(),
            message: format!(
                "Congratulations! You won the auction with a bid of PKR {amount}. Please complete the payment within 3 days."
            ),
            auction_id: Some(auction_id),
            product_id: Some(product_id),
        }
    }

    /// 경매 종료(미낙찰) 알림
    pub fn auction_ended(user_id: i64, auction_id: i64, product_id: i64) -> Self {
        Self {
            user_id,
            kind: kind::AUCTION_ENDED,
            title: "Auction ended".to_string(),
            message: "The auction you participated in has ended. Unfortunately, your bid did not win.".to_string(),
            auction_id: Some(auction_id),
            product_id: Some(product_id),
        }
    }

    /// 결제 연체 알림
    pub fn payment_overdue(user_id: i64, auction_id: i64, product_id: i64, amount: i64) -> Self {
        Self {
            user_id,
            kind: kind::PAYMENT_OVERDUE,
            title: "Payment overdue".to_string(),
            message: format!(
                "Your payment of PKR {amount} for the auction you won is overdue. A penalty has been applied to your account."
            ),
            auction_id: Some(auction_id),
            product_id: Some(product_id),
        }
    }
}
// endregion: --- Models

// endregion: --- Tests
