// region:    --- Imports
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

// endregion: --- Imports

// region:    --- App Error
/// 서비스 전역 오류 타입
/// 검증 실패는 호출자에게 그대로 반환하고, 부수효과(알림) 실패는 호출부에서 삼킨다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Required fields are missing")]
    MissingFields,

    #[error("Bid amount must be a positive number")]
    InvalidAmount,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("The seller cannot bid on their own auction")]
    SellerCannotBid,

    #[error("Auction is not active")]
    AuctionNotActive,

    #[error("Auction has already ended")]
    AuctionEnded,

    #[error("Bid must be greater than the current bid of PKR {current_price}")]
    BidTooLow { current_price: i64 },

    #[error("Only the seller can close this auction")]
    Unauthorized,

    #[error("{0}")]
    InvalidState(&'static str),

    #[error("Auction has not ended yet")]
    NotYetEnded,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// 클라이언트가 분기할 수 있는 오류 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingFields => "MISSING_FIELDS",
            AppError::InvalidAmount => "INVALID_AMOUNT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::SellerCannotBid => "SELLER_CANNOT_BID",
            AppError::AuctionNotActive => "AUCTION_NOT_ACTIVE",
            AppError::AuctionEnded => "AUCTION_ENDED",
            AppError::BidTooLow { .. } => "BID_TOO_LOW",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::NotYetEnded => "NOT_YET_ENDED",
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::InvalidState(_)
            | AppError::NotYetEnded
            | AppError::AuctionNotActive
            | AppError::AuctionEnded => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// 오류 응답 본문: {"error": 메시지, "code": 오류 코드}
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        // BID_TOO_LOW는 현재 가격을 함께 내려준다
        if let AppError::BidTooLow { current_price } = &self {
            body["current_price"] = serde_json::json!(current_price);
        }
        (self.status(), Json(body)).into_response()
    }
}
// endregion: --- App Error

// endregion: --- Tests
