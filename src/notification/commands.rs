/// 알림 조회/변경 커맨드
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::{AppError, Result};
use crate::notification::model::Notification;
use crate::query::queries;
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Commands
/// 페이지네이션 기본값/상한
const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// 알림 목록 응답 (목록 + 전체/미확인 수)
#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub total: i64,
    pub unread: i64,
}

/// limit/skip 정규화
pub fn normalize_page(limit: Option<i64>, skip: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let skip = skip.unwrap_or(0).max(0);
    (limit, skip)
}

/// 사용자 알림 조회 (최신순, 미확인 필터/페이지네이션 지원)
pub async fn list_for_user(
    db_manager: &DatabaseManager,
    user_id: i64,
    unread_only: bool,
    limit: Option<i64>,
    skip: Option<i64>,
) -> Result<NotificationPage> {
    info!(
        "{:<12} --> 알림 조회: 사용자 {} (unread_only: {})",
        "Query", user_id, unread_only
    );
    let (limit, skip) = normalize_page(limit, skip);

    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let notifications = sqlx::query_as::<_, Notification>(queries::GET_NOTIFICATIONS)
                    .bind(user_id)
                    .bind(unread_only)
                    .bind(limit)
                    .bind(skip)
                    .fetch_all(&mut **tx)
                    .await?;

                let total = sqlx::query_scalar::<_, i64>(queries::COUNT_NOTIFICATIONS)
                    .bind(user_id)
                    .bind(false)
                    .fetch_one(&mut **tx)
                    .await?;

                let unread = sqlx::query_scalar::<_, i64>(queries::COUNT_NOTIFICATIONS)
                    .bind(user_id)
                    .bind(true)
                    .fetch_one(&mut **tx)
                    .await?;

                Ok(NotificationPage {
                    notifications,
                    total,
                    unread,
                })
            })
        })
        .await
}

/// 알림 읽음 처리
pub async fn mark_read(db_manager: &DatabaseManager, notification_id: i64) -> Result<Notification> {
    info!("{:<12} --> 알림 읽음 처리 id: {}", "Command", notification_id);
    sqlx::query_as::<_, Notification>(queries::MARK_NOTIFICATION_READ)
        .bind(notification_id)
        .fetch_optional(&*db_manager.pool)
        .await
        .map_err(AppError::from)?
        .ok_or(AppError::NotFound("Notification"))
}

/// 사용자 알림 일괄 읽음 처리 (읽음 처리된 건수 반환)
pub async fn mark_all_read(db_manager: &DatabaseManager, user_id: i64) -> Result<u64> {
    info!(
        "{:<12} --> 알림 일괄 읽음 처리 사용자: {}",
        "Command", user_id
    );
    let result = sqlx::query(queries::MARK_ALL_NOTIFICATIONS_READ)
        .bind(user_id)
        .execute(&*db_manager.pool)
        .await?;
    Ok(result.rows_affected())
}

/// 알림 삭제
pub async fn delete(db_manager: &DatabaseManager, notification_id: i64) -> Result<()> {
    info!("{:<12} --> 알림 삭제 id: {}", "Command", notification_id);
    let result = sqlx::query(queries::DELETE_NOTIFICATION)
        .bind(notification_id)
        .execute(&*db_manager.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Notification"));
    }
    Ok(())
}
// endregion: --- Commands

// endregion: --- Tests
